//! vqlab optimizer
//!
//! Gradient-descent loop over a circuit cost, with periodic JSON checkpoints
//! that can be used to resume a run.
//!
//! # Example
//!
//! ```rust
//! use vqlab_optim::{OptimizationSettings, VqeOptimizer};
//!
//! let settings = OptimizationSettings {
//!     steps: 20,
//!     stepsize: 0.1,
//!     ..Default::default()
//! };
//! let outcome = VqeOptimizer::new(settings).unwrap().run(vec![0.5, 0.5]).unwrap();
//! assert_eq!(outcome.cost_history.len(), 20);
//! ```

pub mod checkpoint;
pub mod descent;
pub mod error;
pub mod runner;

pub use checkpoint::{Checkpoint, load_state, save_state};
pub use descent::{GradientDescent, Optimizer};
pub use error::{OptimError, OptimResult};
pub use runner::{
    DEFAULT_CHECKPOINT_INTERVAL, OptimizationOutcome, OptimizationSettings, VqeOptimizer,
    random_params,
};
