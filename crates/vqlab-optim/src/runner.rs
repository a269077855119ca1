//! The optimizer loop.

use std::path::PathBuf;

use rand::Rng;
use serde::{Deserialize, Serialize};
use vqlab_circuit::{CircuitKind, CostFunction};

use crate::checkpoint::save_state;
use crate::descent::{GradientDescent, Optimizer};
use crate::error::{OptimError, OptimResult};

/// Default number of steps between progress reports and checkpoint saves.
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 10;

/// Settings for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSettings {
    /// Number of gradient-descent steps.
    pub steps: usize,
    /// Step size η.
    pub stepsize: f64,
    /// Circuit variant used as the cost.
    pub circuit: CircuitKind,
    /// Checkpoint file, overwritten every `checkpoint_interval` steps.
    pub save_path: Option<PathBuf>,
    /// Steps between progress reports and checkpoint saves.
    pub checkpoint_interval: usize,
}

impl Default for OptimizationSettings {
    fn default() -> Self {
        Self {
            steps: 100,
            stepsize: 0.1,
            circuit: CircuitKind::Default,
            save_path: None,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
        }
    }
}

impl OptimizationSettings {
    /// Check step size and checkpoint interval.
    pub fn validate(&self) -> OptimResult<()> {
        GradientDescent::new(self.stepsize)?;
        if self.checkpoint_interval == 0 {
            return Err(OptimError::InvalidCheckpointInterval);
        }
        Ok(())
    }
}

/// Final parameters and the cost recorded at each step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    /// Parameters after the last step.
    pub params: Vec<f64>,
    /// Cost before each step; length equals the number of steps taken.
    pub cost_history: Vec<f64>,
}

/// Runs a fixed number of gradient-descent steps on a circuit cost.
#[derive(Debug, Clone)]
pub struct VqeOptimizer {
    settings: OptimizationSettings,
    optimizer: GradientDescent,
    cost: CostFunction,
}

impl VqeOptimizer {
    /// Create an optimizer from validated settings.
    pub fn new(settings: OptimizationSettings) -> OptimResult<Self> {
        settings.validate()?;
        let optimizer = GradientDescent::new(settings.stepsize)?;
        let cost = CostFunction::new(settings.circuit);
        Ok(Self {
            settings,
            optimizer,
            cost,
        })
    }

    /// The settings this optimizer was built from.
    pub fn settings(&self) -> &OptimizationSettings {
        &self.settings
    }

    /// The cost being minimized.
    pub fn cost(&self) -> &CostFunction {
        &self.cost
    }

    /// Optimize starting from `initial`.
    ///
    /// Runs exactly `steps` steps. Every `checkpoint_interval` completed steps
    /// the progress is logged and, when a save path is configured, the
    /// checkpoint is overwritten with the current parameters and history.
    pub fn run(&self, initial: Vec<f64>) -> OptimResult<OptimizationOutcome> {
        let steps = self.settings.steps;
        let interval = self.settings.checkpoint_interval;

        tracing::info!(
            circuit = %self.settings.circuit,
            steps,
            stepsize = self.optimizer.stepsize(),
            "starting optimization"
        );

        let mut params = initial;
        let mut cost_history = Vec::with_capacity(steps);

        for i in 0..steps {
            let (next, cost) = self.optimizer.step_and_cost(&self.cost, &params)?;
            params = next;
            cost_history.push(cost);

            let step = i + 1;
            tracing::debug!(step, cost, "step complete");

            if step % interval == 0 {
                tracing::info!(step, cost, "optimization progress");
                if let Some(path) = &self.settings.save_path {
                    save_state(&params, &cost_history, path)?;
                }
            }
        }

        tracing::info!(
            final_cost = cost_history.last().copied(),
            "optimization finished"
        );

        Ok(OptimizationOutcome {
            params,
            cost_history,
        })
    }
}

/// Uniform random parameters in `[0, 1)`.
pub fn random_params<R: Rng + ?Sized>(num_params: usize, rng: &mut R) -> Vec<f64> {
    (0..num_params).map(|_| rng.gen_range(0.0..1.0)).collect()
}
