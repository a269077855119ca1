//! End-to-end optimizer runs with checkpointing.

use approx::assert_relative_eq;
use vqlab_circuit::{CircuitKind, cost};
use vqlab_optim::{OptimizationSettings, VqeOptimizer, load_state, save_state};

fn settings(steps: usize) -> OptimizationSettings {
    OptimizationSettings {
        steps,
        stepsize: 0.1,
        circuit: CircuitKind::Default,
        save_path: None,
        checkpoint_interval: 10,
    }
}

#[test]
fn checkpoint_holds_last_full_interval() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkpoints").join("state.json");

    let opt = VqeOptimizer::new(OptimizationSettings {
        save_path: Some(path.clone()),
        ..settings(25)
    })
    .unwrap();
    let outcome = opt.run(vec![0.5, 0.5]).unwrap();
    assert_eq!(outcome.cost_history.len(), 25);

    let saved = load_state(&path).unwrap();
    assert_eq!(saved.cost_history.len(), 20);
    assert_eq!(saved.cost_history[..], outcome.cost_history[..20]);
}

#[test]
fn no_checkpoint_before_first_interval() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let opt = VqeOptimizer::new(OptimizationSettings {
        save_path: Some(path.clone()),
        ..settings(9)
    })
    .unwrap();
    opt.run(vec![0.5, 0.5]).unwrap();
    assert!(!path.exists());
}

#[test]
fn default_circuit_descends_towards_minus_one() {
    let opt = VqeOptimizer::new(settings(200)).unwrap();
    let outcome = opt.run(vec![0.5, 0.5]).unwrap();

    let history = &outcome.cost_history;
    assert_relative_eq!(history[0], f64::cos(0.5), epsilon = 1e-12);
    assert!(history.windows(2).all(|w| w[1] <= w[0] + 1e-12));

    let final_cost = cost(&outcome.params, "default").unwrap();
    assert!(final_cost < -0.99, "final cost {final_cost}");
}

#[test]
fn history_records_cost_before_each_step() {
    let opt = VqeOptimizer::new(settings(3)).unwrap();
    let outcome = opt.run(vec![1.0, 0.0]).unwrap();

    // p0 ← p0 + η sin(p0); the recorded cost is cos of the pre-step value.
    let mut p0: f64 = 1.0;
    for &recorded in &outcome.cost_history {
        assert_relative_eq!(recorded, p0.cos(), epsilon = 1e-12);
        p0 += 0.1 * p0.sin();
    }
    assert_relative_eq!(outcome.params[0], p0, epsilon = 1e-12);
}

#[test]
fn resume_from_saved_params() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    save_state(&[1.0, 0.5], &[0.9, 0.8], &path).unwrap();

    let loaded = load_state(&path).unwrap();
    let outcome = VqeOptimizer::new(settings(5))
        .unwrap()
        .run(loaded.params)
        .unwrap();

    assert_eq!(outcome.cost_history.len(), 5);
    assert_relative_eq!(outcome.cost_history[0], f64::cos(1.0), epsilon = 1e-12);
}

#[test]
fn wrong_parameter_count_fails() {
    let opt = VqeOptimizer::new(settings(3)).unwrap();
    assert!(opt.run(vec![0.1, 0.2, 0.3]).is_err());
}
