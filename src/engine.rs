use log::{debug, info};
use nalgebra::Vector3;

use crate::config::{check_step_count, check_time_step, SimulationConfig};
use crate::error::SimError;
use crate::forces::{ForceField, Gravity};
use crate::models::scenarios::scenario_config;
use crate::sim::SimulationState;
use crate::trajectory::Trajectories;

/// Advance `state` exactly `steps` times and record every body's position
/// after each step.
///
/// `dt` and `steps` are validated before the first step; the first failing
/// step aborts the run.
pub fn run<F: ForceField + ?Sized>(
    state: &mut SimulationState,
    field: &F,
    dt: f64,
    steps: usize,
) -> Result<Trajectories, SimError> {
    check_time_step(dt)?;
    check_step_count(steps)?;

    let mut trajectories = Trajectories::new(state, dt, steps);
    for _ in 0..steps {
        state.advance(field, dt)?;
        trajectories.record(state);
    }
    Ok(trajectories)
}

/// Energy bookkeeping at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyReport {
    pub kinetic: f64,
    pub potential: f64,
}

impl EnergyReport {
    pub fn total(&self) -> f64 { self.kinetic + self.potential }
}

/// A gravitational run driven step by step or to completion.
#[derive(Debug)]
pub struct Engine {
    state: SimulationState,
    gravity: Gravity,
    dt: f64,
    steps: usize,
    trajectories: Trajectories,
    initial_energy: EnergyReport,
}

impl Engine {
    pub fn new_builtin(scenario_id: &str) -> Result<Self, SimError> {
        Self::from_config(scenario_config(scenario_id)?)
    }

    pub fn from_config(cfg: SimulationConfig) -> Result<Self, SimError> {
        cfg.validate()?;
        let gravity = cfg.gravity()?;
        let state = SimulationState::new(&cfg.bodies)?;
        let trajectories = Trajectories::new(&state, cfg.dt, cfg.steps);
        let initial_energy = EnergyReport {
            kinetic: state.kinetic_energy(),
            potential: gravity.potential_energy(state.bodies()),
        };
        Ok(Self {
            state,
            gravity,
            dt: cfg.dt,
            steps: cfg.steps,
            trajectories,
            initial_energy,
        })
    }

    pub fn len(&self) -> usize { self.state.len() }
    pub fn is_empty(&self) -> bool { self.state.is_empty() }
    pub fn dt(&self) -> f64 { self.dt }
    pub fn steps(&self) -> usize { self.steps }
    pub fn completed_steps(&self) -> usize { self.state.completed_steps() }
    pub fn is_finished(&self) -> bool { self.completed_steps() >= self.steps }
    pub fn state(&self) -> &SimulationState { &self.state }
    pub fn gravity(&self) -> &Gravity { &self.gravity }
    pub fn trajectories(&self) -> &Trajectories { &self.trajectories }
    pub fn into_trajectories(self) -> Trajectories { self.trajectories }

    /// One step plus a snapshot. Returns whether steps remain; a finished
    /// engine does nothing.
    pub fn tick(&mut self) -> Result<bool, SimError> {
        if self.is_finished() {
            return Ok(false);
        }
        self.state.advance(&self.gravity, self.dt)?;
        self.trajectories.record(&self.state);

        let done = self.completed_steps();
        let tenth = (self.steps / 10).max(1);
        if done % tenth == 0 {
            debug!(
                "step {}/{} (t = {:.4}), energy drift {:.3e}",
                done,
                self.steps,
                self.state.time(),
                self.relative_energy_drift()
            );
        }
        Ok(!self.is_finished())
    }

    /// Run all remaining steps.
    pub fn run(&mut self) -> Result<&Trajectories, SimError> {
        info!(
            "integrating {} bodies for {} steps (dt = {}, G = {})",
            self.len(),
            self.steps - self.completed_steps().min(self.steps),
            self.dt,
            self.gravity.g()
        );
        while self.tick()? {}
        info!(
            "finished at t = {:.4}; relative energy drift {:.3e}",
            self.state.time(),
            self.relative_energy_drift()
        );
        Ok(&self.trajectories)
    }

    pub fn energy(&self) -> EnergyReport {
        EnergyReport {
            kinetic: self.state.kinetic_energy(),
            potential: self.gravity.potential_energy(self.state.bodies()),
        }
    }

    pub fn initial_energy(&self) -> EnergyReport { self.initial_energy }

    /// |E(t) - E(0)| / |E(0)|, or the absolute change when E(0) is zero.
    pub fn relative_energy_drift(&self) -> f64 {
        let e0 = self.initial_energy.total();
        let diff = (self.energy().total() - e0).abs();
        if e0 == 0.0 { diff } else { diff / e0.abs() }
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.state.total_momentum()
    }

    /// Current positions as f32 triples for renderers.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.state.positions_flat().into_iter().map(|c| c as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BodyConfig;

    fn short_binary(steps: usize) -> SimulationConfig {
        let mut cfg = crate::models::scenarios::binary();
        cfg.steps = steps;
        cfg
    }

    #[test]
    fn run_rejects_bad_parameters_before_stepping() {
        let mut state = SimulationState::new(&short_binary(1).bodies).unwrap();
        let before = state.positions_flat();

        assert!(matches!(run(&mut state, &Gravity::default(), 0.0, 10), Err(SimError::InvalidTimeStep(_))));
        assert!(matches!(run(&mut state, &Gravity::default(), f64::NAN, 10), Err(SimError::InvalidTimeStep(_))));
        assert!(matches!(run(&mut state, &Gravity::default(), 0.01, 0), Err(SimError::InvalidStepCount(0))));
        assert_eq!(state.positions_flat(), before);
        assert_eq!(state.completed_steps(), 0);
    }

    #[test]
    fn tick_stops_at_step_budget() {
        let mut engine = Engine::from_config(short_binary(3)).unwrap();
        assert!(engine.tick().unwrap());
        assert!(engine.tick().unwrap());
        assert!(!engine.tick().unwrap());
        assert!(engine.is_finished());
        assert!(!engine.tick().unwrap());
        assert_eq!(engine.completed_steps(), 3);
        assert_eq!(engine.trajectories().steps(), 3);
    }

    #[test]
    fn engine_and_free_run_agree() {
        let cfg = short_binary(25);
        let mut engine = Engine::from_config(cfg.clone()).unwrap();
        engine.run().unwrap();

        let mut state = SimulationState::new(&cfg.bodies).unwrap();
        let traj = run(&mut state, &cfg.gravity().unwrap(), cfg.dt, cfg.steps).unwrap();
        assert_eq!(engine.trajectories(), &traj);
    }

    #[test]
    fn circular_binary_keeps_energy_close() {
        let mut engine = Engine::new_builtin("binary").unwrap();
        engine.run().unwrap();
        assert!(engine.relative_energy_drift() < 2e-2, "drift {}", engine.relative_energy_drift());
        assert!(engine.momentum().norm() < 1e-12);
    }

    #[test]
    fn from_config_reports_bad_bodies() {
        let mut cfg = short_binary(5);
        cfg.bodies.push(BodyConfig::new("ghost", -1.0, [3.0, 0.0, 0.0], [0.0; 3]));
        assert!(matches!(Engine::from_config(cfg), Err(SimError::InvalidMass { .. })));
        assert!(matches!(Engine::new_builtin("nope"), Err(SimError::UnknownScenario(_))));
    }

    #[test]
    fn positions_flat_follows_body_order() {
        let engine = Engine::new_builtin("three-body").unwrap();
        assert_eq!(
            engine.positions_flat(),
            vec![1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(engine.len(), 3);
    }
}
