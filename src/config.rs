use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::forces::{Gravity, DEFAULT_G};
use crate::sim::BodyConfig;

pub const DEFAULT_DT: f64 = 0.01;
pub const DEFAULT_STEPS: usize = 500;

fn default_g() -> f64 { DEFAULT_G }
fn default_dt() -> f64 { DEFAULT_DT }
fn default_steps() -> usize { DEFAULT_STEPS }

/// Complete description of a run:
/// {
///   "G"?: number, "dt"?: number, "steps"?: integer, "softening"?: number,
///   "bodies": [{ "name", "mass", "position": [x,y,z], "velocity": [x,y,z], "color"? }]
/// }
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    #[serde(rename = "G", alias = "g", default = "default_g")]
    pub g: f64,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default)]
    pub softening: f64,
    pub bodies: Vec<BodyConfig>,
}

impl SimulationConfig {
    pub fn new(bodies: Vec<BodyConfig>) -> Self {
        Self {
            g: DEFAULT_G,
            dt: DEFAULT_DT,
            steps: DEFAULT_STEPS,
            softening: 0.0,
            bodies,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Scalar parameters only; bodies are checked when the state is built.
    pub fn validate(&self) -> Result<(), SimError> {
        check_time_step(self.dt)?;
        check_step_count(self.steps)?;
        self.gravity().map(|_| ())
    }

    pub fn gravity(&self) -> Result<Gravity, SimError> {
        Gravity::new(self.g, self.softening)
    }
}

pub(crate) fn check_time_step(dt: f64) -> Result<(), SimError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTimeStep(dt))
    }
}

pub(crate) fn check_step_count(steps: usize) -> Result<(), SimError> {
    if steps == 0 {
        Err(SimError::InvalidStepCount(steps))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "bodies": [
            { "name": "a", "mass": 1.0, "position": [1, 0, 0], "velocity": [0, 0.5, 0] },
            { "name": "b", "mass": 2.0, "position": [-1, 0, 0], "velocity": [0, -0.25, 0], "color": "cyan" }
        ]
    }"#;

    #[test]
    fn fills_in_defaults() {
        let cfg = SimulationConfig::from_json_str(MINIMAL).unwrap();
        assert_eq!(cfg.g, 1.0);
        assert_eq!(cfg.dt, 0.01);
        assert_eq!(cfg.steps, 500);
        assert_eq!(cfg.softening, 0.0);
        assert_eq!(cfg.bodies.len(), 2);
        assert_eq!(cfg.bodies[0].color, None);
        assert_eq!(cfg.bodies[1].color.as_deref(), Some("cyan"));
        cfg.validate().unwrap();
    }

    #[test]
    fn accepts_explicit_parameters() {
        let text = r#"{ "G": 0.5, "dt": 0.001, "steps": 20, "softening": 0.01,
                        "bodies": [{ "name": "x", "mass": 1, "position": [0,0,0], "velocity": [0,0,0] }] }"#;
        let cfg = SimulationConfig::from_json_str(text).unwrap();
        assert_eq!((cfg.g, cfg.dt, cfg.steps, cfg.softening), (0.5, 0.001, 20, 0.01));
    }

    #[test]
    fn rejects_unknown_fields_and_negative_steps() {
        let unknown = r#"{ "bodies": [], "integrator": "rk4" }"#;
        assert!(matches!(SimulationConfig::from_json_str(unknown), Err(SimError::Json(_))));

        let negative = r#"{ "steps": -5, "bodies": [] }"#;
        assert!(matches!(SimulationConfig::from_json_str(negative), Err(SimError::Json(_))));
    }

    #[test]
    fn validate_catches_bad_scalars() {
        let mut cfg = SimulationConfig::from_json_str(MINIMAL).unwrap();
        cfg.dt = 0.0;
        assert!(matches!(cfg.validate(), Err(SimError::InvalidTimeStep(_))));
        cfg.dt = -0.1;
        assert!(matches!(cfg.validate(), Err(SimError::InvalidTimeStep(_))));
        cfg.dt = f64::INFINITY;
        assert!(matches!(cfg.validate(), Err(SimError::InvalidTimeStep(_))));

        cfg.dt = 0.01;
        cfg.steps = 0;
        assert!(matches!(cfg.validate(), Err(SimError::InvalidStepCount(0))));

        cfg.steps = 10;
        cfg.softening = -1.0;
        let err = cfg.validate().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn json_round_trip_keeps_body_order() {
        let cfg = SimulationConfig::from_json_str(MINIMAL).unwrap();
        let again = SimulationConfig::from_json_str(&cfg.to_json_pretty().unwrap()).unwrap();
        assert_eq!(cfg, again);
        assert_eq!(again.bodies[0].name, "a");
    }
}
