use nalgebra::Vector3;

pub mod config;
pub mod engine;
pub mod error;
pub mod forces;
pub mod models;
pub mod output;
pub mod sim;
pub mod trajectory;

pub use config::SimulationConfig;
pub use engine::{run, Engine};
pub use error::SimError;
pub use forces::{compute_all_forces, CoincidentPair, ForceField, Gravity};
pub use sim::{BodyConfig, BodySnapshot, SimulationState};
pub use trajectory::Trajectories;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

/// Point mass with position, velocity and mass.
///
/// The name is metadata only; bodies are addressed by their index in
/// [`SimulationState`].
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    mass: f64,
}

impl Body {
    pub fn new(name: impl Into<String>, mass: f64, position: [f64; 3], velocity: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            position: Vector3::from(position),
            velocity: Vector3::from(velocity),
            mass,
        }
    }

    /// One semi-implicit Euler step under a force held constant over `dt`.
    ///
    /// Velocity is updated first and the new velocity drives the position
    /// update.
    pub fn step(&mut self, force: Vector3<f64>, dt: f64) {
        let acc = force / self.mass;
        self.velocity += acc * dt;
        self.position += self.velocity * dt;
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn position(&self) -> &Vector3<f64> { &self.position }
    pub fn velocity(&self) -> &Vector3<f64> { &self.velocity }
    pub fn mass(&self) -> f64 { self.mass }

    /// Linear momentum m·v.
    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// State as [x, y, z, vx, vy, vz].
    pub fn state_array(&self) -> [f64; 6] {
        [
            self.position.x, self.position.y, self.position.z,
            self.velocity.x, self.velocity.y, self.velocity.z,
        ]
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.mass.is_finite()
            && self.position.iter().all(|c| c.is_finite())
            && self.velocity.iter().all(|c| c.is_finite())
    }

    /// Convert back into an initial condition, e.g. to restart from the current state.
    pub fn to_body_config(&self, color: Option<String>) -> BodyConfig {
        BodyConfig {
            name: self.name.clone(),
            mass: self.mass,
            position: self.position.into(),
            velocity: self.velocity.into(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_updates_velocity_before_position() {
        let mut body = Body::new("probe", 2.0, [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        body.step(Vector3::new(0.0, 0.0, -4.0), 0.1);

        // a = (0, 0, -2); v = (0, 1, -0.2); x = x0 + v_new * dt
        assert_eq!(*body.velocity(), Vector3::new(0.0, 1.0, -0.2));
        let expected = Vector3::new(1.0, 0.1, -0.02);
        assert!((body.position() - expected).norm() < 1e-15);
    }

    #[test]
    fn step_never_touches_mass() {
        let mut body = Body::new("probe", 3.5, [0.0; 3], [0.0; 3]);
        body.step(Vector3::new(1.0, 2.0, 3.0), 0.5);
        assert_eq!(body.mass(), 3.5);
    }

    #[test]
    fn body_config_round_trip_keeps_state() {
        let body = Body::new("a", 1.5, [1.0, 2.0, 3.0], [4.0, 5.0, 6.0]);
        let cfg = body.to_body_config(Some("red".to_string()));
        assert_eq!(cfg.position, [1.0, 2.0, 3.0]);
        assert_eq!(cfg.velocity, [4.0, 5.0, 6.0]);
        assert_eq!(cfg.color.as_deref(), Some("red"));
        assert_eq!(body.state_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
