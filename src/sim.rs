use std::collections::HashMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::forces::{CoincidentPair, ForceField};
use crate::Body;

/// Colours assigned, in order, to bodies that do not name one.
pub const DEFAULT_PALETTE: [&str; 6] = ["red", "white", "blue", "yellow", "green", "magenta"];

/// Initial condition of one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    /// Display colour for the renderer, never read by the physics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BodyConfig {
    pub fn new(name: impl Into<String>, mass: f64, position: [f64; 3], velocity: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
            velocity,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Full information about one body at the current instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub name: String,
    pub color: String,
    pub mass: f64,
    /// [x, y, z, vx, vy, vz]
    pub state: [f64; 6],
    /// Net force applied during the last completed step.
    pub force: [f64; 3],
}

/// Ordered, fixed set of bodies advanced in place one step at a time.
#[derive(Debug, Clone)]
pub struct SimulationState {
    bodies: Vec<Body>,
    index: HashMap<String, usize>,
    colors: Vec<String>,
    forces: Vec<Vector3<f64>>, // force buffer, reused every step
    time: f64,
    completed_steps: usize,
}

impl SimulationState {
    /// Build the state, rejecting empty sets, non-positive or non-finite
    /// masses, non-finite vectors and repeated names.
    pub fn new(configs: &[BodyConfig]) -> Result<Self, SimError> {
        if configs.is_empty() {
            return Err(SimError::NoBodies);
        }

        let n = configs.len();
        let mut bodies = Vec::with_capacity(n);
        let mut index = HashMap::with_capacity(n);
        let mut colors = Vec::with_capacity(n);

        for (i, c) in configs.iter().enumerate() {
            let body = Body::new(c.name.clone(), c.mass, c.position, c.velocity);
            if !body.is_finite() {
                return Err(SimError::NonFiniteBody { body: c.name.clone() });
            }
            if c.mass <= 0.0 {
                return Err(SimError::InvalidMass { body: c.name.clone(), mass: c.mass });
            }
            if index.insert(c.name.clone(), i).is_some() {
                return Err(SimError::DuplicateName(c.name.clone()));
            }
            colors.push(
                c.color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PALETTE[i % DEFAULT_PALETTE.len()].to_string()),
            );
            bodies.push(body);
        }

        Ok(Self {
            bodies,
            index,
            colors,
            forces: vec![Vector3::zeros(); n],
            time: 0.0,
            completed_steps: 0,
        })
    }

    pub fn len(&self) -> usize { self.bodies.len() }
    pub fn is_empty(&self) -> bool { self.bodies.is_empty() }
    pub fn time(&self) -> f64 { self.time }
    pub fn completed_steps(&self) -> usize { self.completed_steps }
    pub fn bodies(&self) -> &[Body] { &self.bodies }
    pub fn colors(&self) -> &[String] { &self.colors }

    pub fn body(&self, i: usize) -> Option<&Body> {
        self.bodies.get(i)
    }

    pub fn index_of(&self, name: &str) -> Result<usize, SimError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| SimError::UnknownBody(name.to_string()))
    }

    pub fn body_by_name(&self, name: &str) -> Result<&Body, SimError> {
        self.index_of(name).map(|i| &self.bodies[i])
    }

    /// Net forces applied during the last completed step (zeros before the first).
    pub fn last_forces(&self) -> &[Vector3<f64>] {
        &self.forces
    }

    /// Advance every body by one semi-implicit Euler step.
    ///
    /// On error nothing is moved: forces are evaluated for all bodies before
    /// any of them is updated.
    pub fn advance<F: ForceField + ?Sized>(&mut self, field: &F, dt: f64) -> Result<(), SimError> {
        field
            .force_all(&self.bodies, &mut self.forces)
            .map_err(|pair| self.coincident(pair, self.completed_steps + 1))?;

        for (body, force) in self.bodies.iter_mut().zip(self.forces.iter()) {
            body.step(*force, dt);
        }

        self.time += dt;
        self.completed_steps += 1;
        Ok(())
    }

    pub(crate) fn coincident(&self, pair: CoincidentPair, step: usize) -> SimError {
        SimError::CoincidentBodies {
            first: self.bodies[pair.first].name().to_string(),
            second: self.bodies[pair.second].name().to_string(),
            step,
        }
    }

    /// Σ m·v over all bodies.
    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Positions packed as [x0, y0, z0, x1, ...].
    pub fn positions_flat(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for b in &self.bodies {
            out.extend_from_slice(b.position().as_slice());
        }
        out
    }

    pub fn body_snapshots(&self) -> Vec<BodySnapshot> {
        self.bodies
            .iter()
            .zip(self.colors.iter())
            .zip(self.forces.iter())
            .map(|((b, color), f)| BodySnapshot {
                name: b.name().to_string(),
                color: color.clone(),
                mass: b.mass(),
                state: b.state_array(),
                force: [f.x, f.y, f.z],
            })
            .collect()
    }

    /// Current state as initial conditions, e.g. to restart a run from here.
    pub fn to_body_configs(&self) -> Vec<BodyConfig> {
        self.bodies
            .iter()
            .zip(self.colors.iter())
            .map(|(b, c)| b.to_body_config(Some(c.clone())))
            .collect()
    }
}
