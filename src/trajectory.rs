use nalgebra::Vector3;

use crate::sim::SimulationState;

/// Recorded positions of every body, one entry per completed step.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectories {
    names: Vec<String>,
    colors: Vec<String>,
    dt: f64,
    start_time: f64,
    paths: Vec<Vec<Vector3<f64>>>,
}

impl Trajectories {
    /// Recording starts from the current model time of `state`.
    pub fn new(state: &SimulationState, dt: f64, capacity: usize) -> Self {
        Self {
            names: state.bodies().iter().map(|b| b.name().to_string()).collect(),
            colors: state.colors().to_vec(),
            dt,
            start_time: state.time(),
            paths: (0..state.len()).map(|_| Vec::with_capacity(capacity)).collect(),
        }
    }

    /// Append a copy of every current position.
    pub(crate) fn record(&mut self, state: &SimulationState) {
        for (path, body) in self.paths.iter_mut().zip(state.bodies()) {
            path.push(*body.position());
        }
    }

    /// Number of bodies.
    pub fn len(&self) -> usize { self.paths.len() }
    pub fn is_empty(&self) -> bool { self.paths.is_empty() }
    pub fn dt(&self) -> f64 { self.dt }
    pub fn start_time(&self) -> f64 { self.start_time }
    pub fn names(&self) -> &[String] { &self.names }
    pub fn colors(&self) -> &[String] { &self.colors }

    /// Number of recorded steps.
    pub fn steps(&self) -> usize {
        self.paths.first().map_or(0, Vec::len)
    }

    /// Model time of the `k`-th recorded snapshot (0-based).
    pub fn time_of(&self, k: usize) -> f64 {
        self.start_time + (k + 1) as f64 * self.dt
    }

    pub fn path(&self, i: usize) -> Option<&[Vector3<f64>]> {
        self.paths.get(i).map(Vec::as_slice)
    }

    pub fn path_by_name(&self, name: &str) -> Option<&[Vector3<f64>]> {
        let i = self.names.iter().position(|n| n == name)?;
        self.path(i)
    }

    /// (name, color, path) per body in state order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[Vector3<f64>])> + '_ {
        self.names
            .iter()
            .zip(self.colors.iter())
            .zip(self.paths.iter())
            .map(|((n, c), p)| (n.as_str(), c.as_str(), p.as_slice()))
    }

    /// Path of body `i` packed as [x0, y0, z0, x1, ...] in f32 for renderers.
    pub fn path_flat_f32(&self, i: usize) -> Vec<f32> {
        let Some(path) = self.path(i) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(path.len() * 3);
        for p in path {
            out.push(p.x as f32);
            out.push(p.y as f32);
            out.push(p.z as f32);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::{CoincidentPair, ForceField};
    use crate::sim::BodyConfig;
    use crate::Body;

    struct Drift;

    impl ForceField for Drift {
        fn force_all(&self, _: &[Body], out: &mut [Vector3<f64>]) -> Result<(), CoincidentPair> {
            out.iter_mut().for_each(|f| *f = Vector3::zeros());
            Ok(())
        }
    }

    #[test]
    fn records_copies_not_references() {
        let mut state = SimulationState::new(&[
            BodyConfig::new("a", 1.0, [0.0; 3], [1.0, 0.0, 0.0]),
            BodyConfig::new("b", 1.0, [5.0, 0.0, 0.0], [0.0; 3]),
        ])
        .unwrap();
        let mut traj = Trajectories::new(&state, 0.5, 3);

        for _ in 0..3 {
            state.advance(&Drift, 0.5).unwrap();
            traj.record(&state);
        }

        assert_eq!(traj.steps(), 3);
        let a = traj.path_by_name("a").unwrap();
        assert_eq!(a[0].x, 0.5);
        assert_eq!(a[1].x, 1.0);
        assert_eq!(a[2].x, 1.5);
        assert_eq!(traj.time_of(2), 1.5);
        assert!(traj.path_by_name("zzz").is_none());
        assert_eq!(traj.path_flat_f32(1), vec![5.0, 0.0, 0.0, 5.0, 0.0, 0.0, 5.0, 0.0, 0.0]);
        assert!(traj.path_flat_f32(7).is_empty());
    }

    #[test]
    fn times_continue_from_an_advanced_state() {
        let mut state = SimulationState::new(&[BodyConfig::new("a", 1.0, [0.0; 3], [1.0, 0.0, 0.0])]).unwrap();
        for _ in 0..4 {
            state.advance(&Drift, 0.25).unwrap();
        }
        let traj = crate::engine::run(&mut state, &Drift, 0.25, 2).unwrap();
        assert_eq!(traj.start_time(), 1.0);
        assert_eq!(traj.time_of(0), 1.25);
        assert_eq!(traj.time_of(1), 1.5);
        assert_eq!(traj.path(0).unwrap()[1].x, 1.5);
    }
}
