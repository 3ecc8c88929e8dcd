//! Net gravitational forces by direct pairwise summation.

use nalgebra::Vector3;

use crate::error::SimError;
use crate::sim::SimulationState;
use crate::Body;

pub const DEFAULT_G: f64 = 1.0;

/// Below this many bodies the parallel path costs more than it saves.
#[cfg(feature = "parallel")]
pub const PARALLEL_MIN_BODIES: usize = 64;

/// Indices of two bodies too close for a finite force, `first < second`.
///
/// Ordered by `(first, second)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CoincidentPair {
    pub first: usize,
    pub second: usize,
}

impl CoincidentPair {
    pub fn new(a: usize, b: usize) -> Self {
        Self { first: a.min(b), second: a.max(b) }
    }
}

/// Force field over all bodies. Implementations overwrite `out[i]` with the
/// net force on body `i`.
pub trait ForceField: Sync {
    fn force_all(&self, bodies: &[Body], out: &mut [Vector3<f64>]) -> Result<(), CoincidentPair>;
}

// Closures of the form Fn(bodies, out) work as fields too.
impl<F> ForceField for F
where
    F: Fn(&[Body], &mut [Vector3<f64>]) -> Result<(), CoincidentPair> + Sync,
{
    fn force_all(&self, bodies: &[Body], out: &mut [Vector3<f64>]) -> Result<(), CoincidentPair> {
        (self)(bodies, out)
    }
}

/// Newtonian gravity, F = G·m_i·m_j·r/|r|³, with optional Plummer softening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    g: f64,
    eps2: f64,
}

impl Default for Gravity {
    fn default() -> Self {
        Self { g: DEFAULT_G, eps2: 0.0 }
    }
}

impl Gravity {
    /// `softening` is a length ε; zero keeps the exact inverse-square law and
    /// makes coincident bodies an error.
    pub fn new(g: f64, softening: f64) -> Result<Self, SimError> {
        if !g.is_finite() || g <= 0.0 {
            return Err(SimError::InvalidGravitationalConstant(g));
        }
        if !softening.is_finite() || softening < 0.0 {
            return Err(SimError::InvalidSoftening(softening));
        }
        Ok(Self { g, eps2: softening * softening })
    }

    pub fn g(&self) -> f64 { self.g }
    pub fn softening(&self) -> f64 { self.eps2.sqrt() }

    /// Force on `bi` exerted by `bj`. `None` when they coincide without
    /// softening, or sit so close that |r|³ underflows and the force is not finite.
    ///
    /// The mass product is formed before scaling so that swapping the pair
    /// yields the exact negation.
    fn pair_force(&self, bi: &Body, bj: &Body) -> Option<Vector3<f64>> {
        let r = bj.position() - bi.position();
        let r2 = r.norm_squared();
        if r2 == 0.0 && self.eps2 == 0.0 {
            return None;
        }
        let d2 = r2 + self.eps2;
        let inv_r3 = 1.0 / (d2 * d2.sqrt());
        let coef = self.g * (bi.mass() * bj.mass()) * inv_r3;
        let f = r * coef;
        f.iter().all(|c| c.is_finite()).then_some(f)
    }

    /// Force on body `i` from body `j` alone.
    pub fn pairwise_force(&self, state: &SimulationState, i: usize, j: usize) -> Result<Vector3<f64>, SimError> {
        let bodies = state.bodies();
        let (bi, bj) = match (bodies.get(i), bodies.get(j)) {
            (Some(bi), Some(bj)) => (bi, bj),
            _ => return Err(SimError::UnknownBody(format!("#{}", i.max(j)))),
        };
        if i == j {
            return Ok(Vector3::zeros());
        }
        self.pair_force(bi, bj)
            .ok_or_else(|| state.coincident(CoincidentPair::new(i, j), state.completed_steps() + 1))
    }

    /// Σ_{i<j} −G·m_i·m_j/|r_ij| (softened when ε > 0).
    pub fn potential_energy(&self, bodies: &[Body]) -> f64 {
        let mut u = 0.0;
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let d2 = (bodies[j].position() - bodies[i].position()).norm_squared() + self.eps2;
                if d2 > 0.0 {
                    u -= self.g * bodies[i].mass() * bodies[j].mass() / d2.sqrt();
                }
            }
        }
        u
    }

    // Each unordered pair once: i gets +F, j gets -F.
    fn accumulate_pairs(&self, bodies: &[Body], out: &mut [Vector3<f64>]) -> Result<(), CoincidentPair> {
        for f in out.iter_mut() {
            *f = Vector3::zeros();
        }
        let n = bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let f = self
                    .pair_force(&bodies[i], &bodies[j])
                    .ok_or(CoincidentPair { first: i, second: j })?;
                out[i] += f;
                out[j] -= f;
            }
        }
        Ok(())
    }

    // One row per worker, summed over j in a fixed order so reruns are bit-identical.
    // Every row runs to the end so the smallest failing pair wins, as in `accumulate_pairs`.
    #[cfg(feature = "parallel")]
    fn accumulate_rows(&self, bodies: &[Body], out: &mut [Vector3<f64>]) -> Result<(), CoincidentPair> {
        use rayon::prelude::*;
        let worst = out
            .par_iter_mut()
            .enumerate()
            .filter_map(|(i, f)| {
                let mut acc = Vector3::zeros();
                for (j, bj) in bodies.iter().enumerate() {
                    if j == i {
                        continue;
                    }
                    match self.pair_force(&bodies[i], bj) {
                        Some(fij) => acc += fij,
                        None => return Some(CoincidentPair::new(i, j)),
                    }
                }
                *f = acc;
                None
            })
            .min();
        match worst {
            Some(pair) => Err(pair),
            None => Ok(()),
        }
    }
}

impl ForceField for Gravity {
    fn force_all(&self, bodies: &[Body], out: &mut [Vector3<f64>]) -> Result<(), CoincidentPair> {
        debug_assert_eq!(bodies.len(), out.len());
        #[cfg(feature = "parallel")]
        if bodies.len() >= PARALLEL_MIN_BODIES {
            return self.accumulate_rows(bodies, out);
        }
        self.accumulate_pairs(bodies, out)
    }
}

/// Net force on every body, indexed like `state.bodies()`.
pub fn compute_all_forces(state: &SimulationState, gravity: &Gravity) -> Result<Vec<Vector3<f64>>, SimError> {
    let mut out = vec![Vector3::zeros(); state.len()];
    gravity
        .force_all(state.bodies(), &mut out)
        .map_err(|pair| state.coincident(pair, state.completed_steps() + 1))?;
    Ok(out)
}
