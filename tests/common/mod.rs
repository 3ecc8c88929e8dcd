#![allow(dead_code)]

use gravsim::BodyConfig;
use nalgebra::Vector3;

/// Two equal masses mirrored through the origin, moving in opposite
/// directions perpendicular to their separation.
pub fn mirrored_pair(mass: f64, half_separation: f64, speed: f64) -> Vec<BodyConfig> {
    vec![
        BodyConfig::new("east", mass, [half_separation, 0.0, 0.0], [0.0, speed, 0.0]),
        BodyConfig::new("west", mass, [-half_separation, 0.0, 0.0], [0.0, -speed, 0.0]),
    ]
}

pub fn is_finite(v: &Vector3<f64>) -> bool {
    v.iter().all(|c| c.is_finite())
}
