use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::sim::BodyConfig;

pub const SCENARIO_THREE_BODY: &str = "three-body";
pub const SCENARIO_BINARY: &str = "binary";
pub const SCENARIO_FIGURE_EIGHT: &str = "figure-eight";

// Chenciner & Montgomery (2000), G = m = 1.
const FIGURE_EIGHT_X: [f64; 3] = [0.97000436, -0.24308753, 0.0];
const FIGURE_EIGHT_V3: [f64; 3] = [-0.93240737, -0.86473146, 0.0];
const FIGURE_EIGHT_PERIOD: f64 = 6.32591398;
const FIGURE_EIGHT_DT: f64 = 0.001;

pub struct ScenarioInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub fn scenario_catalog() -> &'static [ScenarioInfo] {
    &[
        ScenarioInfo {
            id: SCENARIO_THREE_BODY,
            name: "Three bodies",
            description: "Three unit masses, two counter-rotating in the plane and one kicked out of it.",
        },
        ScenarioInfo {
            id: SCENARIO_BINARY,
            name: "Equal-mass binary",
            description: "Two unit masses on a circular orbit about their barycentre.",
        },
        ScenarioInfo {
            id: SCENARIO_FIGURE_EIGHT,
            name: "Figure-eight",
            description: "Periodic three-body choreography tracing a figure eight, one period.",
        },
    ]
}

pub fn scenario_config(id: &str) -> Result<SimulationConfig, SimError> {
    match id {
        SCENARIO_THREE_BODY => Ok(three_body()),
        SCENARIO_BINARY => Ok(binary()),
        SCENARIO_FIGURE_EIGHT => Ok(figure_eight()),
        _ => Err(SimError::UnknownScenario(id.to_string())),
    }
}

pub fn three_body() -> SimulationConfig {
    SimulationConfig::new(vec![
        BodyConfig::new("body1", 1.0, [1.0, 0.0, 0.0], [0.0, 0.5, 0.0]).with_color("red"),
        BodyConfig::new("body2", 1.0, [-1.0, 0.0, 0.0], [0.0, -0.5, 0.0]).with_color("white"),
        BodyConfig::new("body3", 1.0, [0.0, 1.0, 0.0], [-0.5, 0.0, 0.5]).with_color("blue"),
    ])
}

/// Separation 2, so v = sqrt(G m / 4) keeps each body on the unit circle.
pub fn binary() -> SimulationConfig {
    let mut cfg = SimulationConfig::new(vec![
        BodyConfig::new("primary", 1.0, [1.0, 0.0, 0.0], [0.0, 0.5, 0.0]).with_color("yellow"),
        BodyConfig::new("secondary", 1.0, [-1.0, 0.0, 0.0], [0.0, -0.5, 0.0]).with_color("cyan"),
    ]);
    // one orbit: 2π r / v
    cfg.steps = (2.0 * std::f64::consts::PI / 0.5 / cfg.dt).round() as usize;
    cfg
}

pub fn figure_eight() -> SimulationConfig {
    let [x, y, z] = FIGURE_EIGHT_X;
    let [vx, vy, vz] = FIGURE_EIGHT_V3;
    let mut cfg = SimulationConfig::new(vec![
        BodyConfig::new("a", 1.0, [x, y, z], [-vx / 2.0, -vy / 2.0, -vz / 2.0]).with_color("red"),
        BodyConfig::new("b", 1.0, [-x, -y, -z], [-vx / 2.0, -vy / 2.0, -vz / 2.0]).with_color("white"),
        BodyConfig::new("c", 1.0, [0.0, 0.0, 0.0], [vx, vy, vz]).with_color("blue"),
    ]);
    cfg.dt = FIGURE_EIGHT_DT;
    cfg.steps = (FIGURE_EIGHT_PERIOD / FIGURE_EIGHT_DT).round() as usize;
    cfg
}
