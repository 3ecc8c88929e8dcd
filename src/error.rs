use std::fmt;

/// Everything that can stop a run, from bad input to a singular force.
#[derive(Debug)]
pub enum SimError {
    NoBodies,
    InvalidMass { body: String, mass: f64 },
    NonFiniteBody { body: String },
    DuplicateName(String),
    InvalidTimeStep(f64),
    InvalidStepCount(usize),
    InvalidGravitationalConstant(f64),
    InvalidSoftening(f64),
    UnknownScenario(String),
    UnknownBody(String),
    /// Two bodies share a position at `step` (1-based) and no softening is set.
    CoincidentBodies { first: String, second: String, step: usize },
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
}

impl SimError {
    /// True for input problems caught before the first step.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SimError::NoBodies
                | SimError::InvalidMass { .. }
                | SimError::NonFiniteBody { .. }
                | SimError::DuplicateName(_)
                | SimError::InvalidTimeStep(_)
                | SimError::InvalidStepCount(_)
                | SimError::InvalidGravitationalConstant(_)
                | SimError::InvalidSoftening(_)
                | SimError::UnknownScenario(_)
        )
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NoBodies => write!(f, "simulation needs at least one body"),
            SimError::InvalidMass { body, mass } => {
                write!(f, "body '{}' has non-positive mass {}", body, mass)
            }
            SimError::NonFiniteBody { body } => {
                write!(f, "body '{}' has a non-finite position, velocity or mass", body)
            }
            SimError::DuplicateName(name) => write!(f, "body name '{}' is used more than once", name),
            SimError::InvalidTimeStep(dt) => write!(f, "time step must be finite and positive, got {}", dt),
            SimError::InvalidStepCount(steps) => write!(f, "step count must be at least 1, got {}", steps),
            SimError::InvalidGravitationalConstant(g) => {
                write!(f, "gravitational constant must be finite and positive, got {}", g)
            }
            SimError::InvalidSoftening(eps) => {
                write!(f, "softening length must be finite and non-negative, got {}", eps)
            }
            SimError::UnknownScenario(id) => write!(f, "unknown scenario id '{}'", id),
            SimError::UnknownBody(name) => write!(f, "no body named '{}'", name),
            SimError::CoincidentBodies { first, second, step } => write!(
                f,
                "bodies '{}' and '{}' coincide at step {}; force direction is undefined",
                first, second, step
            ),
            SimError::Io(e) => write!(f, "i/o error: {}", e),
            SimError::Json(e) => write!(f, "json error: {}", e),
            SimError::Csv(e) => write!(f, "csv error: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Json(e) => Some(e),
            SimError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Json(e)
    }
}

impl From<csv::Error> for SimError {
    fn from(e: csv::Error) -> Self {
        SimError::Csv(e)
    }
}
