use std::error::Error;
use std::fmt;

/// Errors raised synchronously by the simulation core. A failing operation
/// aborts the current step; nothing is retried or recovered internally.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Normalization or division of a zero-magnitude vector/quaternion.
    ZeroMagnitude,
    /// A matrix passed to quaternion conversion failed the `M·Mᵗ = I` check.
    NonOrthogonalMatrix { trace_error: f64 },
    /// A body was stepped or configured with a zero or negative mass.
    NonPositiveMass(f64),
    /// The inertia tensor could not be inverted.
    SingularInertia,
    /// Spacecraft index outside the world's body table.
    BodyIndexOutOfRange { index: usize, len: usize },
    /// A recorded observable name that no accessor resolves.
    UnknownObservable(String),
    /// Calendar instant rejected by the epoch bookkeeping.
    InvalidEpoch(String),
}

pub type SimResult<T> = Result<T, SimError>;

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ZeroMagnitude => write!(f, "cannot normalize a zero-magnitude value"),
            SimError::NonOrthogonalMatrix { trace_error } => {
                write!(f, "matrix is not orthogonal (|trace - 3| = {})", trace_error)
            }
            SimError::NonPositiveMass(m) => write!(f, "mass must be positive, got {}", m),
            SimError::SingularInertia => write!(f, "inertia tensor is singular"),
            SimError::BodyIndexOutOfRange { index, len } => {
                write!(f, "spacecraft index {} out of range, world holds {}", index, len)
            }
            SimError::UnknownObservable(name) => write!(f, "unknown observable '{}'", name),
            SimError::InvalidEpoch(msg) => write!(f, "invalid epoch: {}", msg),
        }
    }
}

impl Error for SimError {}

impl From<hifitime::Errors> for SimError {
    fn from(err: hifitime::Errors) -> Self {
        SimError::InvalidEpoch(err.to_string())
    }
}
