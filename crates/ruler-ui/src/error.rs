use crate::engine::ScrollPhase;

/// Errors reported by the scale engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    /// The range or fling configuration was rejected; the previous one stays active.
    InvalidConfiguration { reason: &'static str },
    /// An input arrived in a phase that cannot accept it. Nothing was changed.
    ProtocolViolation {
        operation: &'static str,
        phase: ScrollPhase,
    },
}

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            ScaleError::ProtocolViolation { operation, phase } => {
                write!(f, "{operation} is not valid while {phase:?}")
            }
        }
    }
}

impl std::error::Error for ScaleError {}
