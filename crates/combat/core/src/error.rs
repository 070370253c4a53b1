//! Error infrastructure for combat-core.
//!
//! The damage pipeline never fails: invalid targets are silent no-ops and
//! non-finite vectors only skip the knockback sub-step. Errors exist at the
//! configuration boundary, where a bad tunable must be rejected before it can
//! reach the engine.

/// Severity level of an error, used for categorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: negative damage scale, vampiric percentile above 1.
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
        }
    }
}

/// Common trait for all combat-core errors.
///
/// Use `#[derive(thiserror::Error)]` for the Display/Error impl.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Rejected [`CombatConfig`](crate::CombatConfig) values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A scale or multiplier is negative or not a finite number.
    #[error("{field} must be a finite non-negative number, got {value}")]
    InvalidScale { field: &'static str, value: f32 },

    /// A fraction is outside `[0, 1]`.
    #[error("{field} must be within [0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f32 },

    /// A ceiling or divisor must be strictly positive.
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// Power armor must absorb at least one point per cell.
    #[error("{field} must absorb at least one point per cell")]
    ZeroPerCell { field: &'static str },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            InvalidScale { .. } => "CONFIG_INVALID_SCALE",
            FractionOutOfRange { .. } => "CONFIG_FRACTION_OUT_OF_RANGE",
            NotPositive { .. } => "CONFIG_NOT_POSITIVE",
            ZeroPerCell { .. } => "CONFIG_ZERO_PER_CELL",
        }
    }
}
