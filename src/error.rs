//! Error types for trait configuration and trait operations.

use thiserror::Error;

use crate::value::TraitKind;

/// A single broken invariant in a trait spec.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecViolation {
    /// Lower bound is above the upper bound.
    #[error("min ({min}) must be <= max ({max})")]
    EmptyRange { min: f64, max: f64 },

    /// A probability lies outside `[0, 1]`.
    #[error("{field} must be between 0.0 and 1.0, got: {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    /// A numeric parameter is NaN or infinite.
    #[error("{field} must be finite, got: {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// A magnitude parameter is negative.
    #[error("{field} must be non-negative, got: {value}")]
    Negative { field: &'static str, value: f64 },

    /// Text candidates and weights have different lengths.
    #[error("{candidates} candidates but {weights} weights")]
    WeightCountMismatch { candidates: usize, weights: usize },

    /// Text weights contain no positive entry.
    #[error("at least one selection weight must be positive")]
    NoPositiveWeight,

    /// The weighted selector rejected the weights.
    #[error("invalid selection weights: {0}")]
    Weights(String),
}

/// Main error type for symbios-genes operations.
#[derive(Error, Debug)]
pub enum TraitError {
    /// The same trait name carries different kinds in two operands.
    ///
    /// This is a configuration error: a trait name must map to one kind
    /// across the whole population.
    #[error("trait '{name}' kind mismatch: {local} vs {partner}")]
    KindMismatch {
        name: String,
        local: TraitKind,
        partner: TraitKind,
    },

    /// A trait spec failed validation.
    #[error("invalid spec for trait '{name}': {source}")]
    InvalidSpec {
        name: String,
        #[source]
        source: SpecViolation,
    },

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for symbios-genes operations.
pub type Result<T> = std::result::Result<T, TraitError>;

impl TraitError {
    /// Creates a new invalid-spec error for the named trait.
    #[must_use]
    pub fn invalid_spec<S: Into<String>>(name: S, source: SpecViolation) -> Self {
        Self::InvalidSpec {
            name: name.into(),
            source,
        }
    }
}
