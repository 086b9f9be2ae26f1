//! Trait values carried by genes.
//!
//! A [`TraitValue`] is a closed sum over the four trait kinds. The kind of a
//! trait slot never changes once the slot exists, so every operation that
//! combines two values first checks that their [`TraitKind`]s agree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The discriminant shared by trait values and trait specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitKind {
    /// Signed integer trait.
    Int,
    /// Boolean trait.
    Bool,
    /// Real-valued trait.
    Real,
    /// Text trait drawn from a weighted candidate set.
    Text,
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Real => "real",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// The value of one named trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitValue {
    /// Bounded integer.
    Int(i64),
    /// Flag, flipped by mutation.
    Bool(bool),
    /// Bounded real.
    Real(f64),
    /// One of a spec's weighted candidates.
    Text(String),
}

impl TraitValue {
    /// The active kind of this value.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TraitKind {
        match self {
            Self::Int(_) => TraitKind::Int,
            Self::Bool(_) => TraitKind::Bool,
            Self::Real(_) => TraitKind::Real,
            Self::Text(_) => TraitKind::Text,
        }
    }

    /// The integer, if this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The flag, if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The real, if this is a `Real`.
    #[must_use]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// The string, if this is a `Text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for TraitValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for TraitValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for TraitValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for TraitValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for TraitValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
