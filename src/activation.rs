//! Activation-function selectors carried by node genes.
//!
//! This crate only records which function a node uses together with its
//! parameters; evaluating the network is left to the phenotype layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Activation function types a [`NodeGene`](crate::NodeGene) can select.
///
/// "Signed" variants map into `[-1, 1]`, "unsigned" variants into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// Signed sigmoid - blurred cutting plane
    SignedSigmoid,
    /// Unsigned sigmoid (the node default)
    #[default]
    UnsignedSigmoid,
    /// Hyperbolic tangent
    Tanh,
    /// Cubic approximation of tanh
    TanhCubic,
    /// Signed threshold - cutting plane
    SignedStep,
    /// Unsigned threshold (0 or 1)
    UnsignedStep,
    /// Signed Gaussian - symmetry
    SignedGauss,
    /// Unsigned Gaussian
    UnsignedGauss,
    /// Absolute value |x|
    Abs,
    /// Signed sine - smooth repetition
    SignedSine,
    /// Unsigned sine
    UnsignedSine,
    /// Linear f(x) = x
    Linear,
    /// Rectified linear unit
    Relu,
    /// Smooth rectifier ln(1 + e^x)
    Softplus,
}

impl ActivationFunction {
    /// All available activation functions.
    pub const ALL: [Self; 14] = [
        Self::SignedSigmoid,
        Self::UnsignedSigmoid,
        Self::Tanh,
        Self::TanhCubic,
        Self::SignedStep,
        Self::UnsignedStep,
        Self::SignedGauss,
        Self::UnsignedGauss,
        Self::Abs,
        Self::SignedSine,
        Self::UnsignedSine,
        Self::Linear,
        Self::Relu,
        Self::Softplus,
    ];

    /// Configuration name of this function, as used in serialized form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SignedSigmoid => "signed_sigmoid",
            Self::UnsignedSigmoid => "unsigned_sigmoid",
            Self::Tanh => "tanh",
            Self::TanhCubic => "tanh_cubic",
            Self::SignedStep => "signed_step",
            Self::UnsignedStep => "unsigned_step",
            Self::SignedGauss => "signed_gauss",
            Self::UnsignedGauss => "unsigned_gauss",
            Self::Abs => "abs",
            Self::SignedSine => "signed_sine",
            Self::UnsignedSine => "unsigned_sine",
            Self::Linear => "linear",
            Self::Relu => "relu",
            Self::Softplus => "softplus",
        }
    }

    /// Look up a function by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
