//! Declarative trait specs.
//!
//! A [`TraitSpec`] describes how one named trait is drawn and mutated. Specs
//! are gathered into a [`TraitSpecTable`], which validates every entry on the
//! way in so that initialization and mutation never see a malformed spec.
//!
//! In TOML the kind is selected by the `type` key:
//!
//! ```toml
//! [gain]
//! type = "real"
//! min = 0.0
//! max = 2.0
//! mutation_probability = 0.2
//! replace_probability = 0.1
//! perturb_power = 0.05
//!
//! [shape]
//! type = "text"
//! candidates = ["round", "square"]
//! weights = [3.0, 1.0]
//! ```

use std::collections::BTreeMap;

use rand::distr::weighted::WeightedIndex;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SpecViolation, TraitError};
use crate::rng::TraitRng;
use crate::value::TraitKind;

fn default_importance() -> f64 {
    1.0
}

fn default_text_mutation_probability() -> f64 {
    1.0
}

fn check_finite(field: &'static str, value: f64) -> Result<(), SpecViolation> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SpecViolation::NotFinite { field, value })
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), SpecViolation> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SpecViolation::ProbabilityOutOfRange { field, value })
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), SpecViolation> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(SpecViolation::Negative { field, value });
    }
    Ok(())
}

/// Parameters for an integer trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntTraitSpec {
    /// Inclusive lower bound.
    pub min: i64,
    /// Inclusive upper bound.
    pub max: i64,
    /// Chance that a mutation pass touches this trait.
    pub mutation_probability: f64,
    /// Chance that a triggered mutation redraws instead of perturbing.
    pub replace_probability: f64,
    /// Largest step a perturbation may take in either direction.
    pub perturb_power: i64,
    /// Weight of this trait's distance when distances are aggregated.
    #[serde(default = "default_importance")]
    pub importance: f64,
}

impl IntTraitSpec {
    pub fn validate(&self) -> Result<(), SpecViolation> {
        if self.min > self.max {
            return Err(SpecViolation::EmptyRange {
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        check_probability("mutation_probability", self.mutation_probability)?;
        check_probability("replace_probability", self.replace_probability)?;
        check_non_negative("perturb_power", self.perturb_power as f64)?;
        check_non_negative("importance", self.importance)
    }
}

/// Parameters for a boolean trait.
///
/// A triggered mutation always flips the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolTraitSpec {
    pub mutation_probability: f64,
    #[serde(default = "default_importance")]
    pub importance: f64,
}

impl BoolTraitSpec {
    pub fn validate(&self) -> Result<(), SpecViolation> {
        check_probability("mutation_probability", self.mutation_probability)?;
        check_non_negative("importance", self.importance)
    }
}

/// Parameters for a real-valued trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealTraitSpec {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    pub mutation_probability: f64,
    pub replace_probability: f64,
    /// Scale of the symmetric noise added by a perturbation.
    pub perturb_power: f64,
    #[serde(default = "default_importance")]
    pub importance: f64,
}

impl RealTraitSpec {
    pub fn validate(&self) -> Result<(), SpecViolation> {
        check_finite("min", self.min)?;
        check_finite("max", self.max)?;
        if self.min > self.max {
            return Err(SpecViolation::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        check_probability("mutation_probability", self.mutation_probability)?;
        check_probability("replace_probability", self.replace_probability)?;
        check_non_negative("perturb_power", self.perturb_power)?;
        check_non_negative("importance", self.importance)
    }
}

/// Serialized shape of a [`TextTraitSpec`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TextTraitSpecDef {
    candidates: Vec<String>,
    weights: Vec<f64>,
    #[serde(default = "default_text_mutation_probability")]
    mutation_probability: f64,
    #[serde(default = "default_importance")]
    importance: f64,
}

/// Parameters for a text trait drawn from a weighted candidate set.
///
/// Fields are private: a `TextTraitSpec` can only exist with matching
/// candidate/weight lengths, at least one positive weight and a finite weight
/// total, and it caches the roulette selector built from those weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TextTraitSpecDef", into = "TextTraitSpecDef")]
pub struct TextTraitSpec {
    candidates: Vec<String>,
    weights: Vec<f64>,
    mutation_probability: f64,
    importance: f64,
    selector: WeightedIndex<f64>,
}

impl TextTraitSpec {
    /// Build a text spec that redraws on every mutation pass.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecViolation`] if the lengths differ, a weight is
    /// negative or non-finite, no weight is positive, or the weights sum to
    /// more than `f64::MAX`.
    pub fn new<S: Into<String>>(
        candidates: impl IntoIterator<Item = S>,
        weights: impl IntoIterator<Item = f64>,
    ) -> Result<Self, SpecViolation> {
        Self::try_from(TextTraitSpecDef {
            candidates: candidates.into_iter().map(Into::into).collect(),
            weights: weights.into_iter().collect(),
            mutation_probability: default_text_mutation_probability(),
            importance: default_importance(),
        })
    }

    /// Set the chance that a mutation pass redraws this trait.
    ///
    /// # Errors
    ///
    /// Returns [`SpecViolation::ProbabilityOutOfRange`] outside `[0, 1]`.
    pub fn with_mutation_probability(mut self, probability: f64) -> Result<Self, SpecViolation> {
        check_probability("mutation_probability", probability)?;
        self.mutation_probability = probability;
        Ok(self)
    }

    /// Set the distance weight of this trait.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecViolation`] if `importance` is negative or non-finite.
    pub fn with_importance(mut self, importance: f64) -> Result<Self, SpecViolation> {
        check_non_negative("importance", importance)?;
        self.importance = importance;
        Ok(self)
    }

    /// Candidate strings, in declaration order.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Selection weights, parallel to [`candidates`](Self::candidates).
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Chance that a mutation pass redraws this trait.
    #[must_use]
    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    /// Weight of this trait's distance when distances are aggregated.
    #[must_use]
    pub fn importance(&self) -> f64 {
        self.importance
    }

    /// Roulette-select one candidate.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.candidates[rng.roulette(&self.selector)]
    }
}

impl TryFrom<TextTraitSpecDef> for TextTraitSpec {
    type Error = SpecViolation;

    fn try_from(def: TextTraitSpecDef) -> Result<Self, Self::Error> {
        if def.candidates.len() != def.weights.len() {
            return Err(SpecViolation::WeightCountMismatch {
                candidates: def.candidates.len(),
                weights: def.weights.len(),
            });
        }
        for &w in &def.weights {
            check_non_negative("weights", w)?;
        }
        if !def.weights.iter().any(|&w| w > 0.0) {
            return Err(SpecViolation::NoPositiveWeight);
        }
        let total: f64 = def.weights.iter().sum();
        check_finite("weights", total)?;
        check_probability("mutation_probability", def.mutation_probability)?;
        check_non_negative("importance", def.importance)?;

        let selector = WeightedIndex::new(def.weights.iter().copied())
            .map_err(|e| SpecViolation::Weights(e.to_string()))?;

        Ok(Self {
            candidates: def.candidates,
            weights: def.weights,
            mutation_probability: def.mutation_probability,
            importance: def.importance,
            selector,
        })
    }
}

impl From<TextTraitSpec> for TextTraitSpecDef {
    fn from(spec: TextTraitSpec) -> Self {
        Self {
            candidates: spec.candidates,
            weights: spec.weights,
            mutation_probability: spec.mutation_probability,
            importance: spec.importance,
        }
    }
}

/// How one named trait is generated and mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraitSpec {
    Int(IntTraitSpec),
    Bool(BoolTraitSpec),
    Real(RealTraitSpec),
    Text(TextTraitSpec),
}

impl TraitSpec {
    /// The kind of value this spec produces.
    #[must_use]
    pub fn kind(&self) -> TraitKind {
        match self {
            Self::Int(_) => TraitKind::Int,
            Self::Bool(_) => TraitKind::Bool,
            Self::Real(_) => TraitKind::Real,
            Self::Text(_) => TraitKind::Text,
        }
    }

    /// Chance that a mutation pass touches this trait.
    #[must_use]
    pub fn mutation_probability(&self) -> f64 {
        match self {
            Self::Int(s) => s.mutation_probability,
            Self::Bool(s) => s.mutation_probability,
            Self::Real(s) => s.mutation_probability,
            Self::Text(s) => s.mutation_probability(),
        }
    }

    /// Distance weight of this trait.
    #[must_use]
    pub fn importance(&self) -> f64 {
        match self {
            Self::Int(s) => s.importance,
            Self::Bool(s) => s.importance,
            Self::Real(s) => s.importance,
            Self::Text(s) => s.importance(),
        }
    }

    /// Check the spec's invariants.
    ///
    /// Text specs are validated at construction, so they always pass.
    pub fn validate(&self) -> Result<(), SpecViolation> {
        match self {
            Self::Int(s) => s.validate(),
            Self::Bool(s) => s.validate(),
            Self::Real(s) => s.validate(),
            Self::Text(_) => Ok(()),
        }
    }
}

impl From<IntTraitSpec> for TraitSpec {
    fn from(spec: IntTraitSpec) -> Self {
        Self::Int(spec)
    }
}

impl From<BoolTraitSpec> for TraitSpec {
    fn from(spec: BoolTraitSpec) -> Self {
        Self::Bool(spec)
    }
}

impl From<RealTraitSpec> for TraitSpec {
    fn from(spec: RealTraitSpec) -> Self {
        Self::Real(spec)
    }
}

impl From<TextTraitSpec> for TraitSpec {
    fn from(spec: TextTraitSpec) -> Self {
        Self::Text(spec)
    }
}

/// Validated mapping from trait name to [`TraitSpec`].
///
/// Iteration is in lexicographic name order, which fixes the order in which
/// random numbers are consumed during initialization and mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, TraitSpec>",
    into = "BTreeMap<String, TraitSpec>"
)]
pub struct TraitSpecTable {
    specs: BTreeMap<String, TraitSpec>,
}

impl TraitSpecTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert a spec, returning the spec it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::InvalidSpec`] if the spec breaks an invariant.
    /// The table is left unchanged in that case.
    pub fn insert<S, T>(&mut self, name: S, spec: T) -> Result<Option<TraitSpec>, TraitError>
    where
        S: Into<String>,
        T: Into<TraitSpec>,
    {
        let name = name.into();
        let spec = spec.into();
        if let Err(violation) = spec.validate() {
            return Err(TraitError::invalid_spec(name, violation));
        }
        Ok(self.specs.insert(name, spec))
    }

    /// Builder-style [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::InvalidSpec`] if the spec breaks an invariant.
    pub fn with<S, T>(mut self, name: S, spec: T) -> Result<Self, TraitError>
    where
        S: Into<String>,
        T: Into<TraitSpec>,
    {
        self.insert(name, spec)?;
        Ok(self)
    }

    /// Remove a spec, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<TraitSpec> {
        self.specs.remove(name)
    }

    /// Look up the spec for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TraitSpec> {
        self.specs.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Iterate specs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TraitSpec)> {
        self.specs.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Number of specs in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl TryFrom<BTreeMap<String, TraitSpec>> for TraitSpecTable {
    type Error = TraitError;

    fn try_from(specs: BTreeMap<String, TraitSpec>) -> Result<Self, Self::Error> {
        for (name, spec) in &specs {
            spec.validate()
                .map_err(|violation| TraitError::invalid_spec(name.clone(), violation))?;
        }
        Ok(Self { specs })
    }
}

impl From<TraitSpecTable> for BTreeMap<String, TraitSpec> {
    fn from(table: TraitSpecTable) -> Self {
        table.specs
    }
}
