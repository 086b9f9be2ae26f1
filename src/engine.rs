//! The trait engine: named, typed, evolvable values attached to a gene.
//!
//! [`TraitEngine`] owns a sorted map from trait name to [`TraitValue`] and
//! implements the four operations the evolutionary loop drives:
//!
//! - [`initialize`](TraitEngine::initialize): draw every trait from a [`TraitSpecTable`]
//! - [`mutate`](TraitEngine::mutate): perturb or replace traits in place
//! - [`mate`](TraitEngine::mate): merge a partner's traits into this one
//! - [`distance`](TraitEngine::distance): per-trait dissimilarity for speciation
//!
//! All randomness comes from the caller's generator, so a seeded generator
//! and a fixed call order reproduce the same traits exactly.
//!
//! Names present on only one side are skipped by Mutate, Mate and Distance.
//! A name present on both sides with different kinds is a
//! [`TraitError::KindMismatch`].

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{Result, TraitError};
use crate::rng::{rescale, TraitRng};
use crate::spec::{IntTraitSpec, RealTraitSpec, TraitSpec, TraitSpecTable};
use crate::value::TraitValue;

/// Named trait values owned by a single gene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitEngine {
    traits: BTreeMap<String, TraitValue>,
}

impl TraitEngine {
    /// Create an engine with no traits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value of trait `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TraitValue> {
        self.traits.get(name)
    }

    /// Store a value, returning the one it replaced.
    ///
    /// This does not check kinds: an existing slot may be overwritten with a
    /// value of a different kind. It is meant for restoring traits from
    /// storage or seeding them in tests, and callers must keep each name's
    /// kind stable themselves. Use [`set`](Self::set) to have that enforced.
    pub fn insert<S, V>(&mut self, name: S, value: V) -> Option<TraitValue>
    where
        S: Into<String>,
        V: Into<TraitValue>,
    {
        self.traits.insert(name.into(), value.into())
    }

    /// Store a value, refusing to change the kind of an existing slot.
    ///
    /// New names are accepted with any kind.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::KindMismatch`] if `name` already holds a value
    /// of another kind. The engine is left unchanged in that case.
    pub fn set<S, V>(&mut self, name: S, value: V) -> Result<Option<TraitValue>>
    where
        S: Into<String>,
        V: Into<TraitValue>,
    {
        let name = name.into();
        let value = value.into();
        if let Some(current) = self.traits.get(&name) {
            if current.kind() != value.kind() {
                return Err(TraitError::KindMismatch {
                    name,
                    local: current.kind(),
                    partner: value.kind(),
                });
            }
        }
        Ok(self.traits.insert(name, value))
    }

    /// Remove a trait, returning its value if present.
    pub fn remove(&mut self, name: &str) -> Option<TraitValue> {
        self.traits.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.traits.contains_key(name)
    }

    /// Iterate traits in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TraitValue)> {
        self.traits.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of traits held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.traits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    /// Replace all traits with fresh draws from `specs`.
    ///
    /// - Int: uniform in `[min, max]`
    /// - Bool: `true` with probability 0.5
    /// - Real: uniform in `[0, 1)` rescaled to `[min, max]`
    /// - Text: roulette over the candidate weights
    pub fn initialize<R: Rng + ?Sized>(&mut self, specs: &TraitSpecTable, rng: &mut R) {
        self.traits.clear();
        for (name, spec) in specs.iter() {
            let value = draw(spec, rng);
            self.traits.insert(name.to_owned(), value);
        }
    }

    /// Mutate traits in place according to `specs`.
    ///
    /// Each trait is considered independently and mutated with its spec's
    /// `mutation_probability`. Traits missing from this engine are skipped, as
    /// are traits whose stored kind disagrees with the spec (logged at warn
    /// level). Neither case draws from `rng`.
    ///
    /// Text traits are redrawn by roulette and may land on the same value.
    pub fn mutate<R: Rng + ?Sized>(&mut self, specs: &TraitSpecTable, rng: &mut R) {
        for (name, spec) in specs.iter() {
            let Some(current) = self.traits.get_mut(name) else {
                continue;
            };
            if current.kind() != spec.kind() {
                warn!(
                    trait_name = name,
                    stored = %current.kind(),
                    configured = %spec.kind(),
                    "skipping mutation of trait with mismatched kind"
                );
                continue;
            }
            if rng.unit() >= spec.mutation_probability() {
                continue;
            }

            match (spec, &mut *current) {
                (TraitSpec::Int(s), TraitValue::Int(v)) => *v = mutate_int(*v, s, rng),
                (TraitSpec::Bool(_), TraitValue::Bool(v)) => *v = !*v,
                (TraitSpec::Real(s), TraitValue::Real(v)) => *v = mutate_real(*v, s, rng),
                (TraitSpec::Text(s), TraitValue::Text(v)) => s.pick(rng).clone_into(v),
                // kinds compared above
                _ => continue,
            }
            trace!(trait_name = name, value = %current, "mutated trait");
        }
    }

    /// Merge `partner`'s traits into this engine.
    ///
    /// For every name both engines carry, the child keeps one parent's value
    /// verbatim half of the time. The other half it averages: integers take
    /// the truncated mean, reals the arithmetic mean, and booleans and text
    /// fall back to a 50/50 pick. `partner` is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::KindMismatch`] if a shared name has different
    /// kinds. Kinds are checked before anything is written, so on error this
    /// engine is unchanged and `rng` has not been advanced.
    pub fn mate<R: Rng + ?Sized>(&mut self, partner: &TraitEngine, rng: &mut R) -> Result<()> {
        for (name, yours) in &partner.traits {
            if let Some(mine) = self.traits.get(name) {
                check_kinds(name, mine, yours)?;
            }
        }

        for (name, yours) in &partner.traits {
            let Some(mine) = self.traits.get_mut(name) else {
                continue;
            };
            let child = if rng.unit() < 0.5 {
                pick_either(mine, yours, rng)
            } else {
                blend(mine, yours, rng)
            };
            *mine = child;
        }
        Ok(())
    }

    /// Per-trait distance to `other`, over the names `other` carries.
    ///
    /// Int and Real traits give the absolute difference; Bool and Text give
    /// `0.0` when equal and `1.0` otherwise. Names only this engine carries
    /// are ignored, so the result is not symmetric in general.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::KindMismatch`] if a shared name has different kinds.
    pub fn distance(&self, other: &TraitEngine) -> Result<TraitDistances> {
        let mut distances = BTreeMap::new();
        for (name, yours) in &other.traits {
            let Some(mine) = self.traits.get(name) else {
                continue;
            };
            let d = match (mine, yours) {
                (TraitValue::Int(a), TraitValue::Int(b)) => a.abs_diff(*b) as f64,
                (TraitValue::Real(a), TraitValue::Real(b)) => (a - b).abs(),
                (TraitValue::Bool(a), TraitValue::Bool(b)) => mismatch_score(a == b),
                (TraitValue::Text(a), TraitValue::Text(b)) => mismatch_score(a == b),
                _ => return Err(kind_mismatch(name, mine, yours)),
            };
            distances.insert(name.clone(), d);
        }
        Ok(TraitDistances { distances })
    }
}

/// Per-trait distances produced by [`TraitEngine::distance`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitDistances {
    distances: BTreeMap<String, f64>,
}

impl TraitDistances {
    /// Distance for trait `name`, if it was compared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.distances.get(name).copied()
    }

    /// Iterate distances in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.distances.iter().map(|(name, &d)| (name.as_str(), d))
    }

    /// Number of traits compared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Unweighted sum of all distances.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.distances.values().sum()
    }

    /// Sum of `distance * importance`, using each trait's spec.
    ///
    /// Distances whose name has no spec in `specs` contribute nothing.
    #[must_use]
    pub fn weighted_total(&self, specs: &TraitSpecTable) -> f64 {
        self.distances
            .iter()
            .filter_map(|(name, d)| specs.get(name).map(|spec| d * spec.importance()))
            .sum()
    }
}

impl From<TraitDistances> for BTreeMap<String, f64> {
    fn from(distances: TraitDistances) -> Self {
        distances.distances
    }
}

fn draw<R: Rng + ?Sized>(spec: &TraitSpec, rng: &mut R) -> TraitValue {
    match spec {
        TraitSpec::Int(s) => TraitValue::Int(rng.int_inclusive(s.min, s.max)),
        TraitSpec::Bool(_) => TraitValue::Bool(rng.unit() < 0.5),
        TraitSpec::Real(s) => TraitValue::Real(draw_real(s, rng)),
        TraitSpec::Text(s) => TraitValue::Text(s.pick(rng).to_owned()),
    }
}

fn draw_real<R: Rng + ?Sized>(spec: &RealTraitSpec, rng: &mut R) -> f64 {
    rescale(rng.unit(), 0.0, 1.0, spec.min, spec.max).clamp(spec.min, spec.max)
}

fn mutate_int<R: Rng + ?Sized>(value: i64, spec: &IntTraitSpec, rng: &mut R) -> i64 {
    if rng.unit() < spec.replace_probability {
        rng.int_inclusive(spec.min, spec.max)
    } else {
        let step = rng.int_inclusive(-spec.perturb_power, spec.perturb_power);
        value.saturating_add(step).clamp(spec.min, spec.max)
    }
}

fn mutate_real<R: Rng + ?Sized>(value: f64, spec: &RealTraitSpec, rng: &mut R) -> f64 {
    if rng.unit() < spec.replace_probability {
        draw_real(spec, rng)
    } else {
        (value + rng.signed_unit() * spec.perturb_power).clamp(spec.min, spec.max)
    }
}

fn pick_either<R: Rng + ?Sized>(mine: &TraitValue, yours: &TraitValue, rng: &mut R) -> TraitValue {
    if rng.unit() < 0.5 {
        mine.clone()
    } else {
        yours.clone()
    }
}

fn blend<R: Rng + ?Sized>(mine: &TraitValue, yours: &TraitValue, rng: &mut R) -> TraitValue {
    match (mine, yours) {
        (TraitValue::Int(a), TraitValue::Int(b)) => TraitValue::Int(truncated_mean(*a, *b)),
        (TraitValue::Real(a), TraitValue::Real(b)) => TraitValue::Real((a + b) / 2.0),
        _ => pick_either(mine, yours, rng),
    }
}

/// Mean of two integers, rounded toward zero, without overflow.
fn truncated_mean(a: i64, b: i64) -> i64 {
    ((i128::from(a) + i128::from(b)) / 2) as i64
}

fn mismatch_score(equal: bool) -> f64 {
    if equal {
        0.0
    } else {
        1.0
    }
}

fn check_kinds(name: &str, mine: &TraitValue, yours: &TraitValue) -> Result<()> {
    if mine.kind() == yours.kind() {
        Ok(())
    } else {
        Err(kind_mismatch(name, mine, yours))
    }
}

fn kind_mismatch(name: &str, mine: &TraitValue, yours: &TraitValue) -> TraitError {
    TraitError::KindMismatch {
        name: name.to_owned(),
        local: mine.kind(),
        partner: yours.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{BoolTraitSpec, TextTraitSpec};
    use crate::value::TraitKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn int_spec(mutation_probability: f64, replace_probability: f64) -> IntTraitSpec {
        IntTraitSpec {
            min: 0,
            max: 10,
            mutation_probability,
            replace_probability,
            perturb_power: 3,
            importance: 1.0,
        }
    }

    fn real_spec(mutation_probability: f64, replace_probability: f64) -> RealTraitSpec {
        RealTraitSpec {
            min: -1.0,
            max: 1.0,
            mutation_probability,
            replace_probability,
            perturb_power: 0.5,
            importance: 1.0,
        }
    }

    fn full_table() -> TraitSpecTable {
        TraitSpecTable::new()
            .with("count", int_spec(1.0, 0.5))
            .unwrap()
            .with(
                "enabled",
                BoolTraitSpec {
                    mutation_probability: 1.0,
                    importance: 1.0,
                },
            )
            .unwrap()
            .with("gain", real_spec(1.0, 0.5))
            .unwrap()
            .with(
                "shape",
                TextTraitSpec::new(["round", "square", "spiky"], [1.0, 1.0, 2.0]).unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_initialize_draws_every_trait() {
        let specs = full_table();
        let mut engine = TraitEngine::new();
        engine.initialize(&specs, &mut test_rng());

        assert_eq!(engine.len(), 4);
        assert_eq!(engine.get("count").unwrap().kind(), TraitKind::Int);
        assert_eq!(engine.get("enabled").unwrap().kind(), TraitKind::Bool);
        assert_eq!(engine.get("gain").unwrap().kind(), TraitKind::Real);
        let shape = engine.get("shape").unwrap().as_text().unwrap();
        assert!(["round", "square", "spiky"].contains(&shape));
    }

    #[test]
    fn test_initialize_replaces_previous_traits() {
        let mut engine = TraitEngine::new();
        engine.insert("stale", 1i64);
        engine.insert("count", "wrong kind");

        engine.initialize(&full_table(), &mut test_rng());

        assert!(!engine.contains("stale"));
        assert_eq!(engine.get("count").unwrap().kind(), TraitKind::Int);
    }

    #[test]
    fn test_initialize_is_deterministic() {
        let specs = full_table();
        let mut a = TraitEngine::new();
        let mut b = TraitEngine::new();
        a.initialize(&specs, &mut ChaCha8Rng::seed_from_u64(9));
        b.initialize(&specs, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_initialize_degenerate_ranges() {
        let specs = TraitSpecTable::new()
            .with(
                "fixed_int",
                IntTraitSpec {
                    min: 4,
                    max: 4,
                    ..int_spec(0.0, 0.0)
                },
            )
            .unwrap()
            .with(
                "fixed_real",
                RealTraitSpec {
                    min: 0.25,
                    max: 0.25,
                    ..real_spec(0.0, 0.0)
                },
            )
            .unwrap();
        let mut engine = TraitEngine::new();
        engine.initialize(&specs, &mut test_rng());
        assert_eq!(engine.get("fixed_int"), Some(&TraitValue::Int(4)));
        assert_eq!(engine.get("fixed_real"), Some(&TraitValue::Real(0.25)));
    }

    #[test]
    fn test_real_draws_span_extreme_bounds() {
        let wide = RealTraitSpec {
            min: -1e308,
            max: 1e308,
            ..real_spec(1.0, 1.0)
        };
        let specs = TraitSpecTable::new().with("gain", wide).unwrap();
        let mut rng = test_rng();
        let mut engine = TraitEngine::new();

        let mut draws = Vec::new();
        for _ in 0..20 {
            engine.initialize(&specs, &mut rng);
            draws.push(engine.get("gain").unwrap().as_real().unwrap());
        }
        for _ in 0..20 {
            engine.mutate(&specs, &mut rng);
            draws.push(engine.get("gain").unwrap().as_real().unwrap());
        }

        assert!(draws.iter().all(|v| (-1e308..=1e308).contains(v)));
        assert!(draws.iter().any(|&v| v != draws[0]));
        assert!(draws.iter().any(|&v| v < 0.0));
        assert!(draws.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn test_set_keeps_kinds_stable() {
        let mut engine = TraitEngine::new();
        assert_eq!(engine.set("count", 3i64).unwrap(), None);
        assert_eq!(
            engine.set("count", 5i64).unwrap(),
            Some(TraitValue::Int(3))
        );

        let err = engine.set("count", "five").unwrap_err();
        assert!(matches!(
            err,
            TraitError::KindMismatch {
                local: TraitKind::Int,
                partner: TraitKind::Text,
                ..
            }
        ));
        assert_eq!(engine.get("count"), Some(&TraitValue::Int(5)));

        // insert is unchecked
        engine.insert("count", "five");
        assert_eq!(engine.get("count").map(TraitValue::kind), Some(TraitKind::Text));
    }

    #[test]
    fn test_mutate_full_replace_stays_in_bounds() {
        let specs = TraitSpecTable::new()
            .with("count", int_spec(1.0, 1.0))
            .unwrap();
        let mut rng = test_rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let mut engine = TraitEngine::new();
            engine.insert("count", 5i64);
            engine.mutate(&specs, &mut rng);
            let v = engine.get("count").unwrap().as_int().unwrap();
            assert!((0..=10).contains(&v));
            seen.insert(v);
        }
        // a uniform redraw over 11 values should reach most of them
        assert!(seen.len() > 5);
    }

    #[test]
    fn test_mutate_perturb_clamps() {
        let specs = TraitSpecTable::new()
            .with(
                "count",
                IntTraitSpec {
                    perturb_power: 100,
                    ..int_spec(1.0, 0.0)
                },
            )
            .unwrap()
            .with(
                "gain",
                RealTraitSpec {
                    perturb_power: 50.0,
                    ..real_spec(1.0, 0.0)
                },
            )
            .unwrap();
        let mut rng = test_rng();
        let mut engine = TraitEngine::new();
        engine.insert("count", 10i64);
        engine.insert("gain", 0.9);
        for _ in 0..100 {
            engine.mutate(&specs, &mut rng);
            let c = engine.get("count").unwrap().as_int().unwrap();
            let g = engine.get("gain").unwrap().as_real().unwrap();
            assert!((0..=10).contains(&c));
            assert!((-1.0..=1.0).contains(&g));
        }
    }

    #[test]
    fn test_mutate_small_perturbation_moves_by_at_most_power() {
        let specs = TraitSpecTable::new()
            .with(
                "count",
                IntTraitSpec {
                    min: -1000,
                    max: 1000,
                    perturb_power: 2,
                    ..int_spec(1.0, 0.0)
                },
            )
            .unwrap();
        let mut rng = test_rng();
        let mut engine = TraitEngine::new();
        engine.insert("count", 0i64);
        let mut previous = 0;
        for _ in 0..100 {
            engine.mutate(&specs, &mut rng);
            let now = engine.get("count").unwrap().as_int().unwrap();
            assert!((now - previous).abs() <= 2);
            previous = now;
        }
    }

    #[test]
    fn test_mutate_zero_probability_is_noop() {
        let specs = TraitSpecTable::new()
            .with("count", int_spec(0.0, 1.0))
            .unwrap()
            .with("gain", real_spec(0.0, 1.0))
            .unwrap();
        let mut engine = TraitEngine::new();
        engine.insert("count", 7i64);
        engine.insert("gain", 0.125);
        let before = engine.clone();
        for _ in 0..20 {
            engine.mutate(&specs, &mut test_rng());
        }
        assert_eq!(engine, before);
    }

    #[test]
    fn test_mutate_bool_flips_every_time() {
        let specs = TraitSpecTable::new()
            .with(
                "enabled",
                BoolTraitSpec {
                    mutation_probability: 1.0,
                    importance: 1.0,
                },
            )
            .unwrap();
        let mut rng = test_rng();
        let mut engine = TraitEngine::new();
        engine.insert("enabled", true);

        engine.mutate(&specs, &mut rng);
        assert_eq!(engine.get("enabled"), Some(&TraitValue::Bool(false)));
        engine.mutate(&specs, &mut rng);
        assert_eq!(engine.get("enabled"), Some(&TraitValue::Bool(true)));
    }

    #[test]
    fn test_mutate_text_single_candidate_terminates() {
        let specs = TraitSpecTable::new()
            .with(
                "shape",
                TextTraitSpec::new(["only", "never"], [1.0, 0.0]).unwrap(),
            )
            .unwrap();
        let mut engine = TraitEngine::new();
        engine.insert("shape", "only");
        engine.mutate(&specs, &mut test_rng());
        assert_eq!(engine.get("shape"), Some(&TraitValue::Text("only".into())));
    }

    #[test]
    fn test_mutate_skips_missing_and_mismatched() {
        let specs = full_table();
        let mut engine = TraitEngine::new();
        engine.insert("gain", "not a real");
        let before = engine.clone();

        let mut rng = test_rng();
        engine.mutate(&specs, &mut rng);

        assert_eq!(engine, before);
        // nothing consumed from the generator
        let mut fresh = test_rng();
        assert_eq!(rng.unit(), fresh.unit());
    }

    #[test]
    fn test_mate_outcomes_for_numbers() {
        let mut rng = test_rng();
        for _ in 0..200 {
            let mut mine = TraitEngine::new();
            mine.insert("count", 3i64);
            mine.insert("gain", 0.2);
            let mut yours = TraitEngine::new();
            yours.insert("count", 8i64);
            yours.insert("gain", 0.6);

            mine.mate(&yours, &mut rng).unwrap();

            let c = mine.get("count").unwrap().as_int().unwrap();
            assert!([3, 8, 5].contains(&c), "unexpected child count {c}");
            let g = mine.get("gain").unwrap().as_real().unwrap();
            assert!(
                [0.2, 0.6, (0.2 + 0.6) / 2.0].contains(&g),
                "unexpected child gain {g}"
            );
        }
    }

    #[test]
    fn test_mate_bool_and_text_inherit_one_parent() {
        let mut rng = test_rng();
        let mut saw_mine = false;
        let mut saw_yours = false;
        for _ in 0..100 {
            let mut mine = TraitEngine::new();
            mine.insert("enabled", true);
            mine.insert("shape", "round");
            let mut yours = TraitEngine::new();
            yours.insert("enabled", false);
            yours.insert("shape", "square");

            mine.mate(&yours, &mut rng).unwrap();

            let shape = mine.get("shape").unwrap().as_text().unwrap();
            assert!(shape == "round" || shape == "square");
            saw_mine |= shape == "round";
            saw_yours |= shape == "square";
        }
        assert!(saw_mine && saw_yours);
    }

    #[test]
    fn test_mate_truncates_toward_zero() {
        assert_eq!(truncated_mean(3, 4), 3);
        assert_eq!(truncated_mean(-3, -4), -3);
        assert_eq!(truncated_mean(-3, 4), 0);
        assert_eq!(truncated_mean(i64::MAX, i64::MAX), i64::MAX);
        assert_eq!(truncated_mean(i64::MIN, i64::MIN), i64::MIN);
    }

    #[test]
    fn test_mate_skips_names_missing_locally() {
        let mut mine = TraitEngine::new();
        mine.insert("count", 1i64);
        let mut yours = TraitEngine::new();
        yours.insert("count", 1i64);
        yours.insert("extra", true);

        mine.mate(&yours, &mut test_rng()).unwrap();

        assert!(!mine.contains("extra"));
        assert_eq!(mine.get("count"), Some(&TraitValue::Int(1)));
    }

    #[test]
    fn test_mate_kind_mismatch_leaves_state() {
        let mut mine = TraitEngine::new();
        mine.insert("alpha", 1i64);
        mine.insert("beta", 0.5);
        let mut yours = TraitEngine::new();
        yours.insert("alpha", 9i64);
        yours.insert("beta", "text");
        let before = mine.clone();

        let err = mine.mate(&yours, &mut test_rng()).unwrap_err();

        assert!(matches!(
            err,
            TraitError::KindMismatch {
                ref name,
                local: TraitKind::Real,
                partner: TraitKind::Text,
            } if name == "beta"
        ));
        assert_eq!(mine, before);
    }

    #[test]
    fn test_distance_per_kind() {
        let mut mine = TraitEngine::new();
        mine.insert("count", 3i64);
        mine.insert("gain", 0.25);
        mine.insert("enabled", true);
        mine.insert("shape", "round");
        let mut yours = TraitEngine::new();
        yours.insert("count", -4i64);
        yours.insert("gain", 1.0);
        yours.insert("enabled", true);
        yours.insert("shape", "square");

        let d = mine.distance(&yours).unwrap();
        assert_eq!(d.len(), 4);
        assert_eq!(d.get("count"), Some(7.0));
        assert_eq!(d.get("gain"), Some(0.75));
        assert_eq!(d.get("enabled"), Some(0.0));
        assert_eq!(d.get("shape"), Some(1.0));
        assert!((d.total() - 8.75).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let mut engine = TraitEngine::new();
        engine.initialize(&full_table(), &mut test_rng());
        let d = engine.distance(&engine).unwrap();
        assert_eq!(d.len(), 4);
        assert!(d.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_distance_is_asymmetric_over_keys() {
        let mut mine = TraitEngine::new();
        mine.insert("count", 1i64);
        mine.insert("local_only", 2i64);
        let mut yours = TraitEngine::new();
        yours.insert("count", 4i64);
        yours.insert("remote_only", true);

        let d = mine.distance(&yours).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.get("count"), Some(3.0));
        assert_eq!(d.get("local_only"), None);
    }

    #[test]
    fn test_distance_empty_maps() {
        let d = TraitEngine::new().distance(&TraitEngine::new()).unwrap();
        assert!(d.is_empty());
        assert_eq!(d.total(), 0.0);
    }

    #[test]
    fn test_distance_kind_mismatch() {
        let mut mine = TraitEngine::new();
        mine.insert("count", 1i64);
        let mut yours = TraitEngine::new();
        yours.insert("count", 1.0);
        assert!(matches!(
            mine.distance(&yours),
            Err(TraitError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_weighted_total_uses_importance() {
        let specs = TraitSpecTable::new()
            .with(
                "count",
                IntTraitSpec {
                    importance: 0.5,
                    ..int_spec(0.1, 0.1)
                },
            )
            .unwrap();
        let mut mine = TraitEngine::new();
        mine.insert("count", 0i64);
        mine.insert("unconfigured", 0i64);
        let mut yours = TraitEngine::new();
        yours.insert("count", 4i64);
        yours.insert("unconfigured", 100i64);

        let d = mine.distance(&yours).unwrap();
        assert!((d.weighted_total(&specs) - 2.0).abs() < 1e-12);
        assert!((d.total() - 104.0).abs() < 1e-12);
    }
}
