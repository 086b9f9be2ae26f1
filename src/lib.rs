//! # Symbios Genes
//!
//! Evolvable traits, connection genes and node genes for NEAT-style
//! neuroevolution.
//!
//! ## Features
//!
//! - **Typed Traits**: Named integer, boolean, real and text values attached to
//!   any gene, drawn and mutated from declarative [`TraitSpec`]s
//! - **Perturb or Replace**: Each numeric trait mutates either by bounded noise
//!   around its current value or by a fresh draw, per its spec
//! - **Crossover Blending**: Numeric traits are inherited verbatim or averaged;
//!   booleans and text always come from exactly one parent
//! - **Speciation Distances**: Per-trait distances for compatibility scoring,
//!   with an importance-weighted total
//! - **Explicit Randomness**: Every stochastic call takes the caller's `Rng`,
//!   so a seeded generator replays the same evolution
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use symbios_genes::{ConnectionGene, Gene, RealTraitSpec, TraitSpecTable};
//!
//! let specs = TraitSpecTable::new()
//!     .with(
//!         "plasticity",
//!         RealTraitSpec {
//!             min: 0.0,
//!             max: 1.0,
//!             mutation_probability: 0.2,
//!             replace_probability: 0.1,
//!             perturb_power: 0.05,
//!             importance: 1.0,
//!         },
//!     )
//!     .unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut parent = ConnectionGene::new(1, 3, 100, 0.5);
//! let mut other = ConnectionGene::new(2, 3, 100, -0.25);
//! parent.init_traits(&specs, &mut rng);
//! other.init_traits(&specs, &mut rng);
//!
//! parent.mutate_traits(&specs, &mut rng);
//! parent.mate_traits(&other, &mut rng).unwrap();
//!
//! let distances = parent.trait_distances(&other).unwrap();
//! println!("plasticity distance: {:?}", distances.get("plasticity"));
//! ```
//!
//! ## Configuration
//!
//! [`TraitConfig`] loads separate spec tables for link and neuron genes from
//! TOML. Specs are validated on load, so a bad bound or an all-zero weight
//! table is reported before evolution starts.
//!
//! ## Identity
//!
//! [`ConnectionGene`] compares, orders and hashes by innovation id alone, so
//! genes from different genomes can be aligned by sorting.

pub mod activation;
pub mod config;
pub mod engine;
pub mod error;
pub mod gene;
pub mod rng;
pub mod spec;
pub mod value;

// Re-exports for convenience
pub use activation::ActivationFunction;
pub use config::TraitConfig;
pub use engine::{TraitDistances, TraitEngine};
pub use error::{Result, SpecViolation, TraitError};
pub use gene::{ConnectionGene, Gene, Innovation, NodeGene, NodeId, NodeRole};
pub use rng::TraitRng;
pub use spec::{
    BoolTraitSpec, IntTraitSpec, RealTraitSpec, TextTraitSpec, TraitSpec, TraitSpecTable,
};
pub use value::{TraitKind, TraitValue};
