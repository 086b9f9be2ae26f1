//! Gene types for NEAT genomes.
//!
//! This module defines the two evolvable building blocks of a network:
//! - [`ConnectionGene`]: a weighted link between two nodes
//! - [`NodeGene`]: a neuron with its role, depth and activation parameters
//!
//! Both embed a [`TraitEngine`] for auxiliary named traits and expose it
//! through the [`Gene`] trait.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::ActivationFunction;
use crate::engine::{TraitDistances, TraitEngine};
use crate::error::Result;
use crate::spec::TraitSpecTable;

/// Identifier of a node within a genome.
pub type NodeId = u32;

/// Historical marker that aligns homologous connections across genomes.
pub type Innovation = u64;

/// Common trait behaviour of every gene kind.
///
/// Implementors only provide access to their [`TraitEngine`]; the trait
/// operations forward to it.
pub trait Gene {
    fn traits(&self) -> &TraitEngine;
    fn traits_mut(&mut self) -> &mut TraitEngine;

    /// Draw every trait in `specs`. See [`TraitEngine::initialize`].
    fn init_traits<R: Rng + ?Sized>(&mut self, specs: &TraitSpecTable, rng: &mut R) {
        self.traits_mut().initialize(specs, rng);
    }

    /// Mutate traits in place. See [`TraitEngine::mutate`].
    fn mutate_traits<R: Rng + ?Sized>(&mut self, specs: &TraitSpecTable, rng: &mut R) {
        self.traits_mut().mutate(specs, rng);
    }

    /// Merge `other`'s traits into this gene. See [`TraitEngine::mate`].
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::KindMismatch`](crate::TraitError::KindMismatch)
    /// if a shared trait has different kinds.
    fn mate_traits<R: Rng + ?Sized>(&mut self, other: &Self, rng: &mut R) -> Result<()> {
        let partner = other.traits();
        self.traits_mut().mate(partner, rng)
    }

    /// Per-trait distances to `other`. See [`TraitEngine::distance`].
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::KindMismatch`](crate::TraitError::KindMismatch)
    /// if a shared trait has different kinds.
    fn trait_distances(&self, other: &Self) -> Result<TraitDistances> {
        self.traits().distance(other.traits())
    }
}

/// The type/role of a node in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// Role not assigned yet.
    #[default]
    None,
    /// Input node - receives external values.
    Input,
    /// Bias node - constant input.
    Bias,
    /// Hidden node - added through structural mutation.
    Hidden,
    /// Output node - produces final network output.
    Output,
}

/// A connection gene representing a weighted link between two nodes.
///
/// Equality, ordering and hashing look only at the innovation id, so two
/// independently created genes with the same innovation are the same gene
/// for alignment purposes whatever their weights or endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionGene {
    from_node_id: NodeId,
    to_node_id: NodeId,
    innovation_id: Innovation,
    recurrent: bool,
    weight: f64,
    #[serde(default)]
    traits: TraitEngine,
}

impl ConnectionGene {
    /// Create a feed-forward connection.
    #[must_use]
    pub fn new(from: NodeId, to: NodeId, innovation: Innovation, weight: f64) -> Self {
        Self {
            from_node_id: from,
            to_node_id: to,
            innovation_id: innovation,
            recurrent: false,
            weight,
            traits: TraitEngine::new(),
        }
    }

    /// Create a connection flagged as recurrent.
    #[must_use]
    pub fn recurrent(from: NodeId, to: NodeId, innovation: Innovation, weight: f64) -> Self {
        Self {
            recurrent: true,
            ..Self::new(from, to, innovation, weight)
        }
    }

    /// Connection weight.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Set the weight. No bounds are enforced here.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// Source node.
    #[must_use]
    pub fn from_node_id(&self) -> NodeId {
        self.from_node_id
    }

    /// Target node.
    #[must_use]
    pub fn to_node_id(&self) -> NodeId {
        self.to_node_id
    }

    /// Historical marking used to align genes across genomes.
    #[must_use]
    pub fn innovation_id(&self) -> Innovation {
        self.innovation_id
    }

    /// Whether the connection is recurrent.
    ///
    /// A self-loop is always recurrent, whatever flag it was created with.
    #[must_use]
    pub fn is_recurrent(&self) -> bool {
        self.recurrent || self.is_looped_recurrent()
    }

    /// Whether the connection starts and ends at the same node.
    #[must_use]
    pub fn is_looped_recurrent(&self) -> bool {
        self.from_node_id == self.to_node_id
    }
}

impl Gene for ConnectionGene {
    fn traits(&self) -> &TraitEngine {
        &self.traits
    }

    fn traits_mut(&mut self) -> &mut TraitEngine {
        &mut self.traits
    }
}

impl PartialEq for ConnectionGene {
    fn eq(&self, other: &Self) -> bool {
        self.innovation_id == other.innovation_id
    }
}

impl Eq for ConnectionGene {}

impl PartialOrd for ConnectionGene {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConnectionGene {
    fn cmp(&self, other: &Self) -> Ordering {
        self.innovation_id.cmp(&other.innovation_id)
    }
}

impl Hash for ConnectionGene {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.innovation_id.hash(state);
    }
}

/// A node gene representing a neuron in the network.
///
/// `a` and `b` are free parameters of the activation function (usually slope
/// and shift). `time_constant` and `bias` are used when the node runs as a
/// leaky integrator. `x` and `y` are display coordinates only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeGene {
    id: NodeId,
    role: NodeRole,
    a: f64,
    b: f64,
    time_constant: f64,
    bias: f64,
    pub x: i32,
    pub y: i32,
    activation: ActivationFunction,
    /// Position within the network, 0.0 at the inputs and 1.0 at the outputs.
    depth: f64,
    #[serde(default)]
    traits: TraitEngine,
}

impl NodeGene {
    /// Create a node with default activation parameters.
    #[must_use]
    pub fn new(role: NodeRole, id: NodeId, depth: f64) -> Self {
        Self {
            id,
            role,
            a: 0.0,
            b: 0.0,
            time_constant: 0.0,
            bias: 0.0,
            x: 0,
            y: 0,
            activation: ActivationFunction::default(),
            depth,
            traits: TraitEngine::new(),
        }
    }

    /// Create a new input node.
    #[must_use]
    pub fn input(id: NodeId) -> Self {
        Self::new(NodeRole::Input, id, 0.0)
    }

    /// Create a bias node.
    #[must_use]
    pub fn bias(id: NodeId) -> Self {
        Self::new(NodeRole::Bias, id, 0.0)
    }

    /// Create a new output node.
    #[must_use]
    pub fn output(id: NodeId) -> Self {
        Self::new(NodeRole::Output, id, 1.0)
    }

    /// Create a new hidden node.
    #[must_use]
    pub fn hidden(id: NodeId, depth: f64) -> Self {
        Self::new(NodeRole::Hidden, id, depth)
    }

    /// Node identifier.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Role of the node in the network.
    #[must_use]
    pub fn role(&self) -> NodeRole {
        self.role
    }

    /// Depth in `[0, 1]`, inputs at 0 and outputs at 1.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Move the node to a new depth.
    pub fn set_depth(&mut self, depth: f64) {
        self.depth = depth;
    }

    /// Set all activation parameters and the function together.
    pub fn configure_activation(
        &mut self,
        a: f64,
        b: f64,
        time_constant: f64,
        bias: f64,
        activation: ActivationFunction,
    ) {
        self.a = a;
        self.b = b;
        self.time_constant = time_constant;
        self.bias = bias;
        self.activation = activation;
    }

    /// Activation slope parameter.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Activation shift parameter.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Leaky-integrator time constant.
    #[must_use]
    pub fn time_constant(&self) -> f64 {
        self.time_constant
    }

    /// Leaky-integrator bias.
    #[must_use]
    pub fn leaky_bias(&self) -> f64 {
        self.bias
    }

    /// Activation function selector.
    #[must_use]
    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }
}

impl Gene for NodeGene {
    fn traits(&self) -> &TraitEngine {
        &self.traits
    }

    fn traits_mut(&mut self) -> &mut TraitEngine {
        &mut self.traits
    }
}
