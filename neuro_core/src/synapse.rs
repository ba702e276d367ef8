//! Weighted edges between neurons of adjacent layers.

use crate::graph::NeuronId;

/// Handle to a synapse stored in a [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SynapseId(pub(crate) usize);

impl SynapseId {
    /// Position of this synapse in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed, weighted edge `input -> output`.
///
/// The synapse does not own its endpoints; both are indices into the graph
/// that owns every neuron and every synapse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Synapse {
    pub(crate) input: NeuronId,
    pub(crate) output: NeuronId,
    pub(crate) weight: f64,
}

impl Synapse {
    /// The neuron this synapse reads from.
    pub fn input(&self) -> NeuronId {
        self.input
    }

    /// The neuron this synapse feeds.
    pub fn output(&self) -> NeuronId {
        self.output
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}
