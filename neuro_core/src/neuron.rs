//! Graph nodes holding a memoized output and a memoized delta.

use crate::memo::Memo;
use crate::synapse::SynapseId;

/// Position of a neuron in the feed-forward graph, derived from its synapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// No incoming synapses: the output is supplied externally.
    Input,
    /// Both incoming and outgoing synapses: output and delta are derived.
    Hidden,
    /// No outgoing synapses: the delta is supplied externally.
    Output,
}

/// A neuron and its connectivity.
///
/// Synapse lists are fixed once the owning graph is wired. An empty incoming
/// list means the output is externally settable; an empty outgoing list means
/// the delta is.
#[derive(Debug, Clone, Default)]
pub struct Neuron {
    pub(crate) incoming: Vec<SynapseId>,
    pub(crate) outgoing: Vec<SynapseId>,
    pub(crate) output: Memo<f64>,
    pub(crate) delta: Memo<f64>,
}

impl Neuron {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn incoming(&self) -> &[SynapseId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[SynapseId] {
        &self.outgoing
    }

    /// Whether the output must be set directly rather than derived.
    pub fn accepts_output(&self) -> bool {
        self.incoming.is_empty()
    }

    /// Whether the delta must be set directly rather than derived.
    pub fn accepts_delta(&self) -> bool {
        self.outgoing.is_empty()
    }

    pub fn role(&self) -> Role {
        if self.accepts_output() {
            Role::Input
        } else if self.accepts_delta() {
            Role::Output
        } else {
            Role::Hidden
        }
    }

    /// The cached output, if one is present.
    pub fn cached_output(&self) -> Option<f64> {
        self.output.peek()
    }

    /// The cached delta, if one is present.
    pub fn cached_delta(&self) -> Option<f64> {
        self.delta.peek()
    }
}
