//! Error taxonomy for graph construction and propagation.
//!
//! Every error here is a usage or configuration mistake by the caller. Nothing is
//! retried internally; the failing operation returns immediately and the graph
//! stays usable for the next correct call.

use std::fmt;

use thiserror::Error;

use crate::graph::NeuronId;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NeuroError>;

/// Which memoized value of a neuron an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The forward activation.
    Output,
    /// The backward error signal.
    Delta,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Output => f.write_str("output"),
            ValueKind::Delta => f.write_str("delta"),
        }
    }
}

/// Errors raised by the graph and by networks built on top of it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NeuroError {
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    #[error("{layer} layer contains {expected} neurons but {actual} values were provided")]
    DimensionMismatch {
        layer: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot set {value} on {neuron}: its {value} is derived from the graph")]
    InvalidRole { neuron: NeuronId, value: ValueKind },

    #[error("The {value} of {neuron} has not been set")]
    UnsetValue { neuron: NeuronId, value: ValueKind },
}

impl NeuroError {
    pub(crate) fn invalid_role(neuron: NeuronId, value: ValueKind) -> Self {
        NeuroError::InvalidRole { neuron, value }
    }

    pub(crate) fn unset(neuron: NeuronId, value: ValueKind) -> Self {
        NeuroError::UnsetValue { neuron, value }
    }
}
