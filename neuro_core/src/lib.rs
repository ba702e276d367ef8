//! # neuro_core - Memoized Neuron Graph
//!
//! This crate provides the computation graph behind a small feed-forward neural
//! network: neurons connected by weighted synapses, with lazily computed and
//! cached activations (forward) and error signals (backward).
//!
//! ## Overview
//!
//! Every neuron holds two [`Memo`] cells, one for its output and one for its
//! delta. Reading a value that is not cached computes it from the neighbours,
//! recursively, and caches everything it touched. Writing an external value
//! (an input neuron's output, or an output neuron's delta) invalidates every
//! cache that depends on it, so the graph never needs rebuilding between passes.
//!
//! ## Quick Start
//!
//! ```
//! use neuro_core::{sigmoid, Graph};
//!
//! let mut graph = Graph::new();
//! let x = graph.add_neuron();
//! let y = graph.add_neuron();
//! graph.connect(x, y, 0.5).unwrap();
//!
//! graph.set_output(x, 2.0).unwrap();
//! assert!((graph.output(y).unwrap() - sigmoid(1.0)).abs() < 1e-12);
//!
//! // Changing the input invalidates the cached output of `y`
//! graph.set_output(x, 0.0).unwrap();
//! assert!((graph.output(y).unwrap() - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Architecture
//!
//! - **[`Graph`]**: arena owning every [`Neuron`] and [`Synapse`]; all neuron
//!   operations go through it by [`NeuronId`].
//! - **[`Memo`]**: dirty/clean cache cell with explicit invalidation.
//! - **[`NeuroError`]**: role, unset-value, topology and dimension errors.
//! - **[`math`]**: sigmoid, its derivative, and weight initialization.

pub mod error;
pub mod graph;
pub mod math;
pub mod memo;
pub mod neuron;
pub mod synapse;

pub use error::{NeuroError, Result, ValueKind};
pub use graph::{Graph, NeuronId};
pub use math::{random_weight, sigmoid, sigmoid_derivative, squared_error};
pub use memo::Memo;
pub use neuron::{Neuron, Role};
pub use synapse::{Synapse, SynapseId};
