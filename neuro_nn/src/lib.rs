//! # neuro_nn - Feed-Forward Networks on neuro_core
//!
//! This crate builds layered networks on top of the neuro_core graph:
//!
//! - **Network**: input, hidden and output layers, fully connected between
//!   adjacent layers, sigmoid activations
//! - **Training**: per-example (online) gradient descent on squared error
//! - **Configuration**: epochs, learning rate, progress logging
//! - **Gradient check**: backpropagated vs finite-difference gradients
//!
//! ## Example: Learning XOR
//!
//! ```no_run
//! use neuro_nn::{xor_examples, Network};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut network = Network::with_rng(&[2, 3, 1], &mut rng).unwrap();
//!
//! let examples = xor_examples();
//! network.train(&examples, 100_000).unwrap();
//!
//! for example in &examples {
//!     let output = network.run(&example.inputs).unwrap();
//!     println!("{:?} -> {:.3}", example.inputs, output[0]);
//! }
//! ```

pub mod config;
pub mod data;
pub mod gradient_check;
pub mod network;

// Re-exports for convenience
pub use config::TrainingConfig;
pub use data::{xor_examples, TrainingData};
pub use gradient_check::{analytic_weight_gradients, max_grad_error, numerical_weight_gradients};
pub use network::{Network, TrainingResult, DEFAULT_LEARNING_RATE};
pub use neuro_core::{NeuroError, NeuronId, Result, SynapseId, ValueKind};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::TrainingConfig;
    pub use crate::data::{xor_examples, TrainingData};
    pub use crate::network::{Network, TrainingResult};
    pub use neuro_core::{NeuroError, NeuronId, Result, ValueKind};
}
