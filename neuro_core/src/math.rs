//! Activation math shared by the forward and backward passes.

use rand::Rng;

/// Logistic sigmoid: 1 / (1 + exp(-x))
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid expressed through its output.
///
/// Takes the activated value `a = sigmoid(x)`, not `x`, and returns `a * (1 - a)`.
pub fn sigmoid_derivative(a: f64) -> f64 {
    a * (1.0 - a)
}

/// Draw an initial synapse weight, uniform in [0, 1).
pub fn random_weight<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Squared error of a single output against its target.
pub fn squared_error(output: f64, target: f64) -> f64 {
    (output - target).powi(2)
}
