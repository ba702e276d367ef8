//! Numerical verification of backpropagated gradients.
//!
//! Backpropagation gives, for every synapse `i -> j`, the gradient
//! `delta(j) * output(i)` of the half squared error `0.5 * sum((output - target)^2)`.
//! The helpers here compute that analytic gradient without touching any
//! weight, and compare it against central finite differences.

use neuro_core::Result;

use crate::data::TrainingData;
use crate::network::{output_delta, Network};

/// Backpropagated gradient of the half squared error for every synapse, in
/// synapse creation order.
///
/// Works on a clone: `network` is unchanged. Unlike
/// [`Network::propagate_backward`], no weight is updated between reading the
/// output layer's deltas and the hidden ones, so this is the exact gradient.
pub fn analytic_weight_gradients(network: &Network, example: &TrainingData) -> Result<Vec<f64>> {
    let mut probe = network.clone();
    probe.propagate_forward(&example.inputs)?;
    // validates the target length
    probe.output_error(&example.targets)?;

    let outputs = probe.output_layer().to_vec();
    for (neuron, &target) in outputs.into_iter().zip(&example.targets) {
        let output = probe.output(neuron)?;
        probe.set_delta(neuron, output_delta(output, target))?;
    }

    probe
        .graph()
        .synapses()
        .iter()
        .map(|synapse| -> Result<f64> {
            Ok(probe.delta(synapse.output())? * probe.output(synapse.input())?)
        })
        .collect()
}

/// Central finite-difference gradient of the half squared error for every
/// synapse, in synapse creation order.
///
/// # Arguments
/// * `network` - Network to probe (left unchanged; a clone is perturbed)
/// * `example` - Inputs and targets defining the error
/// * `eps` - Step size (typically 1e-7 to 1e-5)
pub fn numerical_weight_gradients(
    network: &Network,
    example: &TrainingData,
    eps: f64,
) -> Result<Vec<f64>> {
    let mut probe = network.clone();
    let synapses: Vec<_> = probe.graph().synapse_ids().collect();
    let mut grads = Vec::with_capacity(synapses.len());

    for synapse in synapses {
        let weight = probe.graph().weight(synapse);

        probe.set_weight(synapse, weight + eps);
        let plus = half_squared_error(&mut probe, example)?;

        probe.set_weight(synapse, weight - eps);
        let minus = half_squared_error(&mut probe, example)?;

        probe.set_weight(synapse, weight); // restore

        grads.push((plus - minus) / (2.0 * eps));
    }

    Ok(grads)
}

/// Compute the maximum absolute difference between two gradient vectors.
///
/// Panics if the lengths differ.
pub fn max_grad_error(grad1: &[f64], grad2: &[f64]) -> f64 {
    assert_eq!(grad1.len(), grad2.len());
    grad1
        .iter()
        .zip(grad2.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

fn half_squared_error(network: &mut Network, example: &TrainingData) -> Result<f64> {
    network.propagate_forward(&example.inputs)?;
    Ok(0.5 * network.output_error(&example.targets)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuro_core::NeuroError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(sizes: &[usize], seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        // shift into [-1, 1) so some weights are negative
        Network::new(sizes, || 2.0 * neuro_core::random_weight(&mut rng) - 1.0).unwrap()
    }

    #[test]
    fn test_gradients_agree_single_hidden() {
        let net = seeded(&[2, 3, 1], 11);
        let example = TrainingData::new([0.7, -0.2], [1.0]);

        let analytic = analytic_weight_gradients(&net, &example).unwrap();
        let numeric = numerical_weight_gradients(&net, &example, 1e-6).unwrap();

        assert_eq!(analytic.len(), net.graph().synapse_count());
        let err = max_grad_error(&analytic, &numeric);
        assert!(err < 1e-8, "max gradient error {}", err);
    }

    #[test]
    fn test_gradients_agree_deep_multi_output() {
        let net = seeded(&[3, 4, 3, 2], 5);
        let example = TrainingData::new([0.1, 0.9, -0.5], [0.0, 1.0]);

        let analytic = analytic_weight_gradients(&net, &example).unwrap();
        let numeric = numerical_weight_gradients(&net, &example, 1e-6).unwrap();

        let err = max_grad_error(&analytic, &numeric);
        assert!(err < 1e-8, "max gradient error {}", err);
    }

    #[test]
    fn test_probe_leaves_network_untouched() {
        let net = seeded(&[2, 2, 1], 3);
        let before = net.weights();
        let example = TrainingData::new([1.0, 0.0], [1.0]);

        analytic_weight_gradients(&net, &example).unwrap();
        numerical_weight_gradients(&net, &example, 1e-5).unwrap();

        assert_eq!(net.weights(), before);
        // never run: inputs are still unset
        assert!(matches!(
            net.output(net.input_layer()[0]),
            Err(NeuroError::UnsetValue { .. })
        ));
    }

    #[test]
    fn test_output_layer_step_follows_gradient() {
        let mut net = seeded(&[2, 3, 1], 17);
        let example = TrainingData::new([1.0, 1.0], [0.0]);
        let grads = analytic_weight_gradients(&net, &example).unwrap();
        let before = net.weights();
        let lr = net.learning_rate();

        net.propagate_forward(&example.inputs).unwrap();
        net.propagate_backward(&example.targets).unwrap();
        let after = net.weights();

        let out = net.output_layer()[0];
        for (k, synapse) in net.graph().synapses().iter().enumerate() {
            if synapse.output() == out {
                assert!((after[k] - (before[k] - lr * grads[k])).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_max_grad_error() {
        let g1 = vec![1.0, 2.0, 3.0];
        let g2 = vec![1.1, 2.0, 2.8];

        let err = max_grad_error(&g1, &g2);
        assert!((err - 0.2).abs() < 1e-10);
    }
}
