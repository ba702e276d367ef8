//! Layered, fully connected sigmoid network.

use neuro_core::{
    random_weight, sigmoid_derivative, squared_error, Graph, NeuroError, NeuronId, Result,
    SynapseId,
};
use rand::Rng;

use crate::config::TrainingConfig;
use crate::data::TrainingData;

/// Learning rate used when none is configured.
pub const DEFAULT_LEARNING_RATE: f64 = 0.8;

/// Result of [`Network::train_with_config`].
#[derive(Debug, Clone)]
pub struct TrainingResult {
    /// Number of epochs that were run.
    pub epochs: usize,
    /// Mean squared error at every logging checkpoint, oldest first.
    pub loss_history: Vec<f64>,
}

/// A feed-forward network: one input layer, one or more hidden layers and one
/// output layer, each layer fully connected to the next.
///
/// The network owns the [`Graph`] holding every neuron and synapse; layers are
/// lists of [`NeuronId`]s into it. Topology is fixed at construction, only
/// weights change afterwards.
#[derive(Debug, Clone)]
pub struct Network {
    graph: Graph,
    layers: Vec<Vec<NeuronId>>,
    learning_rate: f64,
}

impl Network {
    /// Build a network from per-layer neuron counts.
    ///
    /// `next_weight` is called once per synapse, layer by layer, then for each
    /// neuron of the layer, then for each neuron of the previous layer.
    ///
    /// Fails with [`NeuroError::InvalidTopology`] if fewer than 3 layers are
    /// given or any layer is empty.
    pub fn new<F>(layer_sizes: &[usize], mut next_weight: F) -> Result<Self>
    where
        F: FnMut() -> f64,
    {
        if layer_sizes.len() < 3 {
            return Err(NeuroError::InvalidTopology {
                message: format!(
                    "need at least 3 layers (one input layer, at least one hidden layer and one output layer), got {}",
                    layer_sizes.len()
                ),
            });
        }
        if let Some(index) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(NeuroError::InvalidTopology {
                message: format!("layer {} has no neurons", index),
            });
        }

        let mut graph = Graph::new();
        let mut layers: Vec<Vec<NeuronId>> = Vec::with_capacity(layer_sizes.len());
        for &size in layer_sizes {
            let mut layer = Vec::with_capacity(size);
            for _ in 0..size {
                let neuron = graph.add_neuron();
                if let Some(previous) = layers.last() {
                    for &input in previous {
                        graph.connect(input, neuron, next_weight())?;
                    }
                }
                layer.push(neuron);
            }
            layers.push(layer);
        }

        log::debug!(
            "Built network {:?}: {} neurons, {} synapses",
            layer_sizes,
            graph.neuron_count(),
            graph.synapse_count()
        );

        Ok(Network {
            graph,
            layers,
            learning_rate: DEFAULT_LEARNING_RATE,
        })
    }

    /// Build a network whose initial weights are drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Self> {
        Self::new(layer_sizes, || random_weight(&mut *rng))
    }

    /// Build a network whose initial weights come from the thread-local RNG.
    pub fn new_random(layer_sizes: &[usize]) -> Result<Self> {
        Self::with_rng(layer_sizes, &mut rand::thread_rng())
    }

    /// Sets the learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    // === Structure ===

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// All layers, input first.
    pub fn layers(&self) -> &[Vec<NeuronId>] {
        &self.layers
    }

    pub fn input_layer(&self) -> &[NeuronId] {
        &self.layers[0]
    }

    /// Every layer between the input and output layers.
    pub fn hidden_layers(&self) -> &[Vec<NeuronId>] {
        &self.layers[1..self.layers.len() - 1]
    }

    pub fn output_layer(&self) -> &[NeuronId] {
        &self.layers[self.layers.len() - 1]
    }

    /// Current weights, in synapse creation order.
    pub fn weights(&self) -> Vec<f64> {
        self.graph.synapses().iter().map(|s| s.weight()).collect()
    }

    /// Overwrite a single weight. Dependent cached values are invalidated.
    pub fn set_weight(&mut self, synapse: SynapseId, weight: f64) {
        self.graph.set_weight(synapse, weight);
    }

    // === Neuron values ===

    pub fn output(&self, neuron: NeuronId) -> Result<f64> {
        self.graph.output(neuron)
    }

    pub fn set_output(&mut self, neuron: NeuronId, value: f64) -> Result<()> {
        self.graph.set_output(neuron, value)
    }

    /// The delta of `neuron`. Hidden and input deltas are derived from the
    /// current outputs and the output layer's last deltas.
    pub fn delta(&self, neuron: NeuronId) -> Result<f64> {
        self.graph.delta(neuron)
    }

    pub fn set_delta(&mut self, neuron: NeuronId, value: f64) -> Result<()> {
        self.graph.set_delta(neuron, value)
    }

    // === Inference ===

    /// Feed `inputs` through the network and return the output layer's
    /// activations in layer order.
    pub fn run(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.propagate_forward(inputs)?;
        self.output_layer()
            .iter()
            .map(|&neuron| self.graph.output(neuron))
            .collect()
    }

    /// Install `inputs` as the input layer's outputs.
    ///
    /// Nothing is computed here; downstream outputs and every derived delta
    /// are only invalidated and get recomputed when read.
    pub fn propagate_forward(&mut self, inputs: &[f64]) -> Result<()> {
        check_len("Input", self.layers[0].len(), inputs.len())?;
        for (&neuron, &value) in self.layers[0].iter().zip(inputs) {
            self.graph.set_output(neuron, value)?;
        }
        self.graph.invalidate_deltas();
        Ok(())
    }

    // === Training ===

    /// Backpropagate `targets` for the current inputs and take one gradient step.
    ///
    /// Output neurons get `delta = (output - target) * output * (1 - output)`
    /// and update their incoming weights right away. Hidden layers then update
    /// theirs front to back; each hidden delta is pulled lazily from the next
    /// layer at that moment, so it sees the output layer's already updated
    /// weights.
    pub fn propagate_backward(&mut self, targets: &[f64]) -> Result<()> {
        self.backward_step(targets, self.learning_rate)
    }

    fn backward_step(&mut self, targets: &[f64], learning_rate: f64) -> Result<()> {
        let last = self.layers.len() - 1;
        check_len("Output", self.layers[last].len(), targets.len())?;

        for (&neuron, &target) in self.layers[last].iter().zip(targets) {
            let output = self.graph.output(neuron)?;
            self.graph.set_delta(neuron, output_delta(output, target))?;
            self.graph.update_input_weights(neuron, learning_rate)?;
        }
        for layer in &self.layers[1..last] {
            for &neuron in layer {
                self.graph.update_input_weights(neuron, learning_rate)?;
            }
        }
        Ok(())
    }

    /// Online gradient descent: for each of `num_rounds` epochs, run forward and
    /// backward on every example in order.
    ///
    /// All examples are checked against the layer sizes before any weight
    /// changes.
    pub fn train(&mut self, examples: &[TrainingData], num_rounds: usize) -> Result<()> {
        self.check_examples(examples)?;
        for _ in 0..num_rounds {
            self.train_epoch(examples, self.learning_rate)?;
        }
        Ok(())
    }

    /// Like [`Network::train`], with the epoch count and learning rate taken from
    /// `config`, and the mean squared error measured and logged at the configured
    /// interval.
    ///
    /// The network's own learning rate is not changed.
    pub fn train_with_config(
        &mut self,
        examples: &[TrainingData],
        config: &TrainingConfig,
    ) -> Result<TrainingResult> {
        self.check_examples(examples)?;

        let mut loss_history = Vec::new();
        for epoch in 0..config.epochs {
            self.train_epoch(examples, config.learning_rate)?;

            if config.is_checkpoint(epoch) {
                let mse = self.mean_squared_error(examples)?;
                log::info!("Epoch {}/{}: mse = {:.6}", epoch + 1, config.epochs, mse);
                loss_history.push(mse);
            }
        }

        Ok(TrainingResult {
            epochs: config.epochs,
            loss_history,
        })
    }

    fn train_epoch(&mut self, examples: &[TrainingData], learning_rate: f64) -> Result<()> {
        for example in examples {
            self.propagate_forward(&example.inputs)?;
            self.backward_step(&example.targets, learning_rate)?;
        }
        Ok(())
    }

    fn check_examples(&self, examples: &[TrainingData]) -> Result<()> {
        for example in examples {
            check_len("Input", self.input_layer().len(), example.inputs.len())?;
            check_len("Output", self.output_layer().len(), example.targets.len())?;
        }
        Ok(())
    }

    // === Error measurement ===

    /// Sum of squared errors of the output layer against `targets`, for the
    /// inputs currently installed.
    pub fn output_error(&self, targets: &[f64]) -> Result<f64> {
        check_len("Output", self.output_layer().len(), targets.len())?;
        let mut total = 0.0;
        for (&neuron, &target) in self.output_layer().iter().zip(targets) {
            total += squared_error(self.graph.output(neuron)?, target);
        }
        Ok(total)
    }

    /// Average of [`Network::output_error`] over `examples`.
    ///
    /// Only forward passes are run; weights are untouched. Returns 0 for an
    /// empty slice.
    pub fn mean_squared_error(&mut self, examples: &[TrainingData]) -> Result<f64> {
        if examples.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for example in examples {
            self.propagate_forward(&example.inputs)?;
            total += self.output_error(&example.targets)?;
        }
        Ok(total / examples.len() as f64)
    }
}

/// Delta of an output neuron under squared error.
pub(crate) fn output_delta(output: f64, target: f64) -> f64 {
    (output - target) * sigmoid_derivative(output)
}

fn check_len(layer: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(NeuroError::DimensionMismatch {
            layer,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuro_core::Role;

    fn constant_net(sizes: &[usize], weight: f64) -> Network {
        Network::new(sizes, || weight).unwrap()
    }

    #[test]
    fn test_construction_wires_adjacent_layers() {
        let net = constant_net(&[2, 3, 4, 1], 0.5);
        assert_eq!(net.layers().len(), 4);
        assert_eq!(net.graph().synapse_count(), 2 * 3 + 3 * 4 + 4);
        assert_eq!(net.hidden_layers().len(), 2);

        for (i, layer) in net.layers().iter().enumerate() {
            for &neuron in layer {
                let node = net.graph().neuron(neuron);
                let expected_in = if i == 0 { 0 } else { net.layers()[i - 1].len() };
                assert_eq!(node.incoming().len(), expected_in);
                for &s in node.incoming() {
                    assert!(net.layers()[i - 1].contains(&net.graph().synapse(s).input()));
                }
            }
        }
        assert!(net.input_layer().iter().all(|&n| net.graph().role(n) == Role::Input));
        assert!(net.output_layer().iter().all(|&n| net.graph().role(n) == Role::Output));
    }

    #[test]
    fn test_weight_draw_order() {
        let mut counter = 0.0;
        let net = Network::new(&[2, 2, 1], || {
            counter += 1.0;
            counter
        })
        .unwrap();

        assert_eq!(net.weights(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let first = net.graph().synapses()[0];
        assert_eq!(first.input(), net.input_layer()[0]);
        assert_eq!(first.output(), net.hidden_layers()[0][0]);
        let second = net.graph().synapses()[1];
        assert_eq!(second.input(), net.input_layer()[1]);
        assert_eq!(second.output(), net.hidden_layers()[0][0]);
    }

    #[test]
    fn test_invalid_topology() {
        let too_short: [&[usize]; 3] = [&[], &[2], &[2, 1]];
        for sizes in too_short {
            assert!(matches!(
                Network::new(sizes, || 0.5),
                Err(NeuroError::InvalidTopology { .. })
            ));
        }
        assert!(matches!(
            Network::new(&[2, 0, 1], || 0.5),
            Err(NeuroError::InvalidTopology { .. })
        ));
    }

    #[test]
    fn test_run_known_value() {
        let mut net = constant_net(&[2, 2, 1], 0.5);
        let outputs = net.run(&[1.0, 1.0]).unwrap();
        let hidden = neuro_core::sigmoid(1.0);
        let expected = neuro_core::sigmoid(0.5 * hidden * 2.0);
        assert_eq!(outputs.len(), 1);
        assert!((outputs[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut net = constant_net(&[2, 2, 1], 0.5);
        assert_eq!(
            net.run(&[1.0]),
            Err(NeuroError::DimensionMismatch {
                layer: "Input",
                expected: 2,
                actual: 1
            })
        );
        net.run(&[1.0, 0.0]).unwrap();
        assert_eq!(
            net.propagate_backward(&[1.0, 0.0]),
            Err(NeuroError::DimensionMismatch {
                layer: "Output",
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_train_rejects_bad_example_before_updating() {
        let mut net = constant_net(&[2, 2, 1], 0.5);
        let before = net.weights();
        let examples = vec![
            TrainingData::new([1.0, 0.0], [1.0]),
            TrainingData::new([1.0, 0.0], [1.0, 0.0]),
        ];
        assert!(matches!(
            net.train(&examples, 10),
            Err(NeuroError::DimensionMismatch { layer: "Output", .. })
        ));
        assert_eq!(net.weights(), before);
    }

    #[test]
    fn test_learning_rate_is_configurable() {
        let net = constant_net(&[2, 2, 1], 0.5);
        assert!((net.learning_rate() - DEFAULT_LEARNING_RATE).abs() < 1e-12);
        let mut net = net.with_learning_rate(0.1);
        assert!((net.learning_rate() - 0.1).abs() < 1e-12);
        net.set_learning_rate(2.0);
        assert!((net.learning_rate() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_config_rate_applies_to_one_run_only() {
        let examples = crate::xor_examples();
        let config = TrainingConfig::new().epochs(3).learning_rate(0.5);

        let mut net = constant_net(&[2, 3, 1], 0.3);
        net.train_with_config(&examples, &config).unwrap();
        assert!((net.learning_rate() - DEFAULT_LEARNING_RATE).abs() < 1e-12);

        let mut reference = constant_net(&[2, 3, 1], 0.3).with_learning_rate(0.5);
        reference.train(&examples, 3).unwrap();
        assert_eq!(net.weights(), reference.weights());
    }

    #[test]
    fn test_wide_network_builds() {
        let net = constant_net(&[200, 200, 200], 0.1);
        assert_eq!(net.graph().synapse_count(), 2 * 200 * 200);
        assert_eq!(net.output_layer().len(), 200);
    }

    #[test]
    fn test_zero_learning_rate_keeps_weights() {
        let mut net = constant_net(&[2, 3, 1], 0.3).with_learning_rate(0.0);
        let before = net.weights();
        net.train(&crate::xor_examples(), 5).unwrap();
        assert_eq!(net.weights(), before);
    }

    #[test]
    fn test_output_error() {
        let mut net = constant_net(&[2, 2, 1], 0.5);
        let out = net.run(&[0.0, 0.0]).unwrap()[0];
        let err = net.output_error(&[1.0]).unwrap();
        assert!((err - (out - 1.0).powi(2)).abs() < 1e-12);
    }

    #[test]
    fn test_mean_squared_error_leaves_weights() {
        let mut net = constant_net(&[2, 2, 1], 0.5);
        let before = net.weights();
        let mse = net.mean_squared_error(&crate::xor_examples()).unwrap();
        assert!(mse > 0.0);
        assert_eq!(net.weights(), before);
        assert_eq!(net.mean_squared_error(&[]).unwrap(), 0.0);
    }
}
