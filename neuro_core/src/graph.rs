//! Arena that owns every neuron and synapse of a feed-forward graph.
//!
//! Neurons and synapses refer to each other through stable indices
//! ([`NeuronId`], [`SynapseId`]) rather than pointers, so the graph has a single
//! owner and no reference cycles.
//!
//! Values flow lazily:
//! - [`Graph::output`] pulls activations forward through incoming synapses,
//!   caching each neuron's output on the way.
//! - [`Graph::delta`] pulls error signals backward through outgoing synapses.
//! - [`Graph::set_output`] / [`Graph::set_delta`] install external values and
//!   invalidate every cache that depends on them, across the whole transitive
//!   closure, so no later read observes a stale value.

use std::collections::HashSet;
use std::fmt;

use crate::error::{NeuroError, Result, ValueKind};
use crate::math::{sigmoid, sigmoid_derivative};
use crate::neuron::{Neuron, Role};
use crate::synapse::{Synapse, SynapseId};

/// Handle to a neuron stored in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronId(pub(crate) usize);

impl NeuronId {
    /// Position of this neuron in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "neuron #{}", self.0)
    }
}

/// Direction of a dependency walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Along outgoing synapses: neurons whose outputs depend on the start.
    Downstream,
    /// Along incoming synapses: neurons whose deltas depend on the start.
    Upstream,
}

/// Owner of all neurons and synapses.
///
/// The graph is acyclic: [`Graph::connect`] rejects any edge that would close
/// a cycle.
///
/// Handles are plain indices: passing an id that did not come from this graph
/// panics on out-of-range access.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    neurons: Vec<Neuron>,
    synapses: Vec<Synapse>,
    /// Set by the first external value. Until then every cache is empty.
    populated: bool,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    // === Construction ===

    /// Add an unconnected neuron.
    pub fn add_neuron(&mut self) -> NeuronId {
        self.neurons.push(Neuron::new());
        NeuronId(self.neurons.len() - 1)
    }

    /// Wire `input -> output` with the given initial weight.
    ///
    /// `output` stops being externally settable and `input` stops accepting a
    /// direct delta. Every cache affected by the new edge is invalidated.
    ///
    /// Fails with [`NeuroError::InvalidTopology`] if `input` is `output` or is
    /// already downstream of it; the graph is left unchanged.
    pub fn connect(&mut self, input: NeuronId, output: NeuronId, weight: f64) -> Result<SynapseId> {
        if self.would_cycle(input, output) {
            return Err(NeuroError::InvalidTopology {
                message: format!("connecting {} to {} would create a cycle", input, output),
            });
        }
        let id = SynapseId(self.synapses.len());
        self.synapses.push(Synapse {
            input,
            output,
            weight,
        });
        self.neurons[input.0].outgoing.push(id);
        self.neurons[output.0].incoming.push(id);
        self.invalidate_through(output);
        Ok(id)
    }

    fn would_cycle(&self, input: NeuronId, output: NeuronId) -> bool {
        if input == output {
            return true;
        }
        // a neuron with nothing downstream cannot reach `input`
        !self.neurons[output.0].outgoing.is_empty()
            && self
                .reachable(&[output], Direction::Downstream)
                .contains(&input)
    }

    // === Accessors ===

    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        &self.neurons[id.0]
    }

    pub fn synapse(&self, id: SynapseId) -> &Synapse {
        &self.synapses[id.0]
    }

    /// All synapses in creation order.
    pub fn synapses(&self) -> &[Synapse] {
        &self.synapses
    }

    /// Ids of all neurons in creation order.
    pub fn neuron_ids(&self) -> impl Iterator<Item = NeuronId> + '_ {
        (0..self.neurons.len()).map(NeuronId)
    }

    /// Ids of all synapses in creation order.
    pub fn synapse_ids(&self) -> impl Iterator<Item = SynapseId> + '_ {
        (0..self.synapses.len()).map(SynapseId)
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    pub fn role(&self, id: NeuronId) -> Role {
        self.neurons[id.0].role()
    }

    pub fn weight(&self, id: SynapseId) -> f64 {
        self.synapses[id.0].weight
    }

    /// Overwrite a weight directly, invalidating every output and delta that
    /// depends on it.
    ///
    /// Training does not go through here: [`Graph::update_input_weights`]
    /// mutates weights in place without touching caches.
    pub fn set_weight(&mut self, id: SynapseId, weight: f64) {
        self.synapses[id.0].weight = weight;
        let output = self.synapses[id.0].output;
        self.invalidate_through(output);
    }

    // === Forward values ===

    /// The activation of `id`.
    ///
    /// Input neurons return the value last given to [`Graph::set_output`], or
    /// [`NeuroError::UnsetValue`] if there is none. Other neurons compute
    /// `sigmoid(sum(weight * input.output))` over their incoming synapses on the
    /// first read since their cache was invalidated.
    pub fn output(&self, id: NeuronId) -> Result<f64> {
        let neuron = &self.neurons[id.0];
        neuron.output.read(|| {
            if neuron.accepts_output() {
                return Err(NeuroError::unset(id, ValueKind::Output));
            }
            let mut sum = 0.0;
            for &s in &neuron.incoming {
                let synapse = &self.synapses[s.0];
                sum += synapse.weight * self.output(synapse.input)?;
            }
            Ok(sigmoid(sum))
        })
    }

    /// Supply the output of an input neuron.
    ///
    /// Fails with [`NeuroError::InvalidRole`] if `id` has incoming synapses.
    /// Otherwise every output downstream of `id` is invalidated.
    ///
    /// Derived deltas are left as they are and still describe the previous
    /// outputs; call [`Graph::invalidate_deltas`] once all inputs are in place.
    pub fn set_output(&mut self, id: NeuronId, value: f64) -> Result<()> {
        if !self.neurons[id.0].accepts_output() {
            return Err(NeuroError::invalid_role(id, ValueKind::Output));
        }
        self.populated = true;
        self.neurons[id.0].output.set(value);
        for dependent in self.reachable(&[id], Direction::Downstream) {
            self.neurons[dependent.0].output.invalidate();
        }
        Ok(())
    }

    // === Backward values ===

    /// The error signal of `id`.
    ///
    /// Output neurons return the value last given to [`Graph::set_delta`], or
    /// [`NeuroError::UnsetValue`] if there is none. Other neurons compute
    /// `sum(weight * next.delta) * output * (1 - output)` over their outgoing
    /// synapses on the first read since their cache was invalidated.
    pub fn delta(&self, id: NeuronId) -> Result<f64> {
        let neuron = &self.neurons[id.0];
        neuron.delta.read(|| {
            if neuron.accepts_delta() {
                return Err(NeuroError::unset(id, ValueKind::Delta));
            }
            let mut sum = 0.0;
            for &s in &neuron.outgoing {
                let synapse = &self.synapses[s.0];
                sum += synapse.weight * self.delta(synapse.output)?;
            }
            Ok(sum * sigmoid_derivative(self.output(id)?))
        })
    }

    /// Supply the delta of an output neuron.
    ///
    /// Fails with [`NeuroError::InvalidRole`] if `id` has outgoing synapses.
    /// Otherwise every delta upstream of `id` is invalidated.
    pub fn set_delta(&mut self, id: NeuronId, value: f64) -> Result<()> {
        if !self.neurons[id.0].accepts_delta() {
            return Err(NeuroError::invalid_role(id, ValueKind::Delta));
        }
        self.populated = true;
        self.neurons[id.0].delta.set(value);
        for dependent in self.reachable(&[id], Direction::Upstream) {
            self.neurons[dependent.0].delta.invalidate();
        }
        Ok(())
    }

    /// Gradient step on every incoming weight of `id`:
    /// `weight += -learning_rate * delta(id) * output(input)`.
    ///
    /// Caches are left alone. Outputs cached before the step keep their
    /// pre-update values until the next [`Graph::set_output`].
    pub fn update_input_weights(&mut self, id: NeuronId, learning_rate: f64) -> Result<()> {
        let count = self.neurons[id.0].incoming.len();
        if count == 0 {
            return Ok(());
        }
        let delta = self.delta(id)?;
        for k in 0..count {
            let s = self.neurons[id.0].incoming[k];
            let activation = self.output(self.synapses[s.0].input)?;
            self.synapses[s.0].weight += -learning_rate * delta * activation;
        }
        Ok(())
    }

    // === Invalidation ===

    /// Drop every derived delta. Externally supplied deltas are kept.
    pub fn invalidate_deltas(&self) {
        for neuron in &self.neurons {
            if !neuron.accepts_delta() {
                neuron.delta.invalidate();
            }
        }
    }

    /// Invalidate everything that depends on the incoming weights of `changed`:
    /// the outputs of `changed` and of everything downstream of it, then the
    /// derived deltas of all those neurons and of everything upstream of them.
    fn invalidate_through(&self, changed: NeuronId) {
        if !self.populated {
            return;
        }
        let mut outputs = vec![changed];
        outputs.extend(self.reachable(&[changed], Direction::Downstream));
        for id in &outputs {
            let neuron = &self.neurons[id.0];
            if !neuron.accepts_output() {
                neuron.output.invalidate();
            }
        }

        let mut deltas: HashSet<NeuronId> = outputs.iter().copied().collect();
        deltas.extend(self.reachable(&outputs, Direction::Upstream));
        for id in deltas {
            let neuron = &self.neurons[id.0];
            if !neuron.accepts_delta() {
                neuron.delta.invalidate();
            }
        }
    }

    /// Every neuron reachable from `starts` in `direction`, each listed once.
    ///
    /// A start neuron only appears if it is also reachable from another start.
    fn reachable(&self, starts: &[NeuronId], direction: Direction) -> Vec<NeuronId> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();

        fn dfs(
            graph: &Graph,
            id: NeuronId,
            direction: Direction,
            visited: &mut HashSet<NeuronId>,
            order: &mut Vec<NeuronId>,
        ) {
            let neuron = &graph.neurons[id.0];
            let edges = match direction {
                Direction::Downstream => &neuron.outgoing,
                Direction::Upstream => &neuron.incoming,
            };
            for &s in edges {
                let synapse = &graph.synapses[s.0];
                let next = match direction {
                    Direction::Downstream => synapse.output,
                    Direction::Upstream => synapse.input,
                };
                if visited.insert(next) {
                    order.push(next);
                    dfs(graph, next, direction, visited, order);
                }
            }
        }

        for &start in starts {
            dfs(self, start, direction, &mut visited, &mut order);
        }
        order
    }
}
