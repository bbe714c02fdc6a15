//! Invocation plumbing: resolved arguments, context and results.

use crate::ports::{NodeInputs, NodeValue, PortDescriptor, PortKind};
use crate::{NodeDescriptor, RegistryError};
use rand::RngCore;
use wavegraph_core::{Plot, SampleBuffer, Signal};
use wavegraph_io::Playback;
use wavegraph_nodes::Notifier;

static EMPTY_SIGNAL: Signal = Signal::new();

/// Collaborators available to nodes during invocation.
///
/// Only the noise source, the file input and the export sink touch it.
pub struct NodeContext<'a> {
    /// Randomness for noise generators.
    pub rng: &'a mut dyn RngCore,
    /// Receiver of user-facing feedback.
    pub notifier: &'a mut dyn Notifier,
    /// Consumer of rendered WAV images.
    pub playback: &'a mut dyn Playback,
}

impl<'a> NodeContext<'a> {
    /// Bundles the three collaborators.
    pub fn new(
        rng: &'a mut dyn RngCore,
        notifier: &'a mut dyn Notifier,
        playback: &'a mut dyn Playback,
    ) -> Self {
        Self {
            rng,
            notifier,
            playback,
        }
    }
}

/// The result of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutput {
    /// Every node except the export sink.
    Signal(Signal),
    /// The export sink's quantized samples.
    Samples(SampleBuffer),
}

impl NodeOutput {
    /// Output port name as used in saved graphs.
    pub fn name(&self) -> &'static str {
        match self {
            NodeOutput::Signal(_) => "signal",
            NodeOutput::Samples(_) => "samplesOut",
        }
    }

    /// Type of the output.
    pub fn kind(&self) -> PortKind {
        match self {
            NodeOutput::Signal(_) => PortKind::Signal,
            NodeOutput::Samples(_) => PortKind::Samples,
        }
    }

    /// Number of samples produced.
    pub fn len(&self) -> usize {
        self.plot().len()
    }

    /// True if the output holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visualization feed for the primary output.
    pub fn plot(&self) -> Plot<'_> {
        match self {
            NodeOutput::Signal(s) => Plot::Signal(s),
            NodeOutput::Samples(s) => Plot::Samples(s),
        }
    }

    /// Consumes the output, keeping a signal.
    pub fn into_signal(self) -> Option<Signal> {
        match self {
            NodeOutput::Signal(s) => Some(s),
            NodeOutput::Samples(_) => None,
        }
    }

    /// Consumes the output as a port value.
    pub fn into_value(self) -> NodeValue {
        match self {
            NodeOutput::Signal(s) => NodeValue::Signal(s),
            NodeOutput::Samples(s) => NodeValue::Samples(s),
        }
    }
}

/// Inputs checked against a node's schema, with defaults filled in.
///
/// Getters never fail: [`Args::resolve`] has already rejected missing and
/// mistyped values.
#[derive(Debug)]
pub struct Args<'a> {
    ports: &'static [PortDescriptor],
    inputs: &'a NodeInputs,
    defaults: Vec<Option<NodeValue>>,
}

impl<'a> Args<'a> {
    /// Validates `inputs` against `descriptor`.
    pub fn resolve(
        descriptor: &NodeDescriptor,
        inputs: &'a NodeInputs,
    ) -> Result<Self, RegistryError> {
        for name in inputs.ports() {
            if !descriptor.inputs.iter().any(|p| p.name == name) {
                return Err(RegistryError::UnknownPort {
                    node: descriptor.id,
                    port: name.to_string(),
                });
            }
        }

        let mut defaults = Vec::with_capacity(descriptor.inputs.len());
        for port in descriptor.inputs {
            match inputs.get(port.name) {
                Some(value) if value.fits(port.kind) => defaults.push(None),
                Some(value) => {
                    return Err(RegistryError::TypeMismatch {
                        node: descriptor.id,
                        port: port.name,
                        expected: port.kind,
                        found: value.kind(),
                    });
                }
                None if port.is_required() => {
                    return Err(RegistryError::MissingInput {
                        node: descriptor.id,
                        port: port.name,
                    });
                }
                None => defaults.push(port.default.map(|d| d.to_value())),
            }
        }

        Ok(Self {
            ports: descriptor.inputs,
            inputs,
            defaults,
        })
    }

    fn value(&self, port: &str) -> Option<&NodeValue> {
        self.inputs.get(port).or_else(|| {
            let index = self.ports.iter().position(|p| p.name == port)?;
            self.defaults[index].as_ref()
        })
    }

    /// True if the port was supplied by the caller.
    pub fn is_connected(&self, port: &str) -> bool {
        self.inputs.get(port).is_some()
    }

    /// Signal port value; empty when unconnected.
    pub fn signal(&self, port: &str) -> &Signal {
        match self.value(port) {
            Some(NodeValue::Signal(s)) => s,
            _ => &EMPTY_SIGNAL,
        }
    }

    /// Float port value.
    pub fn float(&self, port: &str) -> f32 {
        match self.value(port) {
            Some(NodeValue::Float(v)) => *v,
            Some(NodeValue::Int(v)) => *v as f32,
            _ => 0.0,
        }
    }

    /// Integer port value.
    pub fn int(&self, port: &str) -> i64 {
        match self.value(port) {
            Some(NodeValue::Int(v)) => *v,
            _ => 0,
        }
    }

    /// Boolean port value.
    pub fn bool(&self, port: &str) -> bool {
        matches!(self.value(port), Some(NodeValue::Bool(true)))
    }

    /// Text port value.
    pub fn text(&self, port: &str) -> &str {
        match self.value(port) {
            Some(NodeValue::Text(v)) => v,
            _ => "",
        }
    }
}
