//! Node registry for the wavegraph engine.
//!
//! This crate provides a centralized, static table of every node the engine
//! offers. Each entry pairs a [`NodeDescriptor`] (display name, palette
//! category, port schema) with a factory that runs the node. An editor builds
//! its palette and property panels from the descriptors; an executor calls
//! [`NodeRegistry::invoke`] with whatever values are wired into the ports.
//!
//! # Features
//!
//! - **Node Discovery**: list all nodes, or the nodes of one category
//! - **Port Schemas**: typed inputs with defaults, named outputs
//! - **Typed Invocation**: inputs are checked before a node runs
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use wavegraph_io::NullPlayback;
//! use wavegraph_nodes::Feedback;
//! use wavegraph_registry::{NodeCategory, NodeContext, NodeInputs, NodeRegistry};
//!
//! let registry = NodeRegistry::global();
//!
//! for node in registry.nodes_in_category(NodeCategory::Tone) {
//!     println!("{}: {}", node.name, node.description);
//! }
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let mut feedback: Vec<Feedback> = Vec::new();
//! let mut player = NullPlayback;
//! let mut ctx = NodeContext::new(&mut rng, &mut feedback, &mut player);
//!
//! let inputs = NodeInputs::new().with("frequency", 440.0).with("length", 0.1);
//! let output = registry.invoke("sine_wave", &inputs, &mut ctx).unwrap();
//! assert_eq!(output.len(), 4410);
//! ```

mod builtin;
mod invoke;
mod ports;

pub use invoke::{Args, NodeContext, NodeOutput};
pub use ports::{NodeInputs, NodeValue, PortDefault, PortDescriptor, PortKind};

use std::sync::OnceLock;

/// Palette category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// Constants, ramps and remapping.
    Math,
    /// Terminal export/playback sink.
    Output,
    /// Periodic oscillators.
    Tone,
    /// Random sources.
    Noise,
    /// Two-input combinators.
    Mixers,
    /// File sources.
    Inputs,
    /// Single-input transforms.
    Filters,
    /// Spectral transforms.
    Fft,
}

impl NodeCategory {
    /// All categories in palette order.
    pub const ALL: [NodeCategory; 8] = [
        NodeCategory::Math,
        NodeCategory::Output,
        NodeCategory::Tone,
        NodeCategory::Noise,
        NodeCategory::Mixers,
        NodeCategory::Inputs,
        NodeCategory::Filters,
        NodeCategory::Fft,
    ];

    /// Returns the category's display name.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeCategory::Math => "Math",
            NodeCategory::Output => "Output",
            NodeCategory::Tone => "Tone",
            NodeCategory::Noise => "Noise",
            NodeCategory::Mixers => "Mixers",
            NodeCategory::Inputs => "Inputs",
            NodeCategory::Filters => "Filters",
            NodeCategory::Fft => "FFT",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

/// Describes a node in the registry.
#[derive(Debug, Clone)]
pub struct NodeDescriptor {
    /// Unique identifier (lowercase, underscores).
    pub id: &'static str,
    /// Display name as stored in saved graphs.
    pub name: &'static str,
    /// Palette category.
    pub category: NodeCategory,
    /// Palette subcategory.
    pub subcategory: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// True for exit nodes that end a graph.
    pub terminal: bool,
    /// Input ports in declaration order.
    pub inputs: &'static [PortDescriptor],
    /// Output ports; the first is the primary, visualizable one.
    pub outputs: &'static [PortDescriptor],
}

impl NodeDescriptor {
    /// Input port by name.
    pub fn input(&self, name: &str) -> Option<&PortDescriptor> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// First input port of the given kind.
    pub fn first_input_of(&self, kind: PortKind) -> Option<&PortDescriptor> {
        self.inputs.iter().find(|p| p.kind == kind)
    }

    /// The primary output port.
    pub fn primary_output(&self) -> Option<&PortDescriptor> {
        self.outputs.first()
    }
}

/// Errors raised while resolving or invoking a node.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// No node has this id or display name.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// The node has no input port of this name.
    #[error("node '{node}' has no input port '{port}'")]
    UnknownPort {
        /// Node id.
        node: &'static str,
        /// Port name that was supplied.
        port: String,
    },

    /// A supplied value has the wrong type.
    #[error("node '{node}' port '{port}' expects {expected}, got {found}")]
    TypeMismatch {
        /// Node id.
        node: &'static str,
        /// Port name.
        port: &'static str,
        /// Declared port type.
        expected: PortKind,
        /// Type of the supplied value.
        found: PortKind,
    },

    /// A scalar port without a default was left unset.
    #[error("node '{node}' requires a value for '{port}'")]
    MissingInput {
        /// Node id.
        node: &'static str,
        /// Port name.
        port: &'static str,
    },
}

/// Factory function type for running nodes.
type NodeFactory = fn(&Args<'_>, &mut NodeContext<'_>) -> NodeOutput;

/// Internal entry in the registry.
struct RegistryEntry {
    descriptor: NodeDescriptor,
    factory: NodeFactory,
}

/// Registry of all available nodes.
///
/// All built-in nodes are registered on construction. Use
/// [`NodeRegistry::global`] for the shared, lazily built instance.
pub struct NodeRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRegistry {
    /// Create a new registry with all built-in nodes registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(28),
        };
        builtin::register_all(&mut registry);
        registry
    }

    /// Process-wide registry, built on first use.
    pub fn global() -> &'static NodeRegistry {
        static REGISTRY: OnceLock<NodeRegistry> = OnceLock::new();
        REGISTRY.get_or_init(NodeRegistry::new)
    }

    /// Register a node with the registry.
    fn register(&mut self, descriptor: NodeDescriptor, factory: NodeFactory) {
        debug_assert!(
            self.get(descriptor.id).is_none(),
            "duplicate node id {}",
            descriptor.id
        );
        self.entries.push(RegistryEntry {
            descriptor,
            factory,
        });
    }

    /// Returns descriptors for all registered nodes.
    pub fn all_nodes(&self) -> Vec<&NodeDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Returns descriptors for nodes in a specific category.
    pub fn nodes_in_category(&self, category: NodeCategory) -> Vec<&NodeDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.descriptor.category == category)
            .map(|e| &e.descriptor)
            .collect()
    }

    /// Get a descriptor by node ID.
    pub fn get(&self, id: &str) -> Option<&NodeDescriptor> {
        self.entry(id).map(|e| &e.descriptor)
    }

    /// Get a descriptor by display name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&NodeDescriptor> {
        self.entries
            .iter()
            .find(|e| e.descriptor.name.eq_ignore_ascii_case(name))
            .map(|e| &e.descriptor)
    }

    /// Get a descriptor by ID, falling back to display name.
    pub fn lookup(&self, key: &str) -> Option<&NodeDescriptor> {
        self.get(key).or_else(|| self.find_by_name(key))
    }

    fn entry(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.descriptor.id == id)
    }

    /// Runs a node.
    ///
    /// `key` is a node ID or display name. Inputs are checked against the
    /// node's schema first: unknown ports, mistyped values and unset required
    /// scalars are rejected without running the node.
    pub fn invoke(
        &self,
        key: &str,
        inputs: &NodeInputs,
        ctx: &mut NodeContext<'_>,
    ) -> Result<NodeOutput, RegistryError> {
        let entry = self
            .entry(key)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.descriptor.name.eq_ignore_ascii_case(key))
            })
            .ok_or_else(|| RegistryError::UnknownNode(key.to_string()))?;

        let args = Args::resolve(&entry.descriptor, inputs)?;
        let output = (entry.factory)(&args, ctx);
        tracing::debug!(
            node = entry.descriptor.id,
            inputs = inputs.len(),
            output_len = output.len(),
            "invoke"
        );
        Ok(output)
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
