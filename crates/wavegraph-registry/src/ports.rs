//! Port schemas and the values that flow through them.

use std::collections::HashMap;
use std::fmt;
use wavegraph_core::{SampleBuffer, Signal};

/// Type of a node port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// Floating-point signal.
    Signal,
    /// 16-bit PCM buffer.
    Samples,
    /// Scalar `f32`.
    Float,
    /// Scalar integer.
    Int,
    /// Boolean flag.
    Bool,
    /// Text, such as a file path.
    Text,
}

impl PortKind {
    /// Lowercase type name.
    pub const fn name(&self) -> &'static str {
        match self {
            PortKind::Signal => "signal",
            PortKind::Samples => "samples",
            PortKind::Float => "float",
            PortKind::Int => "int",
            PortKind::Bool => "bool",
            PortKind::Text => "text",
        }
    }

    /// True for the stream types that connect nodes to each other.
    pub const fn is_stream(&self) -> bool {
        matches!(self, PortKind::Signal | PortKind::Samples)
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default value of a scalar port.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PortDefault {
    /// Float default.
    Float(f32),
    /// Integer default.
    Int(i64),
    /// Boolean default.
    Bool(bool),
    /// Text default.
    Text(&'static str),
}

impl PortDefault {
    /// Owned value for this default.
    pub fn to_value(self) -> NodeValue {
        match self {
            PortDefault::Float(v) => NodeValue::Float(v),
            PortDefault::Int(v) => NodeValue::Int(v),
            PortDefault::Bool(v) => NodeValue::Bool(v),
            PortDefault::Text(v) => NodeValue::Text(v.to_string()),
        }
    }
}

impl fmt::Display for PortDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDefault::Float(v) => write!(f, "{v}"),
            PortDefault::Int(v) => write!(f, "{v}"),
            PortDefault::Bool(v) => write!(f, "{v}"),
            PortDefault::Text(v) => write!(f, "\"{v}\""),
        }
    }
}

/// One named, typed port.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortDescriptor {
    /// Port name as used in saved graphs.
    pub name: &'static str,
    /// Accepted value type.
    pub kind: PortKind,
    /// Value used when the port is left unset. Stream ports never have one.
    pub default: Option<PortDefault>,
}

impl PortDescriptor {
    /// Signal port; reads as an empty signal when unconnected.
    pub const fn signal(name: &'static str) -> Self {
        Self {
            name,
            kind: PortKind::Signal,
            default: None,
        }
    }

    /// Sample-buffer port.
    pub const fn samples(name: &'static str) -> Self {
        Self {
            name,
            kind: PortKind::Samples,
            default: None,
        }
    }

    /// Required float.
    pub const fn float(name: &'static str) -> Self {
        Self {
            name,
            kind: PortKind::Float,
            default: None,
        }
    }

    /// Float with a default.
    pub const fn float_or(name: &'static str, default: f32) -> Self {
        Self {
            name,
            kind: PortKind::Float,
            default: Some(PortDefault::Float(default)),
        }
    }

    /// Integer with a default.
    pub const fn int_or(name: &'static str, default: i64) -> Self {
        Self {
            name,
            kind: PortKind::Int,
            default: Some(PortDefault::Int(default)),
        }
    }

    /// Boolean with a default.
    pub const fn bool_or(name: &'static str, default: bool) -> Self {
        Self {
            name,
            kind: PortKind::Bool,
            default: Some(PortDefault::Bool(default)),
        }
    }

    /// Required text.
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: PortKind::Text,
            default: None,
        }
    }

    /// Text with a default.
    pub const fn text_or(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: PortKind::Text,
            default: Some(PortDefault::Text(default)),
        }
    }

    /// True when invocation fails if this port is unset.
    pub fn is_required(&self) -> bool {
        !self.kind.is_stream() && self.default.is_none()
    }
}

/// A value supplied to or produced by a port.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// Floating-point signal.
    Signal(Signal),
    /// 16-bit PCM buffer.
    Samples(SampleBuffer),
    /// Scalar `f32`.
    Float(f32),
    /// Scalar integer.
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// Text.
    Text(String),
}

impl NodeValue {
    /// Type of this value.
    pub fn kind(&self) -> PortKind {
        match self {
            NodeValue::Signal(_) => PortKind::Signal,
            NodeValue::Samples(_) => PortKind::Samples,
            NodeValue::Float(_) => PortKind::Float,
            NodeValue::Int(_) => PortKind::Int,
            NodeValue::Bool(_) => PortKind::Bool,
            NodeValue::Text(_) => PortKind::Text,
        }
    }

    /// Whether this value may feed a port of `kind`.
    ///
    /// Integers are accepted by float ports; every other pairing must match.
    pub fn fits(&self, kind: PortKind) -> bool {
        self.kind() == kind || (kind == PortKind::Float && matches!(self, NodeValue::Int(_)))
    }

    /// Parses command-line text as a value of `kind`.
    ///
    /// Stream kinds cannot be written as text and return `None`.
    pub fn parse(kind: PortKind, text: &str) -> Option<Self> {
        let text = text.trim();
        match kind {
            PortKind::Float => text.parse().ok().map(NodeValue::Float),
            PortKind::Int => text.parse().ok().map(NodeValue::Int),
            PortKind::Bool => match text.to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(NodeValue::Bool(true)),
                "false" | "no" | "off" | "0" => Some(NodeValue::Bool(false)),
                _ => None,
            },
            PortKind::Text => Some(NodeValue::Text(text.to_string())),
            PortKind::Signal | PortKind::Samples => None,
        }
    }
}

impl From<Signal> for NodeValue {
    fn from(v: Signal) -> Self {
        NodeValue::Signal(v)
    }
}

impl From<SampleBuffer> for NodeValue {
    fn from(v: SampleBuffer) -> Self {
        NodeValue::Samples(v)
    }
}

impl From<f32> for NodeValue {
    fn from(v: f32) -> Self {
        NodeValue::Float(v)
    }
}

/// Narrowed to `f32`; lets bare float literals feed [`NodeInputs::with`].
impl From<f64> for NodeValue {
    fn from(v: f64) -> Self {
        NodeValue::Float(v as f32)
    }
}

impl From<i64> for NodeValue {
    fn from(v: i64) -> Self {
        NodeValue::Int(v)
    }
}

impl From<i32> for NodeValue {
    fn from(v: i32) -> Self {
        NodeValue::Int(i64::from(v))
    }
}

impl From<bool> for NodeValue {
    fn from(v: bool) -> Self {
        NodeValue::Bool(v)
    }
}

impl From<&str> for NodeValue {
    fn from(v: &str) -> Self {
        NodeValue::Text(v.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(v: String) -> Self {
        NodeValue::Text(v)
    }
}

/// Values supplied to a node, keyed by port name.
///
/// Ports that are absent are treated as unconnected.
///
/// ```rust
/// use wavegraph_registry::NodeInputs;
///
/// let inputs = NodeInputs::new()
///     .with("frequency", 440.0)
///     .with("length", 0.5);
/// assert!(inputs.get("frequency").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInputs {
    values: HashMap<String, NodeValue>,
}

impl NodeInputs {
    /// No inputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, port: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.set(port, value);
        self
    }

    /// Sets a port value, replacing any previous one.
    pub fn set(&mut self, port: impl Into<String>, value: impl Into<NodeValue>) {
        self.values.insert(port.into(), value.into());
    }

    /// Value of a port, if supplied.
    pub fn get(&self, port: &str) -> Option<&NodeValue> {
        self.values.get(port)
    }

    /// Removes and returns a port value.
    pub fn remove(&mut self, port: &str) -> Option<NodeValue> {
        self.values.remove(port)
    }

    /// Supplied port names, in no particular order.
    pub fn ports(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of supplied ports.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no port is supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
