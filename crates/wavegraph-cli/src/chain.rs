//! Linear node chains.
//!
//! A chain is written `node:key=value,key=value|node:...`. Nodes are looked
//! up by registry id or display name. Each node's primary output feeds the
//! first signal port of the next node.

use wavegraph_nodes::ProcessSettings;
use wavegraph_registry::{
    NodeContext, NodeDescriptor, NodeInputs, NodeOutput, NodeRegistry, NodeValue, PortKind,
    RegistryError,
};

/// Error type for chain parsing and execution.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Chain is empty")]
    Empty,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown parameter '{param}' for node '{node}'")]
    UnknownParameter { node: String, param: String },

    #[error("Invalid value for '{param}': '{value}' is not a valid {kind}")]
    InvalidValue {
        param: String,
        value: String,
        kind: PortKind,
    },

    #[error("'{node}' ends a chain and cannot feed '{next}'")]
    TerminalNotLast { node: String, next: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One parsed chain element.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStep {
    /// Node id or display name.
    pub node: String,
    /// `key=value` pairs in written order.
    pub params: Vec<(String, String)>,
}

/// Parse a chain specification.
pub fn parse_chain(spec: &str) -> Result<Vec<ChainStep>, ChainError> {
    let steps = spec
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_step)
        .collect::<Result<Vec<_>, _>>()?;

    if steps.is_empty() {
        return Err(ChainError::Empty);
    }
    Ok(steps)
}

/// Format: "node_name:param1=value1,param2=value2"
fn parse_step(spec: &str) -> Result<ChainStep, ChainError> {
    let (node, params) = match spec.split_once(':') {
        Some((node, params)) => (node.trim(), parse_params(params)?),
        None => (spec.trim(), Vec::new()),
    };

    if node.is_empty() {
        return Err(ChainError::ParseError(format!(
            "Missing node name in '{spec}'"
        )));
    }

    Ok(ChainStep {
        node: node.to_string(),
        params,
    })
}

fn parse_params(params_str: &str) -> Result<Vec<(String, String)>, ChainError> {
    let mut params = Vec::new();

    for param in params_str.split(',') {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }

        let Some((key, value)) = param.split_once('=') else {
            return Err(ChainError::ParseError(format!(
                "Invalid parameter format: '{param}' (expected key=value)"
            )));
        };
        params.push((key.trim().to_string(), value.trim().to_string()));
    }

    Ok(params)
}

/// Builds the inputs of one step from its upstream output and its parameters.
///
/// Written parameters win over the upstream connection.
fn build_inputs(
    descriptor: &NodeDescriptor,
    step: &ChainStep,
    upstream: Option<NodeOutput>,
    export: &ProcessSettings,
) -> Result<NodeInputs, ChainError> {
    let mut inputs = NodeInputs::new();

    if descriptor.terminal {
        inputs.set("scale", i64::from(export.scale));
        inputs.set("play", export.play);
        inputs.set("export", export.export);
        inputs.set("path", export.path.display().to_string());
    }

    if let Some(signal) = upstream.and_then(NodeOutput::into_signal) {
        match descriptor.first_input_of(PortKind::Signal) {
            Some(port) => inputs.set(port.name, signal),
            None => tracing::warn!(
                node = descriptor.id,
                "node has no signal input, upstream output dropped"
            ),
        }
    }

    for (key, value) in &step.params {
        let port = descriptor
            .input(key)
            .ok_or_else(|| ChainError::UnknownParameter {
                node: descriptor.id.to_string(),
                param: key.clone(),
            })?;
        let parsed =
            NodeValue::parse(port.kind, value).ok_or_else(|| ChainError::InvalidValue {
                param: key.clone(),
                value: value.clone(),
                kind: port.kind,
            })?;
        inputs.set(port.name, parsed);
    }

    Ok(inputs)
}

/// Runs `steps` in order and returns the last node's output.
///
/// `export` supplies the defaults of a terminal sink step.
pub fn run_chain(
    steps: &[ChainStep],
    export: &ProcessSettings,
    ctx: &mut NodeContext<'_>,
) -> Result<NodeOutput, ChainError> {
    let registry = NodeRegistry::global();
    let mut previous: Option<(&NodeDescriptor, NodeOutput)> = None;

    for step in steps {
        let descriptor = registry
            .lookup(&step.node)
            .ok_or_else(|| RegistryError::UnknownNode(step.node.clone()))?;

        let upstream = match previous.take() {
            Some((prev, _)) if prev.terminal => {
                return Err(ChainError::TerminalNotLast {
                    node: prev.id.to_string(),
                    next: descriptor.id.to_string(),
                });
            }
            Some((_, output)) => Some(output),
            None => None,
        };

        let inputs = build_inputs(descriptor, step, upstream, export)?;
        let output = registry.invoke(descriptor.id, &inputs, ctx)?;
        tracing::info!(node = descriptor.id, samples = output.len(), "chain step");
        previous = Some((descriptor, output));
    }

    previous.map(|(_, output)| output).ok_or(ChainError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wavegraph_io::NullPlayback;
    use wavegraph_nodes::Feedback;

    fn run(spec: &str, export: &ProcessSettings) -> Result<NodeOutput, ChainError> {
        let steps = parse_chain(spec)?;
        let mut rng = StdRng::seed_from_u64(0);
        let mut feedback: Vec<Feedback> = Vec::new();
        let mut player = NullPlayback;
        let mut ctx = NodeContext::new(&mut rng, &mut feedback, &mut player);
        run_chain(&steps, export, &mut ctx)
    }

    fn quiet_export(path: &std::path::Path) -> ProcessSettings {
        ProcessSettings {
            play: false,
            path: path.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_chain() {
        let steps = parse_chain("sine_wave:frequency=440,length=0.5|invert|volume:volume=0.2")
            .unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].node, "sine_wave");
        assert_eq!(
            steps[0].params,
            vec![
                ("frequency".to_string(), "440".to_string()),
                ("length".to_string(), "0.5".to_string())
            ]
        );
        assert!(steps[1].params.is_empty());
        assert_eq!(steps[2].node, "volume");
    }

    #[test]
    fn test_parse_chain_whitespace_and_empty_steps() {
        let steps = parse_chain(" Sine Wave : length = 1 || invert ").unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].node, "Sine Wave");
        assert_eq!(steps[0].params[0], ("length".into(), "1".into()));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_chain(""), Err(ChainError::Empty)));
        assert!(matches!(parse_chain(" | "), Err(ChainError::Empty)));
        assert!(matches!(
            parse_chain("sine_wave:frequency"),
            Err(ChainError::ParseError(_))
        ));
        assert!(matches!(parse_chain(":length=1"), Err(ChainError::ParseError(_))));
    }

    #[test]
    fn test_run_feeds_first_signal_port() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = run(
            "constant:value=0.5,length=0.01|volume:volume=2|invert",
            &quiet_export(&dir.path().join("x.wav")),
        )
        .unwrap();
        let signal = out.into_signal().unwrap();
        assert_eq!(signal.len(), 441);
        assert!(signal.iter().all(|&v| v == -1.0));
    }

    #[test]
    fn test_sink_uses_export_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chain.wav");
        let mut export = quiet_export(&path);
        export.scale = 2;

        let out = run("int16_max:length=0.001|volume:volume=0.5|process", &export).unwrap();
        assert_eq!(out.len(), 44);
        assert!(path.exists());
        match out {
            NodeOutput::Samples(samples) => assert_eq!(samples.data()[0], 32767),
            NodeOutput::Signal(_) => panic!("sink should produce samples"),
        }
    }

    #[test]
    fn test_written_params_override_export_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let default_path = dir.path().join("default.wav");
        let out = run(
            "constant:value=1,length=0.001|process:export=false,scale=10",
            &quiet_export(&default_path),
        )
        .unwrap();
        assert!(!default_path.exists());
        match out {
            NodeOutput::Samples(samples) => assert_eq!(samples.data()[0], 10),
            NodeOutput::Signal(_) => panic!("sink should produce samples"),
        }
    }

    #[test]
    fn test_unknown_node() {
        let err = run("warp_drive", &ProcessSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            ChainError::Registry(RegistryError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_unknown_parameter() {
        let err = run("invert:drive=3", &ProcessSettings::default()).unwrap_err();
        assert!(matches!(err, ChainError::UnknownParameter { .. }));
    }

    #[test]
    fn test_invalid_value() {
        let err = run("sine_wave:frequency=high", &ProcessSettings::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'frequency': 'high' is not a valid float"
        );
    }

    #[test]
    fn test_signal_ports_cannot_be_written() {
        let err = run("invert:signalIn=1", &ProcessSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            ChainError::InvalidValue {
                kind: PortKind::Signal,
                ..
            }
        ));
    }

    #[test]
    fn test_terminal_must_be_last() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = run(
            "constant:value=1,length=0.001|process|invert",
            &quiet_export(&dir.path().join("x.wav")),
        )
        .unwrap_err();
        assert!(matches!(err, ChainError::TerminalNotLast { .. }));
    }

    #[test]
    fn test_missing_required_scalar() {
        let err = run("linear:slope=1", &ProcessSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            ChainError::Registry(RegistryError::MissingInput {
                port: "yIntercept",
                ..
            })
        ));
    }
}
