//! Node listing and information command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use wavegraph_registry::{NodeCategory, NodeDescriptor, NodeRegistry};

#[derive(Args)]
pub struct NodesArgs {
    /// Show details for a specific node (id or display name)
    #[arg(value_name = "NODE")]
    node: Option<String>,

    /// Only list nodes of this category
    #[arg(short, long)]
    category: Option<String>,
}

pub fn run(args: NodesArgs) -> anyhow::Result<()> {
    let registry = NodeRegistry::global();

    if let Some(key) = &args.node {
        let node = registry
            .lookup(key)
            .ok_or_else(|| anyhow::anyhow!("Unknown node: {}", key))?;
        print_node(node);
        return Ok(());
    }

    let categories: Vec<NodeCategory> = match &args.category {
        Some(name) => vec![NodeCategory::from_name(name).ok_or_else(|| {
            let known: Vec<_> = NodeCategory::ALL.iter().map(NodeCategory::name).collect();
            anyhow::anyhow!("Unknown category: {} (expected one of {})", name, known.join(", "))
        })?],
        None => NodeCategory::ALL.to_vec(),
    };

    println!("Available Nodes");
    println!("===============");

    for category in categories {
        println!();
        println!("{}:", category.name());
        for node in registry.nodes_in_category(category) {
            println!("  {:20} {:20} - {}", node.id, node.name, node.description);
        }
    }

    println!();
    println!("Use 'wavegraph nodes <node>' for port details.");
    Ok(())
}

fn print_node(node: &NodeDescriptor) {
    println!("{}", node.name);
    println!("{}", "=".repeat(node.name.len()));
    println!();
    println!("{}", node.description);
    println!();
    println!("Id:       {}", node.id);
    println!("Category: {} / {}", node.category.name(), node.subcategory);
    if node.terminal {
        println!("Terminal: yes");
    }
    println!();

    println!("Inputs:");
    println!();
    println!("  {:12}  {:8}  {}", "Name", "Type", "Default");
    println!("  {:12}  {:8}  {}", "----", "----", "-------");
    for port in node.inputs {
        let default = match (&port.default, port.is_required()) {
            (Some(d), _) => d.to_string(),
            (None, true) => "(required)".to_string(),
            (None, false) => "(unconnected)".to_string(),
        };
        println!("  {:12}  {:8}  {}", port.name, port.kind.name(), default);
    }

    println!();
    println!("Outputs:");
    println!();
    for port in node.outputs {
        println!("  {:12}  {}", port.name, port.kind.name());
    }
}
