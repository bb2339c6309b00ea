//! Folio CLI
//!
//! Resolves the properties of a formatting-object tree and prints them, for
//! testing and debugging the property engine.
//!
//! The tree is read from JSON: every node is an object with a `name`, an
//! optional `attributes` map and optional `children`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folio_common::warning::warn_once;
use folio_dom::{AttributesMap, FoTree, NodeId};
use folio_props::{
    fo_registry, parse_literal, FixedMeasurements, Length, PercentBase, PropertyId, PropertyTree,
    ResolvedNode, Resolver, TextDecorations,
};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Folio property inspector for formatting-object trees
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Resolve every property of every node
    folio fixtures/sample.json

    # Only some properties, as JSON
    folio --json -p font-size -p start-indent fixtures/sample.json

    # Only what each node sets itself
    folio --explicit-only fixtures/sample.json

    # Resolve percentages against an A4 page
    folio --page-width 210mm --page-height 297mm fixtures/sample.json
"#)]
struct Cli {
    /// JSON file describing the formatting-object tree
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Print JSON instead of an indented tree
    #[arg(long)]
    json: bool,

    /// Resolve only this property (repeatable)
    #[arg(short = 'p', long = "property", value_name = "NAME")]
    properties: Vec<PropertyId>,

    /// Resolve only the properties each node sets itself
    #[arg(long, conflicts_with = "properties")]
    explicit_only: bool,

    /// Containing-block width for percentages
    #[arg(long, value_name = "LENGTH", value_parser = parse_length)]
    page_width: Option<Length>,

    /// Containing-block height for percentages
    #[arg(long, value_name = "LENGTH", value_parser = parse_length)]
    page_height: Option<Length>,
}

/// One node of the input document.
#[derive(Debug, Deserialize)]
struct NodeSpec {
    name: String,
    #[serde(default)]
    attributes: AttributesMap,
    #[serde(default)]
    children: Vec<NodeSpec>,
}

/// What is printed for one node.
#[derive(Debug, Serialize)]
struct NodeReport {
    #[serde(flatten)]
    resolved: ResolvedNode,
    /// Properties authored on the node itself.
    #[serde(skip)]
    explicit: Vec<PropertyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decorations: Option<TextDecorations>,
}

fn parse_length(text: &str) -> Result<Length, String> {
    parse_literal(text)
        .and_then(|value| value.as_length())
        .filter(Length::is_absolute)
        .ok_or_else(|| format!("`{text}` is not an absolute length"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    let document: NodeSpec = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", cli.path.display()))?;
    let tree = build_tree(&document)?;

    let registry = fo_registry().context("invalid property registry")?;
    let mut measurements = FixedMeasurements::new();
    if let Some(width) = cli.page_width {
        measurements = measurements.with(PercentBase::ContainingBlockWidth, width);
    }
    if let Some(height) = cli.page_height {
        measurements = measurements.with(PercentBase::ContainingBlockHeight, height);
    }
    let resolver = Resolver::new(&registry, &measurements);

    let (properties, errors) = PropertyTree::build(&tree, &resolver);
    for error in &errors {
        eprintln!("{} {}: {}", "error".red().bold(), error.node, error.error);
    }

    let reports = collect_reports(&cli, &properties, &resolver);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(&tree, &reports);
    }
    Ok(())
}

fn build_tree(document: &NodeSpec) -> Result<FoTree> {
    let mut tree = FoTree::new(&document.name, document.attributes.clone());
    append_children(&mut tree, NodeId::ROOT, document)?;
    Ok(tree)
}

fn append_children(tree: &mut FoTree, parent: NodeId, spec: &NodeSpec) -> Result<()> {
    for child in &spec.children {
        let id = tree
            .append_child(parent, &child.name, child.attributes.clone())
            .with_context(|| format!("cannot append <{}> to {parent}", child.name))?;
        append_children(tree, id, child)?;
    }
    Ok(())
}

fn collect_reports(
    cli: &Cli,
    properties: &PropertyTree,
    resolver: &Resolver<'_>,
) -> Vec<NodeReport> {
    let resolved: Vec<ResolvedNode> = if cli.explicit_only {
        (0..properties.len())
            .map(NodeId)
            .filter_map(|node| {
                let ids: Vec<PropertyId> =
                    properties.get(node)?.explicit().map(|(id, _)| id).collect();
                properties.resolve_node(resolver, node, &ids)
            })
            .collect()
    } else if cli.properties.is_empty() {
        properties.resolve_all(resolver, &PropertyId::iter().collect::<Vec<_>>())
    } else {
        properties.resolve_all(resolver, &cli.properties)
    };

    resolved
        .into_iter()
        .map(|resolved| {
            let decorations = properties
                .get(resolved.node)
                .map(|list| TextDecorations::compute(resolver, list))
                .and_then(|computed| match computed {
                    Ok(decorations) => (!decorations.is_empty()).then_some(decorations),
                    Err(err) => {
                        let _ = warn_once("CLI", &format!("{}: {err}", resolved.node));
                        None
                    }
                });
            let explicit: Vec<PropertyId> = properties
                .get(resolved.node)
                .map(|list| list.explicit().map(|(id, _)| id).collect())
                .unwrap_or_default();
            NodeReport {
                resolved,
                explicit,
                decorations,
            }
        })
        .collect()
}

fn print_reports(tree: &FoTree, reports: &[NodeReport]) {
    for report in reports {
        let node = report.resolved.node;
        let indent = "  ".repeat(tree.depth(node));
        println!(
            "{indent}{} {}",
            report.resolved.element.cyan().bold(),
            node.dimmed()
        );
        for (id, value) in &report.resolved.values {
            let marker = if report.explicit.contains(id) { "*" } else { " " };
            let shown = value.to_string();
            match value.specified() {
                Some(text) if text != shown => println!(
                    "{indent} {marker}{}: {shown} {}",
                    id.green(),
                    format!("({text})").dimmed()
                ),
                _ => println!("{indent} {marker}{}: {shown}", id.green()),
            }
        }
        if let Some(decorations) = &report.decorations {
            println!("{indent}  {}: {}", "decorations".yellow(), describe(decorations));
        }
        for (id, err) in &report.resolved.errors {
            println!("{indent}  {}: {err}", id.red());
        }
    }
}

fn describe(decorations: &TextDecorations) -> String {
    let lines = [
        ("underline", decorations.underline),
        ("overline", decorations.overline),
        ("line-through", decorations.line_through),
    ];
    let mut parts: Vec<String> = lines
        .iter()
        .filter_map(|(name, color)| color.map(|color| format!("{name} {color}")))
        .collect();
    if decorations.blink {
        parts.push("blink".to_string());
    }
    parts.join(", ")
}
