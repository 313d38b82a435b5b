//! live-dom command line
//!
//! Loads a document from a JSON element tree, optionally runs a script of tool invocations
//! against it, and prints the resulting collections report.

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use live_dom::tools::CollectionsReport;
use live_dom::{Document, DocumentOptions, ElementNode, StyleSheet, ToolContext, ToolRegistry};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "live-dom")]
#[command(version)]
#[command(about = "Build a document from a JSON element tree and report its live collections", long_about = None)]
struct Cli {
    /// JSON element tree to load
    #[arg(value_name = "DOCUMENT")]
    document: Option<PathBuf>,

    /// JSON document options (url, quirks_mode, scripting, embedded)
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// JSON array of {"tool": name, "params": {...}} steps run before reporting
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Style sheet to parse and print in canonical form
    #[arg(long, value_name = "PATH")]
    stylesheet: Option<PathBuf>,

    /// Print the available tools with their parameter schemas
    #[arg(long)]
    list_tools: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Deserialize)]
struct ScriptStep {
    tool: String,
    #[serde(default = "empty_params")]
    params: Value,
}

fn empty_params() -> Value {
    Value::Object(Default::default())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let registry = ToolRegistry::with_defaults();

    if cli.list_tools {
        for name in registry.names() {
            let schema = registry.schema(name).unwrap_or_default();
            println!("{}\n{}\n", name, serde_json::to_string_pretty(&schema)?);
        }
        return Ok(());
    }

    if let Some(path) = &cli.stylesheet {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let sheet = StyleSheet::parse(&text).with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Parsed {} rules from {}", sheet.len(), path.display());
        println!("{}", sheet.to_css());
    }

    let Some(document_path) = &cli.document else {
        if cli.stylesheet.is_none() {
            bail!("no document given (see --help)");
        }
        return Ok(());
    };

    let options: DocumentOptions = match &cli.options {
        Some(path) => read_json(path)?,
        None => DocumentOptions::default(),
    };
    let root: ElementNode = read_json(document_path)?;
    let mut document = Document::from_tree(&root, options).context("building document")?;
    log::info!(
        "Loaded {} elements from {}",
        root.count_elements(),
        document_path.display()
    );

    if let Some(path) = &cli.script {
        let steps: Vec<ScriptStep> = read_json(path)?;
        let mut context = ToolContext::new(&mut document);

        for (i, step) in steps.into_iter().enumerate() {
            let result = registry
                .execute(&step.tool, step.params, &mut context)
                .with_context(|| format!("step {} ({})", i + 1, step.tool))?;
            log::info!("Step {} ({}): {}", i + 1, step.tool, serde_json::to_string(&result)?);
        }
    }

    let report = CollectionsReport::from_document(&document);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
