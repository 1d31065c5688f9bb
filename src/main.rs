use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cppgraph::config::AnalysisConfig;
use cppgraph::core::{CodebaseAnalyzer, FileSymbols, GraphAnalyzer, Symbol};
use cppgraph::formatters::GraphJsonFormatter;

const DEFAULT_OUTPUT_NAME: &str = "dependency_graph.json";
const CYCLES_SHOWN: usize = 5;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "cppgraph",
    version = "0.1.0",
    about = "Cross-file dependency graphs for C++ codebases"
)]
struct Cli {
    /// Directory to analyze, or a single file to summarize
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Export file path (defaults to <input>/dependency_graph.json)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file (defaults to <input>/cppgraph.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop cycle enumeration after this many cycles
    #[arg(long, value_name = "N")]
    max_cycles: Option<usize>,

    /// Only report cycles with at most this many files
    #[arg(long, value_name = "N")]
    max_cycle_length: Option<usize>,

    /// Number of most-coupled files to list
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("CPPGRAPH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let analyzer = CodebaseAnalyzer::new(&config)?;

    if cli.input.is_file() {
        let symbols = analyzer.analyze_file(&cli.input)?;
        print_file_symbols(&symbols);
        return Ok(());
    }

    let start_time = Instant::now();
    let graph = analyzer
        .analyze(&cli.input)
        .with_context(|| format!("failed to analyze {}", cli.input.display()))?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.join(DEFAULT_OUTPUT_NAME));
    let graph_analyzer = GraphAnalyzer::new(&graph);
    let cycles = graph_analyzer.find_cycles(&config.cycles);

    let formatter = GraphJsonFormatter::new().with_cycle_limits(config.cycles);
    let export = formatter.export_with_cycles(&graph, &cycles);
    formatter.write_export(&export, &output)?;

    let metadata = &export.metadata;
    println!("Analyzed {} files", metadata.total_files);
    println!("Found {} dependencies", metadata.total_dependencies);
    if cycles.truncated {
        println!("Found at least {} circular dependencies", metadata.circular_dependencies);
    } else {
        println!("Found {} circular dependencies", metadata.circular_dependencies);
    }
    for cycle in cycles.cycles.iter().take(CYCLES_SHOWN) {
        println!("  {}", format_cycle(cycle));
    }

    println!("Most coupled files:");
    for (file, coupling) in graph_analyzer.most_coupled(config.top_coupled) {
        println!("  {file}: {coupling}");
    }

    println!("Graph written to {}", output.display());
    println!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::load(config_root(&cli.input)),
    };

    if let Some(max_cycles) = cli.max_cycles {
        config.cycles.max_cycles = Some(max_cycles);
    }
    if let Some(max_cycle_length) = cli.max_cycle_length {
        config.cycles.max_cycle_length = Some(max_cycle_length);
    }
    if let Some(top) = cli.top {
        config.top_coupled = top;
    }

    Ok(config)
}

fn config_root(input: &Path) -> &Path {
    if input.is_file() {
        input.parent().unwrap_or(input)
    } else {
        input
    }
}

/// `a.h -> b.h -> a.h`
fn format_cycle(cycle: &[String]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        parts.push(first.as_str());
    }
    parts.join(" -> ")
}

fn print_file_symbols(symbols: &FileSymbols) {
    println!("File: {}", symbols.file_path);

    println!("Includes ({}):", symbols.includes.len());
    for include in &symbols.includes {
        let (open, close) = if include.is_system { ('<', '>') } else { ('"', '"') };
        println!("  line {}: {open}{}{close}", include.line, include.path);
    }

    println!("Functions ({}):", symbols.functions.len());
    for func in &symbols.functions {
        let mut modifiers = Vec::new();
        if func.is_template {
            modifiers.push("template");
        }
        if func.is_static {
            modifiers.push("static");
        }
        if func.is_virtual {
            modifiers.push("virtual");
        }
        let prefix = if modifiers.is_empty() {
            String::new()
        } else {
            format!("{} ", modifiers.join(" "))
        };
        let return_type = func.return_type.as_deref().unwrap_or("");
        println!(
            "  {prefix}{return_type} {}({}) [{}]",
            qualified(func),
            func.params.join(", "),
            span(func)
        );
    }

    for (label, list) in [
        ("Classes", &symbols.classes),
        ("Structs", &symbols.structs),
        ("Namespaces", &symbols.namespaces),
    ] {
        println!("{label} ({}):", list.len());
        for symbol in list {
            println!("  {} [{}]", qualified(symbol), span(symbol));
        }
    }

    println!("Called names ({}):", symbols.called_names.len());
    for name in &symbols.called_names {
        println!("  {name}");
    }
}

fn qualified(symbol: &Symbol) -> String {
    match &symbol.scope {
        Some(scope) => format!("{scope}::{}", symbol.name),
        None => symbol.name.clone(),
    }
}

fn span(symbol: &Symbol) -> String {
    format!("lines {}-{}", symbol.start_line, symbol.end_line)
}
