use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::index::basename;
use crate::core::{
    CycleLimits, CycleReport, DependencyGraph, DependencyReason, FileMetrics, FileSymbols,
    GraphAnalyzer, SymbolKind,
};
use crate::error::CppGraphError;

/// Symbols per kind listed on each exported node.
const SYMBOL_EXCERPT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileType {
    Header,
    Source,
    BuildScript,
    JsonData,
    Other,
}

impl FileType {
    pub fn classify(file_path: &str) -> Self {
        if ends_with_any(file_path, &[".h", ".hpp", ".hh"]) {
            FileType::Header
        } else if ends_with_any(file_path, &[".cpp", ".cc", ".cxx", ".c"]) {
            FileType::Source
        } else if file_path.contains("CMakeLists") || file_path.ends_with(".cmake") {
            FileType::BuildScript
        } else if file_path.ends_with(".json") {
            FileType::JsonData
        } else {
            FileType::Other
        }
    }
}

fn ends_with_any(path: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| path.ends_with(suffix))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedSymbol {
    pub name: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub kind: SymbolKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub group: String,
    #[serde(rename = "exportedSymbols")]
    pub exported_symbols: Vec<ExportedSymbol>,
    pub metrics: FileMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub reason: DependencyReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub total_files: usize,
    pub total_dependencies: usize,
    pub circular_dependencies: usize,
}

/// Visualization document: one node per file, one link per edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub metadata: ExportMetadata,
}

pub struct GraphJsonFormatter {
    cycle_limits: CycleLimits,
    pretty: bool,
}

impl GraphJsonFormatter {
    pub fn new() -> Self {
        Self {
            cycle_limits: CycleLimits::default(),
            pretty: true,
        }
    }

    pub fn with_cycle_limits(mut self, cycle_limits: CycleLimits) -> Self {
        self.cycle_limits = cycle_limits;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn export(&self, graph: &DependencyGraph) -> GraphExport {
        let cycles = GraphAnalyzer::new(graph).find_cycles(&self.cycle_limits);
        self.export_with_cycles(graph, &cycles)
    }

    /// Build the document from an already enumerated cycle report.
    pub fn export_with_cycles(&self, graph: &DependencyGraph, cycles: &CycleReport) -> GraphExport {
        let analyzer = GraphAnalyzer::new(graph);

        let nodes: Vec<GraphNode> = graph
            .files()
            .map(|(file_path, symbols)| GraphNode {
                id: file_path.to_string(),
                name: basename(file_path).to_string(),
                file_type: FileType::classify(file_path),
                group: group_of(file_path),
                exported_symbols: exported_symbols(symbols),
                metrics: analyzer.metrics_for(file_path, symbols),
            })
            .collect();

        let links: Vec<GraphLink> = graph
            .dependencies()
            .iter()
            .map(|dep| GraphLink {
                source: dep.source.clone(),
                target: dep.target.clone(),
                reason: dep.reason,
            })
            .collect();

        let metadata = ExportMetadata {
            total_files: nodes.len(),
            total_dependencies: links.len(),
            circular_dependencies: cycles.len(),
        };

        GraphExport {
            nodes,
            links,
            metadata,
        }
    }

    pub fn format_graph(&self, graph: &DependencyGraph) -> Result<String> {
        self.format_export(&self.export(graph))
    }

    pub fn format_export(&self, export: &GraphExport) -> Result<String> {
        let content = if self.pretty {
            serde_json::to_string_pretty(export)?
        } else {
            serde_json::to_string(export)?
        };
        Ok(content)
    }

    pub fn format_to_file(&self, graph: &DependencyGraph, output_path: &Path) -> Result<()> {
        self.write_export(&self.export(graph), output_path)
    }

    pub fn write_export(&self, export: &GraphExport, output_path: &Path) -> Result<()> {
        let json_content = self.format_export(export)?;
        fs::write(output_path, json_content).map_err(|source| CppGraphError::Export {
            path: output_path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

impl Default for GraphJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of the file's parent directory, or `root` at the top level.
fn group_of(file_path: &str) -> String {
    Path::new(file_path)
        .parent()
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string())
}

fn exported_symbols(symbols: &FileSymbols) -> Vec<ExportedSymbol> {
    let functions = symbols
        .functions
        .iter()
        .take(SYMBOL_EXCERPT)
        .map(|func| ExportedSymbol {
            name: format!("{}()", func.name),
            line: func.start_line,
            kind: SymbolKind::Function,
        });
    let classes = symbols
        .classes
        .iter()
        .take(SYMBOL_EXCERPT)
        .map(|class| ExportedSymbol {
            name: format!("class {}", class.name),
            line: class.start_line,
            kind: SymbolKind::Class,
        });
    functions.chain(classes).collect()
}
