use serde::{Deserialize, Serialize};

use super::cycles::{CycleLimits, CycleReport, FileGraph};
use super::graph::DependencyGraph;
use super::symbols::FileSymbols;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub file: String,
    pub functions_count: usize,
    pub classes_count: usize,
    pub structs_count: usize,
    pub includes_count: usize,
    pub dependencies_count: usize,
    pub dependents_count: usize,
    pub coupling: usize,
}

/// Read-only queries over an analyzed [`DependencyGraph`].
///
/// Nothing is cached: every call scans the current edge list.
pub struct GraphAnalyzer<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> GraphAnalyzer<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    /// Targets of every edge leaving `file`, one entry per edge.
    pub fn dependencies_of(&self, file: &str) -> Vec<&'g str> {
        self.graph
            .dependencies()
            .iter()
            .filter(|dep| dep.source == file)
            .map(|dep| dep.target.as_str())
            .collect()
    }

    /// Sources of every edge entering `file`, one entry per edge.
    pub fn dependents_of(&self, file: &str) -> Vec<&'g str> {
        self.graph
            .dependencies()
            .iter()
            .filter(|dep| dep.target == file)
            .map(|dep| dep.source.as_str())
            .collect()
    }

    pub fn metrics(&self, file: &str) -> Option<FileMetrics> {
        self.graph
            .file(file)
            .map(|symbols| self.metrics_for(file, symbols))
    }

    pub(crate) fn metrics_for(&self, file: &str, symbols: &FileSymbols) -> FileMetrics {
        let dependencies_count = self.dependencies_of(file).len();
        let dependents_count = self.dependents_of(file).len();
        FileMetrics {
            file: file.to_string(),
            functions_count: symbols.functions.len(),
            classes_count: symbols.classes.len(),
            structs_count: symbols.structs.len(),
            includes_count: symbols.includes.len(),
            dependencies_count,
            dependents_count,
            coupling: dependencies_count + dependents_count,
        }
    }

    /// Every simple cycle, with include and call edges merged and parallel edges collapsed.
    pub fn find_cycles(&self, limits: &CycleLimits) -> CycleReport {
        FileGraph::from_dependencies(self.graph.index().file_paths(), self.graph.dependencies())
            .find_cycles(limits)
    }

    /// Files by descending coupling; ties keep insertion order.
    pub fn most_coupled(&self, limit: usize) -> Vec<(&'g str, usize)> {
        let mut ranked: Vec<(&'g str, usize)> = self
            .graph
            .files()
            .map(|(file, _)| {
                let coupling = self.dependencies_of(file).len() + self.dependents_of(file).len();
                (file, coupling)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}
