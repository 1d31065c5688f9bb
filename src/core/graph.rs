use std::collections::HashSet;
use tracing::debug;

use super::index::SymbolIndex;
use super::resolver::DependencyResolver;
use super::symbols::{Dependency, DependencyReason, FileSymbols};

/// Files plus the edges inferred between them.
///
/// Files are added one at a time; edges are only (re)computed by [`DependencyGraph::analyze`].
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    index: SymbolIndex,
    dependencies: Vec<Dependency>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, file_path: impl Into<String>, symbols: FileSymbols) {
        self.index.add_file(file_path, symbols);
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn file(&self, file_path: &str) -> Option<&FileSymbols> {
        self.index.file(file_path)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &FileSymbols)> {
        self.index.files()
    }

    pub fn file_count(&self) -> usize {
        self.index.file_count()
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Rebuild every edge from scratch.
    ///
    /// Each resolved include yields its own edge. A call edge is only added when the
    /// owning file differs from the caller and no edge of any reason already links
    /// the pair.
    pub fn analyze(&mut self) {
        let resolver = DependencyResolver::new(&self.index);
        let mut dependencies = Vec::new();
        let mut connected: HashSet<(String, String)> = HashSet::new();
        let mut unresolved = 0usize;

        for (source, symbols) in self.index.files() {
            for include in &symbols.includes {
                match resolver.resolve_include(&include.path, source) {
                    Some(target) => {
                        connected.insert((source.to_string(), target.to_string()));
                        dependencies.push(
                            Dependency::new(
                                source.to_string(),
                                target.to_string(),
                                DependencyReason::Include,
                            )
                            .with_line(include.line),
                        );
                    }
                    None => unresolved += 1,
                }
            }

            for called_name in &symbols.called_names {
                for (target, _symbol) in resolver.resolve_callers(called_name) {
                    if target == source {
                        continue;
                    }
                    let pair = (source.to_string(), target.to_string());
                    if connected.contains(&pair) {
                        continue;
                    }
                    connected.insert(pair);
                    dependencies.push(Dependency::new(
                        source.to_string(),
                        target.to_string(),
                        DependencyReason::Call,
                    ));
                }
            }
        }

        debug!(
            edges = dependencies.len(),
            unresolved_includes = unresolved,
            "dependency pass finished"
        );
        self.dependencies = dependencies;
    }
}
