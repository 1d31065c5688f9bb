use anyhow::Result;
use rayon::prelude::*;
use std::path::Path;
use tracing::{info, warn};

use super::scanner::FileInfo;
use super::{DependencyGraph, FileScanner, FileSymbols};
use crate::config::AnalysisConfig;
use crate::parsers::cpp::CppParser;

/// Full batch pass: scan, extract in parallel, merge in scan order, then resolve edges.
pub struct CodebaseAnalyzer {
    file_scanner: FileScanner,
    parser: CppParser,
}

impl CodebaseAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            file_scanner: FileScanner::new(config),
            parser: CppParser::new()?,
        })
    }

    pub fn analyze(&self, root_path: &Path) -> Result<DependencyGraph> {
        info!(root = %root_path.display(), "scanning files");
        let files = self.file_scanner.scan_directory(root_path)?;
        info!("found {} files to analyze", files.len());

        // Extraction is independent per file; collect keeps scan order for the merge.
        let extracted: Vec<FileSymbols> = files
            .par_iter()
            .map(|file_info| self.extract_file(file_info))
            .collect();

        let mut graph = DependencyGraph::new();
        for symbols in extracted {
            let key = symbols.file_path.clone();
            graph.add_file(key, symbols);
        }

        info!("building dependency graph");
        graph.analyze();
        info!(
            files = graph.file_count(),
            dependencies = graph.dependencies().len(),
            "analysis complete"
        );

        Ok(graph)
    }

    /// Extract one file. Unreadable or unparsable files come back empty.
    pub fn extract_file(&self, file_info: &FileInfo) -> FileSymbols {
        match self.parser.parse_file(&file_info.path, &file_info.key) {
            Ok(symbols) => symbols,
            Err(err) => {
                warn!("failed to parse {}: {}", file_info.path.display(), err);
                FileSymbols::new(file_info.key.clone())
            }
        }
    }

    /// Symbols of a single file, keyed by its path as given.
    pub fn analyze_file(&self, path: &Path) -> Result<FileSymbols> {
        let key = path.to_string_lossy();
        Ok(self.parser.parse_file(path, &key)?)
    }
}
