use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::AnalysisConfig;

#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    /// Path relative to the scanned root, with `/` separators. Used as the graph key.
    pub key: String,
}

pub struct FileScanner {
    extensions: Vec<String>,
    exclude_dirs: Vec<String>,
}

impl FileScanner {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            extensions: config
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            exclude_dirs: config.exclude_dirs.clone(),
        }
    }

    /// Files under `root_path` with a configured extension, sorted by path so that
    /// repeated scans of the same tree enumerate identically.
    pub fn scan_directory(&self, root_path: &Path) -> Result<Vec<FileInfo>> {
        let entries: Vec<DirEntry> = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry))
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .collect();

        let files: Vec<FileInfo> = entries
            .par_iter()
            .filter(|entry| self.has_supported_extension(entry.path()))
            .map(|entry| FileInfo {
                path: entry.path().to_path_buf(),
                key: relative_key(root_path, entry.path()),
            })
            .collect();

        Ok(files)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .map(|name| self.exclude_dirs.iter().any(|excluded| excluded == name))
                .unwrap_or(false)
    }

    fn has_supported_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|supported| *supported == ext)
            })
            .unwrap_or(false)
    }
}

fn relative_key(root: &Path, path: &Path) -> String {
    let relative = match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative,
        _ => path.file_name().map(Path::new).unwrap_or(path),
    };
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
