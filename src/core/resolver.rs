use std::path::{Component, Path, PathBuf};
use tracing::trace;

use super::index::{basename, SymbolIndex};
use super::symbols::Symbol;

/// One way of mapping an include path to a known file.
///
/// Arguments are the index, the include path as written and the including file.
pub type IncludeStrategy = for<'a> fn(&'a SymbolIndex, &str, &str) -> Option<&'a str>;

/// Strategies in the order they are tried. The first hit wins.
pub const INCLUDE_STRATEGIES: [(&str, IncludeStrategy); 5] = [
    ("exact", exact_match),
    ("basename", basename_match),
    ("suffix", suffix_match),
    ("relative", relative_match),
    ("basename-scan", basename_scan),
];

/// The include path is itself a known file key.
pub fn exact_match<'a>(
    index: &'a SymbolIndex,
    include_path: &str,
    _source: &str,
) -> Option<&'a str> {
    index.file_key(include_path)
}

/// Last file added under the same basename.
pub fn basename_match<'a>(
    index: &'a SymbolIndex,
    include_path: &str,
    _source: &str,
) -> Option<&'a str> {
    index.file_for_basename(basename(include_path))
}

/// First known path that ends with the include path, e.g. `Sub/Header.h`.
pub fn suffix_match<'a>(
    index: &'a SymbolIndex,
    include_path: &str,
    _source: &str,
) -> Option<&'a str> {
    index.file_paths().find(|path| path.ends_with(include_path))
}

/// Include path joined onto the including file's directory.
pub fn relative_match<'a>(
    index: &'a SymbolIndex,
    include_path: &str,
    source: &str,
) -> Option<&'a str> {
    let source_dir = Path::new(source).parent().unwrap_or_else(|| Path::new(""));
    let candidate = normalize(&source_dir.join(include_path));
    index.file_key(candidate.to_str()?)
}

/// Linear scan over every file comparing basenames, independent of the basename table.
pub fn basename_scan<'a>(
    index: &'a SymbolIndex,
    include_path: &str,
    _source: &str,
) -> Option<&'a str> {
    let wanted = basename(include_path);
    index.file_paths().find(|path| basename(path) == wanted)
}

/// Lexically fold `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let nothing_to_pop = matches!(
                    normalized.components().next_back(),
                    None | Some(Component::ParentDir)
                );
                if nothing_to_pop {
                    normalized.push("..");
                } else {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Maps include paths and called names onto files known to a [`SymbolIndex`].
pub struct DependencyResolver<'a> {
    index: &'a SymbolIndex,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self { index }
    }

    pub fn resolve_include(&self, include_path: &str, source_file: &str) -> Option<&'a str> {
        for (name, strategy) in INCLUDE_STRATEGIES {
            if let Some(target) = strategy(self.index, include_path, source_file) {
                trace!(
                    include = include_path,
                    source = source_file,
                    resolved = target,
                    strategy = name,
                    "include resolved"
                );
                return Some(target);
            }
        }
        None
    }

    /// Every definition sharing `called_name`, regardless of signature.
    pub fn resolve_callers(&self, called_name: &str) -> Vec<(&'a str, &'a Symbol)> {
        self.index
            .definitions(called_name)
            .iter()
            .filter_map(|location| {
                let symbol = self.index.symbol_at(location)?;
                Some((location.file_path.as_str(), symbol))
            })
            .collect()
    }
}
