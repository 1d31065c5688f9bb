use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;

use super::symbols::{FileSymbols, Symbol, SymbolKind};

/// Where a definition lives: the owning file and its slot in that file's symbol list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolLocation {
    pub file_path: String,
    pub kind: SymbolKind,
    pub position: usize,
}

/// Global view over every added file.
///
/// `file_index` maps a basename to the last file added with that basename.
/// `symbol_index` maps a function, class or struct name to every definition of it,
/// in the order files were added. Both are kept in step with `files` on every insert.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    files: IndexMap<String, FileSymbols>,
    file_index: HashMap<String, String>,
    symbol_index: HashMap<String, Vec<SymbolLocation>>,
}

const INDEXED_KINDS: [SymbolKind; 3] = [SymbolKind::Function, SymbolKind::Class, SymbolKind::Struct];

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the symbols for `file_path`.
    pub fn add_file(&mut self, file_path: impl Into<String>, mut symbols: FileSymbols) {
        let file_path = file_path.into();
        symbols.file_path = file_path.clone();

        if self.files.contains_key(&file_path) {
            self.remove_symbol_entries(&file_path);
        }

        self.file_index
            .insert(basename(&file_path).to_string(), file_path.clone());

        for kind in INDEXED_KINDS {
            for (position, symbol) in symbols.symbols_of(kind).iter().enumerate() {
                self.symbol_index
                    .entry(symbol.name.clone())
                    .or_default()
                    .push(SymbolLocation {
                        file_path: file_path.clone(),
                        kind,
                        position,
                    });
            }
        }

        self.files.insert(file_path, symbols);
    }

    fn remove_symbol_entries(&mut self, file_path: &str) {
        let Some(previous) = self.files.get(file_path) else {
            return;
        };

        for kind in INDEXED_KINDS {
            for symbol in previous.symbols_of(kind) {
                if let Some(entries) = self.symbol_index.get_mut(&symbol.name) {
                    entries.retain(|location| location.file_path != file_path);
                    if entries.is_empty() {
                        self.symbol_index.remove(&symbol.name);
                    }
                }
            }
        }
    }

    pub fn file(&self, file_path: &str) -> Option<&FileSymbols> {
        self.files.get(file_path)
    }

    /// The stored key for `file_path`, borrowed from the index.
    pub fn file_key(&self, file_path: &str) -> Option<&str> {
        self.files
            .get_key_value(file_path)
            .map(|(key, _)| key.as_str())
    }

    pub fn file_for_basename(&self, name: &str) -> Option<&str> {
        self.file_index.get(name).map(String::as_str)
    }

    /// File paths in the order they were first added.
    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &FileSymbols)> {
        self.files.iter().map(|(path, symbols)| (path.as_str(), symbols))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn definitions(&self, name: &str) -> &[SymbolLocation] {
        self.symbol_index
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn symbol_at(&self, location: &SymbolLocation) -> Option<&Symbol> {
        self.files
            .get(&location.file_path)?
            .symbols_of(location.kind)
            .get(location.position)
    }
}

/// Final path component, or the whole string when there is none.
pub fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
