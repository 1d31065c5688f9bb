use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
    Struct,
    Namespace,
}

/// A named declaration recovered from one file. Lines are 1-indexed and inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub start_line: usize,
    pub end_line: usize,
    /// Nearest enclosing namespace or class name only, never a qualified chain.
    pub scope: Option<String>,
    pub params: Vec<String>,
    pub return_type: Option<String>,
    pub is_template: bool,
    pub is_virtual: bool,
    pub is_static: bool,
}

impl Symbol {
    pub fn new(name: String, kind: SymbolKind, start_line: usize, end_line: usize) -> Self {
        Self {
            name,
            kind,
            start_line,
            end_line,
            scope: None,
            params: Vec::new(),
            return_type: None,
            is_template: false,
            is_virtual: false,
            is_static: false,
        }
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = params;
        self
    }

    pub fn with_return_type(mut self, return_type: Option<String>) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn with_modifiers(mut self, is_template: bool, is_virtual: bool, is_static: bool) -> Self {
        self.is_template = is_template;
        self.is_virtual = is_virtual;
        self.is_static = is_static;
        self
    }
}

/// An `#include` directive with its delimiters stripped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Include {
    pub path: String,
    pub line: usize,
    pub is_system: bool,
}

/// Everything extracted from a single file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSymbols {
    pub file_path: String,
    pub functions: Vec<Symbol>,
    pub classes: Vec<Symbol>,
    pub structs: Vec<Symbol>,
    pub namespaces: Vec<Symbol>,
    pub includes: Vec<Include>,
    /// Call-target identifiers; ordered so that edge construction is reproducible.
    pub called_names: BTreeSet<String>,
}

impl FileSymbols {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    pub fn symbols_of(&self, kind: SymbolKind) -> &[Symbol] {
        match kind {
            SymbolKind::Function => &self.functions,
            SymbolKind::Class => &self.classes,
            SymbolKind::Struct => &self.structs,
            SymbolKind::Namespace => &self.namespaces,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.classes.is_empty()
            && self.structs.is_empty()
            && self.namespaces.is_empty()
            && self.includes.is_empty()
            && self.called_names.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "lowercase")]
pub enum DependencyReason {
    Include,
    Call,
}

/// A directed file-to-file edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dependency {
    pub source: String,
    pub target: String,
    pub reason: DependencyReason,
    pub line: Option<usize>,
}

impl Dependency {
    pub fn new(source: String, target: String, reason: DependencyReason) -> Self {
        Self {
            source,
            target,
            reason,
            line: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}
