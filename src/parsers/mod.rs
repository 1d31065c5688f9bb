//! Boundary between the syntax-tree parser and symbol extraction.
//!
//! Extraction only sees query captures and the [`SyntaxNode`] operations below,
//! so any tree implementation can drive it.

pub mod common;
pub mod cpp;
pub mod extractor;

use std::collections::HashMap;

/// Read access to one node of a parsed tree.
pub trait SyntaxNode: Clone {
    fn kind(&self) -> &str;
    fn parent(&self) -> Option<Self>;
    fn children(&self) -> Vec<Self>;
    /// 1-indexed.
    fn start_line(&self) -> usize;
    /// 1-indexed, inclusive.
    fn end_line(&self) -> usize;
    fn text(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryCategory {
    Includes,
    Functions,
    Classes,
    Structs,
    Namespaces,
    CallExpressions,
}

impl QueryCategory {
    pub const ALL: [QueryCategory; 6] = [
        QueryCategory::Includes,
        QueryCategory::Functions,
        QueryCategory::Classes,
        QueryCategory::Structs,
        QueryCategory::Namespaces,
        QueryCategory::CallExpressions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QueryCategory::Includes => "includes",
            QueryCategory::Functions => "functions",
            QueryCategory::Classes => "classes",
            QueryCategory::Structs => "structs",
            QueryCategory::Namespaces => "namespaces",
            QueryCategory::CallExpressions => "call_expressions",
        }
    }

    /// Capture label carrying the name (or path) the extractor reads.
    pub fn name_label(self) -> &'static str {
        match self {
            QueryCategory::Includes => "path",
            QueryCategory::Functions => "func_name",
            QueryCategory::Classes => "class_name",
            QueryCategory::Structs => "struct_name",
            QueryCategory::Namespaces => "ns_name",
            QueryCategory::CallExpressions => "callee",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Capture<N> {
    pub label: String,
    pub node: N,
}

/// Query results for one file, grouped by category in match order.
#[derive(Debug, Clone)]
pub struct CaptureSet<N> {
    by_category: HashMap<QueryCategory, Vec<Capture<N>>>,
}

impl<N> CaptureSet<N> {
    pub fn new() -> Self {
        Self {
            by_category: HashMap::new(),
        }
    }

    pub fn push(&mut self, category: QueryCategory, label: impl Into<String>, node: N) {
        self.by_category.entry(category).or_default().push(Capture {
            label: label.into(),
            node,
        });
    }

    pub fn get(&self, category: QueryCategory) -> &[Capture<N>] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Nodes captured under the category's name label.
    pub fn named(&self, category: QueryCategory) -> impl Iterator<Item = &N> {
        let label = category.name_label();
        self.get(category)
            .iter()
            .filter(move |capture| capture.label == label)
            .map(|capture| &capture.node)
    }
}

impl<N> Default for CaptureSet<N> {
    fn default() -> Self {
        Self::new()
    }
}
