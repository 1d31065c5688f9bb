use std::path::Path;
use tracing::warn;
use tree_sitter::{Query, QueryCursor, Tree};

use super::common::{TreeSitterParser, TsNode};
use super::extractor::SymbolExtractor;
use super::{CaptureSet, QueryCategory};
use crate::core::FileSymbols;
use crate::error::{CppGraphError, Result};

const INCLUDES_QUERY: &str = r#"
(preproc_include
    path: [
        (string_literal) @path
        (system_lib_string) @path
    ]
) @include
"#;

const FUNCTIONS_QUERY: &str = r#"
(function_definition
    declarator: (function_declarator
        declarator: [
            (identifier) @func_name
            (field_identifier) @func_name
            (qualified_identifier name: (identifier) @func_name)
        ]
    )
) @function

(function_definition
    declarator: (_
        (function_declarator
            declarator: [
                (identifier) @func_name
                (field_identifier) @func_name
                (qualified_identifier name: (identifier) @func_name)
            ]
        )
    )
) @function
"#;

const CLASSES_QUERY: &str = r#"
(class_specifier
    name: (type_identifier) @class_name
) @class
"#;

const STRUCTS_QUERY: &str = r#"
(struct_specifier
    name: (type_identifier) @struct_name
) @struct
"#;

const NAMESPACES_QUERY: &str = r#"
(namespace_definition
    name: (_) @ns_name
) @namespace
"#;

const CALL_EXPRESSIONS_QUERY: &str = r#"
(call_expression
    function: [
        (identifier) @callee
        (qualified_identifier
            name: (identifier) @callee
        )
        (field_expression
            field: (field_identifier) @callee
        )
    ]
) @call
"#;

fn query_source(category: QueryCategory) -> &'static str {
    match category {
        QueryCategory::Includes => INCLUDES_QUERY,
        QueryCategory::Functions => FUNCTIONS_QUERY,
        QueryCategory::Classes => CLASSES_QUERY,
        QueryCategory::Structs => STRUCTS_QUERY,
        QueryCategory::Namespaces => NAMESPACES_QUERY,
        QueryCategory::CallExpressions => CALL_EXPRESSIONS_QUERY,
    }
}

/// C++ front end: tree-sitter parsing plus the pre-compiled capture queries.
pub struct CppParser {
    queries: Vec<(QueryCategory, Query)>,
    extractor: SymbolExtractor,
}

impl CppParser {
    /// A query that fails to compile is logged and contributes no captures.
    pub fn new() -> Result<Self> {
        let mut queries = Vec::with_capacity(QueryCategory::ALL.len());
        for category in QueryCategory::ALL {
            match Self::compile(category) {
                Ok(query) => queries.push((category, query)),
                Err(err) => warn!("{err}"),
            }
        }
        // Fail early if the grammar itself cannot be loaded.
        TreeSitterParser::new(tree_sitter_cpp::language())?;
        Ok(Self {
            queries,
            extractor: SymbolExtractor::new(),
        })
    }

    fn compile(category: QueryCategory) -> Result<Query> {
        Query::new(tree_sitter_cpp::language(), query_source(category)).map_err(|err| {
            CppGraphError::Query {
                category: category.as_str(),
                message: err.to_string(),
            }
        })
    }

    pub fn parse_source(&self, source: &[u8]) -> Option<Tree> {
        let mut parser = TreeSitterParser::new(tree_sitter_cpp::language()).ok()?;
        parser.parse_source(source)
    }

    /// Run every compiled query over `tree`.
    pub fn captures<'t>(&self, tree: &'t Tree, source: &'t [u8]) -> CaptureSet<TsNode<'t>> {
        let mut captures = CaptureSet::new();
        let mut cursor = QueryCursor::new();

        for (category, query) in &self.queries {
            let names = query.capture_names();
            for (query_match, capture_index) in cursor.captures(query, tree.root_node(), source) {
                let capture = query_match.captures[capture_index];
                let label = names[capture.index as usize].to_string();
                captures.push(*category, label, TsNode::new(capture.node, source));
            }
        }

        captures
    }

    /// Parse and extract in one step. A parse failure yields empty symbols.
    pub fn extract_source(&self, file_path: &str, source: &[u8]) -> FileSymbols {
        match self.parse_source(source) {
            Some(tree) => {
                let captures = self.captures(&tree, source);
                self.extractor.extract(file_path, Some(&captures))
            }
            None => {
                warn!(file = file_path, "parser produced no tree");
                self.extractor.extract::<TsNode>(file_path, None)
            }
        }
    }

    pub fn parse_file(&self, file_path: &Path, key: &str) -> Result<FileSymbols> {
        let source = TreeSitterParser::read_source(file_path)?;
        let tree = self
            .parse_source(&source)
            .ok_or_else(|| CppGraphError::Parse(file_path.display().to_string()))?;
        let captures = self.captures(&tree, &source);
        Ok(self.extractor.extract(key, Some(&captures)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_query_compiles() {
        for category in QueryCategory::ALL {
            assert!(
                CppParser::compile(category).is_ok(),
                "{} query failed to compile",
                category.as_str()
            );
        }
    }
}
