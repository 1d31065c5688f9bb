use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use super::SyntaxNode;
use crate::error::{CppGraphError, Result};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(language)
            .map_err(|err| CppGraphError::Language(err.to_string()))?;
        Ok(Self { parser })
    }

    pub fn parse_source(&mut self, source: &[u8]) -> Option<Tree> {
        self.parser.parse(source, None)
    }

    /// Buffered whole-file read. Bytes are kept as-is; invalid UTF-8 only
    /// affects the text of the nodes that contain it.
    pub fn read_source(file_path: &Path) -> Result<Vec<u8>> {
        let io_err = |source: std::io::Error| CppGraphError::Io {
            path: file_path.to_path_buf(),
            source,
        };
        let file = File::open(file_path).map_err(io_err)?;
        let file_size = file.metadata().map_err(io_err)?.len() as usize;

        let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
        let mut content = Vec::with_capacity(file_size);
        reader.read_to_end(&mut content).map_err(io_err)?;
        Ok(content)
    }
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

/// A tree-sitter node paired with the source it was parsed from.
#[derive(Clone, Copy)]
pub struct TsNode<'a> {
    node: TSNode<'a>,
    source: &'a [u8],
}

impl<'a> TsNode<'a> {
    pub fn new(node: TSNode<'a>, source: &'a [u8]) -> Self {
        Self { node, source }
    }
}

impl<'a> SyntaxNode for TsNode<'a> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn parent(&self) -> Option<Self> {
        self.node.parent().map(|node| TsNode::new(node, self.source))
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|node| TsNode::new(node, self.source))
            .collect()
    }

    fn start_line(&self) -> usize {
        self.node.start_position().row + 1
    }

    fn end_line(&self) -> usize {
        self.node.end_position().row + 1
    }

    fn text(&self) -> &str {
        extract_text(&self.node, self.source)
    }
}
