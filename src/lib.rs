//! # cppgraph
//!
//! Cross-file dependency graphs for C and C++ codebases.
//!
//! Each file is parsed with tree-sitter into a symbol summary (functions,
//! classes, structs, namespaces, includes, called names). The summaries feed a
//! global symbol index, from which include and call edges between files are
//! resolved. The resulting graph can be queried for simple cycles and coupling,
//! and exported as a node/link document for visualization.
//!
//! ## Pipeline
//!
//! - [`core::CodebaseAnalyzer`] scans a tree and extracts files in parallel
//! - [`core::DependencyGraph`] resolves includes and calls into edges
//! - [`core::GraphAnalyzer`] answers cycle, coupling and metrics queries
//! - [`formatters::GraphJsonFormatter`] writes the visualization export

pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;
