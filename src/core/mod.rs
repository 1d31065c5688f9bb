pub mod analysis;
pub mod analyzer;
pub mod cycles;
pub mod graph;
pub mod index;
pub mod resolver;
pub mod scanner;
pub mod symbols;

pub use analysis::{FileMetrics, GraphAnalyzer};
pub use analyzer::CodebaseAnalyzer;
pub use cycles::{CycleLimits, CycleReport, FileGraph};
pub use graph::DependencyGraph;
pub use index::{SymbolIndex, SymbolLocation};
pub use resolver::DependencyResolver;
pub use scanner::FileScanner;
pub use symbols::{Dependency, DependencyReason, FileSymbols, Include, Symbol, SymbolKind};
