pub mod graph_json;

pub use graph_json::{
    ExportMetadata, ExportedSymbol, FileType, GraphExport, GraphJsonFormatter, GraphLink, GraphNode,
};
