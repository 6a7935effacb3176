//! 边列表输入

pub mod csv;

pub use self::csv::{
    load_graph, read_edges, read_edges_from_path, EdgeRecord, IngestReport, SkipReason,
};
