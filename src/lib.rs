//! KPaths - concurrent K shortest paths search over weighted undirected graphs
//!
//! A pool of worker threads shares one best-first frontier of partial routes
//! and one per-node bounded result ledger. The core consumes an edge list and
//! returns ranked routes; CSV ingestion, configuration and reporting live in
//! their own modules so the crate is usable end to end.

pub mod config;
pub mod core;
pub mod graph;
pub mod ingest;
pub mod report;
pub mod search;
pub mod utils;
