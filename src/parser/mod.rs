//! Stats artifact parsing.
//!
//! This module handles:
//! - The JSON schema of the stats artifact
//! - Reading it from disk and validating its version
//! - Converting records into a `ProfileDataset`

pub mod schema;
pub mod stats_file;

// Re-export main types
pub use schema::{EdgeRecord, FunctionRecord, StatsFile};
pub use stats_file::{load_dataset, read_stats, to_dataset};
