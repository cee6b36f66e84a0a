//! In-memory profile model.
//!
//! This module holds the loaded call graph:
//! - Function identities and per-function call statistics
//! - The registry mapping functions to stable URL ids
//! - The dataset owning everything, with callee maps derived at load time

pub mod dataset;
pub mod function;
pub mod registry;

// Re-export main types
pub use dataset::{CalleeMap, CallStats, ProfileDataset};
pub use function::{Function, Totals};
pub use registry::{FunctionId, FunctionRegistry};
