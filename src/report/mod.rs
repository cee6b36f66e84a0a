//! Report building: ranking, filtering and rendering of profile tables.
//!
//! Two views share the same row shape and formatting helpers:
//! - Index: every function ranked by a chosen metric, optionally filtered
//! - Detail: one function with its callers and callees

pub mod detail;
pub mod format;
pub mod index;
pub mod query;
pub mod sort;
pub mod templates;

// Re-export main types and functions
pub use detail::{build_detail, render_detail_page, FunctionDetail};
pub use format::format_function;
pub use index::{build_index, render_index_page};
pub use query::QueryParams;
pub use sort::{sort_rows, ReportRow, SortKey};
