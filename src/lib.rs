//! Callprof Viewer
//!
//! Serves a captured function-level call profile as a browsable HTML report:
//! a sortable, filterable index of functions by cost, and per-function pages
//! listing callers and callees.
//!
//! ## Getting Started
//!
//! ```bash
//! callprof-viewer serve profile.json 4040
//! ```
//!
//! The stats artifact format is described by `callprof-viewer schema --show`.

pub mod commands;
pub mod parser;
pub mod profile;
pub mod report;
pub mod server;
pub mod utils;
