//! JSON schema of the stats artifact the viewer reads.
//!
//! Schema is versioned to allow future evolution.

use crate::profile::{Function, Totals};
use serde::{Deserialize, Serialize};

/// Top-level stats artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsFile {
    /// Schema version for compatibility checking
    pub version: String,

    /// Names of the profiler outputs merged into this artifact
    #[serde(default)]
    pub files: Vec<String>,

    /// Every profiled function
    pub functions: Vec<FunctionRecord>,
}

/// One profiled function and the edges into it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRecord {
    #[serde(flatten)]
    pub function: Function,

    #[serde(flatten)]
    pub totals: Totals,

    /// Callers of this function with their per-edge figures
    #[serde(default)]
    pub callers: Vec<EdgeRecord>,
}

/// A caller edge: the calling function and its contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(flatten)]
    pub function: Function,

    #[serde(flatten)]
    pub totals: Totals,
}
