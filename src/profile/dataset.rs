//! The loaded profile: per-function statistics, derived callee maps and the
//! registry, built once and shared read-only between request handlers.

use super::function::{Function, Totals};
use super::registry::{FunctionId, FunctionRegistry};
use crate::utils::error::{LoadError, RegistryError};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Statistics recorded for one function
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallStats {
    /// The function's own aggregate figures
    pub totals: Totals,

    /// Each caller's contribution along its edge into this function
    pub callers: HashMap<Function, Totals>,
}

impl CallStats {
    pub fn new(totals: Totals) -> Self {
        Self {
            totals,
            callers: HashMap::new(),
        }
    }

    /// Builder-style helper for attaching a caller edge
    pub fn with_caller(mut self, caller: Function, edge: Totals) -> Self {
        self.callers.insert(caller, edge);
        self
    }
}

/// Callee -> edge figures for calls made from one function
pub type CalleeMap = HashMap<Function, Totals>;

/// Whole-profile state
#[derive(Debug, Clone)]
pub struct ProfileDataset {
    files: Vec<String>,
    total_time: f64,
    registry: FunctionRegistry,
    stats: Vec<CallStats>,
    callees: Vec<CalleeMap>,
    loaded_at: DateTime<Utc>,
}

impl ProfileDataset {
    /// Build the dataset from loader output
    ///
    /// **Public** - the only constructor
    ///
    /// # Arguments
    /// * `files` - Names of the artifacts the statistics came from
    /// * `entries` - Every profiled function with its statistics
    ///
    /// # Errors
    /// * `LoadError::DuplicateFunction` - A function appears twice
    /// * `LoadError::UnknownCaller` - A caller edge names an unlisted function
    pub fn new(
        files: Vec<String>,
        entries: Vec<(Function, CallStats)>,
    ) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for (func, _) in &entries {
            if !seen.insert(func) {
                return Err(LoadError::DuplicateFunction(func.to_string()));
            }
        }

        for (func, stats) in &entries {
            if let Some(caller) = stats.callers.keys().find(|c| !seen.contains(c)) {
                return Err(LoadError::UnknownCaller {
                    caller: caller.to_string(),
                    callee: func.to_string(),
                });
            }
            if let Some(problem) = stats.totals.check_invariants() {
                warn!("Inconsistent statistics for {}: {}", func, problem);
            }
        }

        let registry = FunctionRegistry::build(entries.iter().map(|(f, _)| f.clone()));

        let mut stats = vec![CallStats::default(); registry.len()];
        for (func, entry) in entries {
            let id = registry.id_of(&func)?;
            stats[id.index()] = entry;
        }

        let callees = invert_callers(&registry, &stats)?;
        let total_time: f64 = stats.iter().map(|s| s.totals.exclusive_time).sum();

        debug!(
            "Built dataset: {} functions, {:.3}s total",
            registry.len(),
            total_time
        );

        Ok(Self {
            files,
            total_time,
            registry,
            stats,
            callees,
            loaded_at: Utc::now(),
        })
    }

    /// Artifact names the statistics were read from
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Sum of exclusive time over all functions (percentage denominator)
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn stats_of(&self, id: FunctionId) -> Result<&CallStats, RegistryError> {
        self.stats
            .get(id.index())
            .ok_or(RegistryError::UnknownId(id.index()))
    }

    pub fn callees_of(&self, id: FunctionId) -> Result<&CalleeMap, RegistryError> {
        self.callees
            .get(id.index())
            .ok_or(RegistryError::UnknownId(id.index()))
    }
}

/// Derive every function's callee map from the callers recorded on callees
///
/// **Private** - each edge is copied, never recomputed, so both sides agree
fn invert_callers(
    registry: &FunctionRegistry,
    stats: &[CallStats],
) -> Result<Vec<CalleeMap>, RegistryError> {
    let mut callees = vec![CalleeMap::new(); registry.len()];

    for (callee_id, callee) in registry.iter() {
        for (caller, edge) in &stats[callee_id.index()].callers {
            let caller_id = registry.id_of(caller)?;
            callees[caller_id.index()].insert(callee.clone(), *edge);
        }
    }

    Ok(callees)
}
