//! Stats artifact reader.
//!
//! Reads the JSON artifact from disk, checks the schema version and turns the
//! records into a `ProfileDataset`.

use super::schema::StatsFile;
use crate::profile::{CallStats, Function, ProfileDataset};
use crate::utils::config::SUPPORTED_SCHEMA_MAJOR;
use crate::utils::error::LoadError;
use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a stats artifact from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `LoadError::Io` - File read error
/// * `LoadError::Json` - JSON parse error
pub fn read_stats(input_path: impl AsRef<Path>) -> Result<StatsFile, LoadError> {
    let input_path = input_path.as_ref();

    debug!("Reading stats from: {}", input_path.display());

    let file = File::open(input_path)?;
    let stats: StatsFile = serde_json::from_reader(BufReader::new(file))?;

    debug!(
        "Stats loaded: version {}, {} functions",
        stats.version,
        stats.functions.len()
    );

    Ok(stats)
}

/// Load a stats artifact and build the dataset served by the viewer
///
/// **Public** - main entry point for loading
///
/// # Arguments
/// * `input_path` - Path to the JSON artifact
///
/// # Errors
/// * Any `read_stats` error
/// * `LoadError::UnsupportedVersion` - Schema major version mismatch
/// * `LoadError::DuplicateFunction` / `LoadError::UnknownCaller` - Inconsistent call graph
pub fn load_dataset(input_path: impl AsRef<Path>) -> Result<ProfileDataset, LoadError> {
    let input_path = input_path.as_ref();
    let stats = read_stats(input_path)?;

    let mut dataset_files = stats.files.clone();
    if dataset_files.is_empty() {
        dataset_files.push(artifact_name(input_path));
    }

    let dataset = to_dataset(stats, dataset_files)?;

    info!(
        "Loaded {} functions ({:.3}s total) from {}",
        dataset.registry().len(),
        dataset.total_time(),
        input_path.display()
    );

    Ok(dataset)
}

/// Convert parsed records to the in-memory dataset
///
/// **Public** - used by `load_dataset` and by tests working from strings
pub fn to_dataset(stats: StatsFile, files: Vec<String>) -> Result<ProfileDataset, LoadError> {
    check_version(&stats.version)?;

    let entries: Vec<(Function, CallStats)> = stats
        .functions
        .into_iter()
        .map(|record| {
            let callers = record
                .callers
                .into_iter()
                .map(|edge| (edge.function, edge.totals))
                .collect();
            (
                record.function,
                CallStats {
                    totals: record.totals,
                    callers,
                },
            )
        })
        .collect();

    ProfileDataset::new(files, entries)
}

/// Reject artifacts written by an incompatible schema
///
/// **Private** - internal helper for to_dataset
fn check_version(version: &str) -> Result<(), LoadError> {
    let major = version.split('.').next().unwrap_or_default();
    if major != SUPPORTED_SCHEMA_MAJOR {
        return Err(LoadError::UnsupportedVersion(version.to_string()));
    }
    Ok(())
}

/// File name of the artifact, used as the report title when none is recorded
fn artifact_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
