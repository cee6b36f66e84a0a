//! Sort keys and the shared descending-by-metric ordering.

use crate::profile::{Function, FunctionId, Totals};
use crate::utils::error::ReportError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Metric a report is ranked by, named by its query string token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// `cc`
    PrimitiveCalls,
    /// `nc`
    TotalCalls,
    /// `tt`
    ExclusiveTime,
    /// `ct`
    #[default]
    InclusiveTime,
    /// `epc`
    ExclusivePerCall,
    /// `ipc`
    InclusivePerCall,
}

impl SortKey {
    /// All keys in table column order
    pub const COLUMNS: [SortKey; 6] = [
        SortKey::ExclusiveTime,
        SortKey::InclusiveTime,
        SortKey::PrimitiveCalls,
        SortKey::TotalCalls,
        SortKey::ExclusivePerCall,
        SortKey::InclusivePerCall,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PrimitiveCalls => "cc",
            SortKey::TotalCalls => "nc",
            SortKey::ExclusiveTime => "tt",
            SortKey::InclusiveTime => "ct",
            SortKey::ExclusivePerCall => "epc",
            SortKey::InclusivePerCall => "ipc",
        }
    }

    /// Column heading
    pub fn label(self) -> &'static str {
        match self {
            SortKey::PrimitiveCalls => "Primitive calls",
            SortKey::TotalCalls => "Total calls",
            SortKey::ExclusiveTime => "Exclusive",
            SortKey::InclusiveTime => "Inclusive",
            SortKey::ExclusivePerCall => "Exclusive/call",
            SortKey::InclusivePerCall => "Inclusive/call",
        }
    }

    pub fn metric(self, totals: &Totals) -> f64 {
        match self {
            SortKey::PrimitiveCalls => totals.primitive_calls as f64,
            SortKey::TotalCalls => totals.total_calls as f64,
            SortKey::ExclusiveTime => totals.exclusive_time,
            SortKey::InclusiveTime => totals.inclusive_time,
            SortKey::ExclusivePerCall => totals.exclusive_per_call(),
            SortKey::InclusivePerCall => totals.inclusive_per_call(),
        }
    }
}

impl FromStr for SortKey {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cc" => Ok(SortKey::PrimitiveCalls),
            "nc" => Ok(SortKey::TotalCalls),
            "tt" => Ok(SortKey::ExclusiveTime),
            "ct" => Ok(SortKey::InclusiveTime),
            "epc" => Ok(SortKey::ExclusivePerCall),
            "ipc" => Ok(SortKey::InclusivePerCall),
            other => Err(ReportError::InvalidSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function (or call edge) with the figures shown in one table row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow<'a> {
    pub id: FunctionId,
    pub function: &'a Function,
    pub totals: Totals,
}

/// Sort rows descending by `key`, ties broken by ascending function order
///
/// **Public** - used by both the index and the detail view
pub fn sort_rows(rows: &mut [ReportRow<'_>], key: SortKey) {
    rows.sort_by(|a, b| {
        compare_desc(key.metric(&a.totals), key.metric(&b.totals))
            .then_with(|| a.function.cmp(b.function))
    });
}

fn compare_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
