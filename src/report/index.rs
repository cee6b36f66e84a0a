//! Index view: every function ranked by a chosen metric.

use super::format::{
    attr_escape, encode_query_value, format_function, format_time, function_link, html_escape,
    totals_row, wrap_tag,
};
use super::sort::{sort_rows, ReportRow, SortKey};
use super::templates::{fill, INDEX_PAGE};
use crate::profile::ProfileDataset;
use crate::utils::error::ReportError;
use log::debug;
use regex::Regex;

/// Build the ranked, filtered rows of the index page
///
/// **Public** - main entry point for the index view
///
/// # Arguments
/// * `dataset` - Loaded profile
/// * `sort` - Metric to rank by (descending)
/// * `filter` - Optional regular expression searched in each display string
///
/// # Errors
/// * `ReportError::InvalidFilter` - The filter does not compile
pub fn build_index<'a>(
    dataset: &'a ProfileDataset,
    sort: SortKey,
    filter: Option<&str>,
) -> Result<Vec<ReportRow<'a>>, ReportError> {
    let pattern = filter.map(Regex::new).transpose()?;

    // Working copy; the dataset itself is never reordered
    let mut rows = dataset
        .registry()
        .iter()
        .map(|(id, function)| -> Result<ReportRow<'a>, ReportError> {
            Ok(ReportRow {
                id,
                function,
                totals: dataset.stats_of(id)?.totals,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    sort_rows(&mut rows, sort);

    if let Some(pattern) = &pattern {
        rows.retain(|row| pattern.is_match(&format_function(row.function)));
    }

    debug!(
        "Index: {} of {} functions, sorted by {}",
        rows.len(),
        dataset.registry().len(),
        sort
    );

    Ok(rows)
}

/// Header row of the index table, each metric column linking to a re-sort
pub fn sortable_header(active: SortKey, filter: Option<&str>) -> String {
    let filter_param = filter
        .map(|f| format!("&amp;filter={}", encode_query_value(f)))
        .unwrap_or_default();

    let mut cells = wrap_tag("th", "Function");
    for key in SortKey::COLUMNS {
        let label = if key == active {
            format!("{} &#9660;", key.label())
        } else {
            key.label().to_string()
        };
        cells.push_str(&wrap_tag(
            "th",
            &format!("<a href=\"/?sort={}{}\">{}</a>", key, filter_param, label),
        ));
    }
    wrap_tag("tr", &cells)
}

/// Render the complete index page
///
/// **Public** - called by the `/` route handler
pub fn render_index_page(
    dataset: &ProfileDataset,
    sort: SortKey,
    filter: Option<&str>,
) -> Result<String, ReportError> {
    let rows = build_index(dataset, sort, filter)?;
    let total_time = dataset.total_time();

    let table = rows
        .iter()
        .map(|row| {
            totals_row(
                &function_link(row.id, row.function, filter),
                &row.totals,
                total_time,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let filename = html_escape(&dataset.files().join(", "));
    let total = format_time(total_time);
    let filter_exp = attr_escape(filter.unwrap_or_default());
    let header = sortable_header(sort, filter);
    let row_count = rows.len().to_string();
    let function_count = dataset.registry().len().to_string();
    let loaded_at = dataset.loaded_at().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    Ok(fill(
        INDEX_PAGE,
        &[
            ("filename", filename.as_str()),
            ("total_time", total.as_str()),
            ("filter_exp", filter_exp.as_str()),
            ("sort", sort.as_str()),
            ("header", header.as_str()),
            ("table", table.as_str()),
            ("row_count", row_count.as_str()),
            ("function_count", function_count.as_str()),
            ("loaded_at", loaded_at.as_str()),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{CallStats, Function, Totals};

    fn dataset() -> ProfileDataset {
        ProfileDataset::new(
            vec!["run.prof".to_string()],
            vec![
                (
                    Function::new("/app/core/a.py", 1, "alpha"),
                    CallStats::new(Totals::new(10, 10, 2.0, 5.0)),
                ),
                (
                    Function::new("/app/core/b.py", 1, "beta"),
                    CallStats::new(Totals::new(0, 0, 3.0, 3.0)),
                ),
                (
                    Function::new("/app/util/c.py", 1, "gamma"),
                    CallStats::new(Totals::new(4, 4, 1.0, 4.0)),
                ),
            ],
        )
        .unwrap()
    }

    fn names(rows: &[ReportRow<'_>]) -> Vec<String> {
        rows.iter().map(|r| r.function.name.clone()).collect()
    }

    #[test]
    fn test_default_sort_is_inclusive() {
        let dataset = dataset();
        let rows = build_index(&dataset, SortKey::default(), None).unwrap();
        assert_eq!(names(&rows), vec!["alpha", "gamma", "beta"]);
    }

    #[test]
    fn test_sort_by_primitive_calls() {
        let dataset = dataset();
        let rows = build_index(&dataset, SortKey::PrimitiveCalls, None).unwrap();
        assert_eq!(names(&rows), vec!["alpha", "gamma", "beta"]);
    }

    #[test]
    fn test_per_call_with_zero_calls_uses_raw_time() {
        let dataset = dataset();
        let rows = build_index(&dataset, SortKey::ExclusivePerCall, None).unwrap();
        // beta: 3.0 / 1, gamma: 1.0 / 4, alpha: 2.0 / 10
        assert_eq!(names(&rows), vec!["beta", "gamma", "alpha"]);
    }

    #[test]
    fn test_filter_removes_rows_only() {
        let dataset = dataset();
        let rows = build_index(&dataset, SortKey::default(), Some("core/")).unwrap();
        assert_eq!(names(&rows), vec!["alpha", "beta"]);
        assert_eq!(dataset.total_time(), 6.0);
    }

    #[test]
    fn test_invalid_filter() {
        let dataset = dataset();
        let result = build_index(&dataset, SortKey::default(), Some("(unclosed"));
        assert!(matches!(result, Err(ReportError::InvalidFilter(_))));
    }

    #[test]
    fn test_sortable_header_marks_active_and_keeps_filter() {
        let header = sortable_header(SortKey::TotalCalls, Some("a b"));
        assert!(header.contains("<a href=\"/?sort=nc&amp;filter=a%20b\">Total calls &#9660;</a>"));
        assert!(header.contains("<a href=\"/?sort=tt&amp;filter=a%20b\">Exclusive</a>"));
    }
}
