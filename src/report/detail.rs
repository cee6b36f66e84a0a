//! Function detail view: a function's own figures, its callers and its
//! callees.

use super::format::{
    filter_suffix, format_function, format_time, function_link, html_escape, totals_row, wrap_tag,
};
use super::sort::{sort_rows, ReportRow, SortKey};
use super::templates::{fill, FUNCTION_PAGE};
use crate::profile::{Function, FunctionId, ProfileDataset, Totals};
use crate::utils::error::ReportError;
use log::debug;

/// The three tables of a detail page
#[derive(Debug, Clone)]
pub struct FunctionDetail<'a> {
    /// The function's own aggregate row
    pub own: ReportRow<'a>,

    /// One row per caller, figures for the edge into this function
    pub callers: Vec<ReportRow<'a>>,

    /// One row per callee, figures for the edge out of this function
    pub callees: Vec<ReportRow<'a>>,
}

/// Gather and rank the detail tables of one function
///
/// **Public** - main entry point for the detail view
///
/// # Errors
/// * `ReportError::Registry` - Unknown id, or an edge to an unregistered function
pub fn build_detail(dataset: &ProfileDataset, id: FunctionId) -> Result<FunctionDetail<'_>, ReportError> {
    let registry = dataset.registry();
    let function = registry.function_of(id)?;
    let stats = dataset.stats_of(id)?;

    let own = ReportRow {
        id,
        function,
        totals: stats.totals,
    };
    let callers = edge_rows(dataset, stats.callers.iter())?;
    let callees = edge_rows(dataset, dataset.callees_of(id)?.iter())?;

    debug!(
        "Detail for {}: {} callers, {} callees",
        function,
        callers.len(),
        callees.len()
    );

    Ok(FunctionDetail {
        own,
        callers,
        callees,
    })
}

/// Resolve edge endpoints to registered rows, ranked by edge inclusive time
///
/// **Private** - shared by the callers and callees tables
fn edge_rows<'a>(
    dataset: &'a ProfileDataset,
    edges: impl Iterator<Item = (&'a Function, &'a Totals)>,
) -> Result<Vec<ReportRow<'a>>, ReportError> {
    let registry = dataset.registry();
    let mut rows = edges
        .map(|(function, totals)| -> Result<ReportRow<'a>, ReportError> {
            let id = registry.id_of(function)?;
            // Link to the registry's copy so rows borrow from one place
            let function = registry.function_of(id)?;
            Ok(ReportRow {
                id,
                function,
                totals: *totals,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    sort_rows(&mut rows, SortKey::InclusiveTime);
    Ok(rows)
}

/// Plain (non-sortable) header used by all detail tables
fn detail_header() -> String {
    let mut cells = wrap_tag("th", "Function");
    for key in SortKey::COLUMNS {
        cells.push_str(&wrap_tag("th", key.label()));
    }
    wrap_tag("tr", &cells)
}

fn render_rows(rows: &[ReportRow<'_>], total_time: f64, filter: Option<&str>) -> String {
    rows.iter()
        .map(|row| {
            totals_row(
                &function_link(row.id, row.function, filter),
                &row.totals,
                total_time,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the complete detail page
///
/// **Public** - called by the `/func/<id>` route handler
///
/// The filter is only carried into outgoing links; it never hides rows here.
pub fn render_detail_page(
    dataset: &ProfileDataset,
    id: FunctionId,
    filter: Option<&str>,
) -> Result<String, ReportError> {
    let detail = build_detail(dataset, id)?;
    let total_time = dataset.total_time();
    let own = detail.own;

    let func = format_function(own.function);
    let name = html_escape(&own.function.name);
    let file = html_escape(&own.function.file);
    let line = own.function.line.to_string();
    let primitive = own.totals.primitive_calls.to_string();
    let total = own.totals.total_calls.to_string();
    let exclusive = format_time(own.totals.exclusive_time);
    let inclusive = format_time(own.totals.inclusive_time);
    let index_link = format!("/{}", filter_suffix(filter));
    let header = detail_header();
    let self_row = render_rows(std::slice::from_ref(&own), total_time, filter);
    let callers = render_rows(&detail.callers, total_time, filter);
    let callees = render_rows(&detail.callees, total_time, filter);

    Ok(fill(
        FUNCTION_PAGE,
        &[
            ("func", func.as_str()),
            ("name", name.as_str()),
            ("file", file.as_str()),
            ("line", line.as_str()),
            ("primitive", primitive.as_str()),
            ("total", total.as_str()),
            ("exclusive", exclusive.as_str()),
            ("inclusive", inclusive.as_str()),
            ("index_link", index_link.as_str()),
            ("header", header.as_str()),
            ("self_row", self_row.as_str()),
            ("callers", callers.as_str()),
            ("callees", callees.as_str()),
        ],
    ))
}
