//! Formatting helpers shared by the index and detail pages.
//!
//! Everything here returns HTML fragments as `String`s.

use crate::profile::{Function, FunctionId, Totals};
use crate::utils::config::{DISPLAY_NAME_KEEP, DISPLAY_NAME_LIMIT};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is when encoding a query value
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Escape `&`, `<` and `>`
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for use inside a double- or single-quoted attribute
pub fn attr_escape(s: &str) -> String {
    html_escape(s).replace('"', "&quot;").replace('\'', "&#39;")
}

/// Shorten long names to their first and last `DISPLAY_NAME_KEEP` chars
pub fn shrink(s: &str) -> String {
    let len = s.chars().count();
    if len <= DISPLAY_NAME_LIMIT {
        return s.to_string();
    }
    let head: String = s.chars().take(DISPLAY_NAME_KEEP).collect();
    let tail: String = s.chars().skip(len - DISPLAY_NAME_KEEP).collect();
    format!("{}...{}", head, tail)
}

/// Display string of a function: `dir/file.py:line:name`
///
/// Used as link text and as the target of the filter expression.
pub fn format_function(func: &Function) -> String {
    let (dir, base) = match func.file.rfind('/') {
        Some(pos) => (&func.file[..pos], &func.file[pos + 1..]),
        None => ("", func.file.as_str()),
    };
    let containing = dir
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let location = if containing.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", containing, base)
    };

    format!("{}:{}:{}", location, func.line, shrink(&html_escape(&func.name)))
}

pub fn format_time(seconds: f64) -> String {
    format!("{:.2}s", seconds)
}

/// `(x.x%)` of the total, or empty when it would read `(0.0%)`
pub fn format_percent(value: f64, total: f64) -> String {
    if total == 0.0 || !total.is_finite() {
        return String::new();
    }
    let percent = format!("({:.1}%)", 100.0 * value / total);
    if percent == "(0.0%)" || percent == "(-0.0%)" {
        String::new()
    } else {
        percent
    }
}

pub fn format_time_and_percent(value: f64, total: f64) -> String {
    format!(
        "{}&nbsp;<span class=\"percent\">{}</span>",
        format_time(value),
        format_percent(value, total)
    )
}

pub fn wrap_tag(tag: &str, body: &str) -> String {
    format!("<{tag}>{body}</{tag}>")
}

/// Percent-encode a query string value
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Decode a query string value, treating `+` as a space
///
/// Form submissions encode spaces as `+`, so a literal plus only survives
/// as `%2B`. Links built by `encode_query_value` always use `%2B`.
pub fn decode_query_value(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// `?filter=...` suffix for outgoing links, empty without a filter
pub fn filter_suffix(filter: Option<&str>) -> String {
    match filter {
        Some(filter) => format!("?filter={}", encode_query_value(filter)),
        None => String::new(),
    }
}

/// Link to a function's detail page, carrying the active filter
pub fn function_link(id: FunctionId, func: &Function, filter: Option<&str>) -> String {
    format!(
        "<a title=\"{}\" href=\"/func/{}{}\">{}</a>",
        attr_escape(&func.name),
        id,
        filter_suffix(filter),
        format_function(func)
    )
}

/// One `<tr>` with link, times, call counts and per-call figures
pub fn totals_row(link: &str, totals: &Totals, total_time: f64) -> String {
    let cells = [
        link.to_string(),
        format_time_and_percent(totals.exclusive_time, total_time),
        format_time_and_percent(totals.inclusive_time, total_time),
        totals.primitive_calls.to_string(),
        totals.total_calls.to_string(),
        format_time(totals.exclusive_per_call()),
        format_time(totals.inclusive_per_call()),
    ];
    let body: String = cells.iter().map(|cell| wrap_tag("td", cell)).collect();
    wrap_tag("tr", &body)
}
