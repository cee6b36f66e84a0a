//! The viewer's route table and its handlers.

use super::router::{Route, Router};
use crate::profile::{FunctionId, ProfileDataset};
use crate::report::{render_detail_page, render_index_page, QueryParams};
use anyhow::{Context, Result};

/// Build the route table served by the viewer
///
/// **Public** - called once at startup
///
/// * `/` - index of all functions
/// * `/func/<id>` - detail page of one function
pub fn viewer_router() -> Result<Router<ProfileDataset>, regex::Error> {
    Ok(Router::new(vec![
        Route::new("/", index_handler)?,
        Route::new("/func/(.*)", function_handler)?,
    ]))
}

fn index_handler(
    dataset: &ProfileDataset,
    query: &QueryParams,
    _captures: &[String],
    out: &mut Vec<u8>,
) -> Result<()> {
    let sort = query.sort_key().context("Failed to read sort order")?;
    let filter = query.filter();

    let page = render_index_page(dataset, sort, filter.as_deref())
        .context("Failed to render function index")?;

    out.extend_from_slice(page.as_bytes());
    Ok(())
}

fn function_handler(
    dataset: &ProfileDataset,
    query: &QueryParams,
    captures: &[String],
    out: &mut Vec<u8>,
) -> Result<()> {
    let raw_id = captures.first().map(String::as_str).unwrap_or_default();
    let id: FunctionId = raw_id
        .parse()
        .with_context(|| format!("Failed to read function id from {:?}", raw_id))?;
    let filter = query.filter();

    let page = render_detail_page(dataset, id, filter.as_deref())
        .with_context(|| format!("Failed to render function {}", id))?;

    out.extend_from_slice(page.as_bytes());
    Ok(())
}
