//! HTTP serving of profile reports.
//!
//! - `router`: route table, dispatch and buffered responses
//! - `routes`: the viewer's `/` and `/func/<id>` handlers
//! - `http`: axum transport forwarding every request to the router

pub mod http;
pub mod router;
pub mod routes;

// Re-export main types and functions
pub use http::{app, serve, serve_listener};
pub use router::{Handler, Response, Route, Router};
pub use routes::viewer_router;
