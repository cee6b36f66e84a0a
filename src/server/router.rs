//! Path-based request dispatch.
//!
//! A `Router` is an ordered list of `(pattern, handler)` routes declared once
//! at startup. Dispatch tries each pattern against the request path and runs
//! the first match with its capture groups. Handler output goes to an
//! in-memory buffer that only becomes the response body if the handler
//! succeeds, so a client never sees half a page followed by an error.

use crate::report::QueryParams;
use log::{debug, warn};
use regex::Regex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Route handler: shared state, parsed query, positional captures, output sink
pub type Handler<S> = fn(&S, &QueryParams, &[String], &mut Vec<u8>) -> anyhow::Result<()>;

/// One entry of the route table
pub struct Route<S> {
    pattern: Regex,
    handler: Handler<S>,
}

impl<S> Route<S> {
    /// Create a route; the pattern must match the whole path
    pub fn new(pattern: &str, handler: Handler<S>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("^(?:{})$", pattern))?,
            handler,
        })
    }

    /// Pattern as compiled (anchored)
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Capture groups of `path` if this route matches it
    fn captures(&self, path: &str) -> Option<Vec<String>> {
        self.pattern.captures(path).map(|caps| {
            caps.iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect()
        })
    }
}

/// A complete HTTP response, ready to be written to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// 200 with a rendered page
    pub fn html(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            headers: vec![
                ("Content-Type", "text/html".to_string()),
                ("Cache-Control", "no-cache".to_string()),
            ],
            body,
        }
    }

    /// Plain text response with the given status
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "text/plain".to_string())],
            body: body.into().into_bytes(),
        }
    }

    pub fn not_found() -> Self {
        Self::text(404, "Not Found")
    }

    pub fn not_implemented(method: &str) -> Self {
        Self::text(501, format!("Unsupported method ({})", method))
    }

    /// First value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Ordered route table
pub struct Router<S> {
    routes: Vec<Route<S>>,
}

impl<S> Router<S> {
    pub fn new(routes: Vec<Route<S>>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route<S>] {
        &self.routes
    }

    /// Dispatch a request target (`/path?query`) against the route table
    ///
    /// **Public** - never fails: no match gives 404, a failing or panicking
    /// handler gives 500 with a description of the failure.
    pub fn dispatch(&self, state: &S, target: &str) -> Response {
        let (path, query) = split_target(target);

        let Some((route, captures)) = self
            .routes
            .iter()
            .find_map(|route| route.captures(path).map(|caps| (route, caps)))
        else {
            debug!("No handler for {}", path);
            return Response::not_found();
        };

        debug!("Handling {} with {} ({:?})", path, route.pattern(), captures);

        let query = QueryParams::parse(query);
        let mut buffer = Vec::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            (route.handler)(state, &query, &captures, &mut buffer)
        }));

        match outcome {
            Ok(Ok(())) => Response::html(buffer),
            Ok(Err(err)) => {
                warn!("Handler for {} failed: {:#}", path, err);
                Response::text(500, format!("Error handling {}\n\n{:?}\n", target, err))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("Handler for {} panicked: {}", path, message);
                Response::text(500, format!("Error handling {}\n\npanic: {}\n", target, message))
            }
        }
    }
}

/// Split a request target into path and query, dropping any fragment
fn split_target(target: &str) -> (&str, &str) {
    let target = target.split('#').next().unwrap_or_default();
    target.split_once('?').unwrap_or((target, ""))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
