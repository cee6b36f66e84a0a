//! HTTP transport on axum.
//!
//! Every request lands in a single fallback handler that hands the path and
//! query to the viewer's own `Router`. Request parsing, keep-alive and
//! malformed input are left to hyper; a stalled client parks a task, never a
//! thread.

use super::router::{Response, Router};
use crate::utils::error::ServerError;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response as HttpResponse};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Route table and dataset shared by every connection
struct ViewerState<S> {
    router: Arc<Router<S>>,
    state: Arc<S>,
}

impl<S> Clone for ViewerState<S> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            state: Arc::clone(&self.state),
        }
    }
}

/// Bind `addr` and serve until the listener fails
///
/// **Public** - main entry point for the transport
///
/// # Errors
/// * `ServerError::Bind` - The address cannot be bound
/// * `ServerError::Io` - The listener fails outright
pub async fn serve<S>(addr: &str, router: Arc<Router<S>>, state: Arc<S>) -> Result<(), ServerError>
where
    S: Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    info!("Serving on http://{}/", listener.local_addr()?);
    serve_listener(listener, router, state).await
}

/// Serve connections from an already bound listener
pub async fn serve_listener<S>(
    listener: TcpListener,
    router: Arc<Router<S>>,
    state: Arc<S>,
) -> Result<(), ServerError>
where
    S: Send + Sync + 'static,
{
    axum::serve(listener, app(router, state)).await?;
    Ok(())
}

/// Build the axum application: one fallback forwarding to `router`
pub fn app<S>(router: Arc<Router<S>>, state: Arc<S>) -> axum::Router
where
    S: Send + Sync + 'static,
{
    axum::Router::new()
        .fallback(forward::<S>)
        .with_state(ViewerState { router, state })
}

async fn forward<S>(State(viewer): State<ViewerState<S>>, method: Method, uri: Uri) -> HttpResponse
where
    S: Send + Sync + 'static,
{
    if method != Method::GET {
        return into_http(Response::not_implemented(method.as_str()));
    }

    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    debug!("GET {}", target);

    // Handlers are synchronous and may do real work on large profiles
    let dispatched =
        tokio::task::spawn_blocking(move || viewer.router.dispatch(&viewer.state, &target)).await;

    match dispatched {
        Ok(response) => into_http(response),
        Err(e) => {
            warn!("Dispatch task failed: {}", e);
            into_http(Response::text(500, "Internal Server Error"))
        }
    }
}

/// Convert a buffered viewer response into an axum response
fn into_http(response: Response) -> HttpResponse {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HttpResponse::builder().status(status);
    for (name, value) in response.headers {
        builder = builder.header(name, value);
    }

    builder.body(Body::from(response.body)).unwrap_or_else(|e| {
        warn!("Failed to build response: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::QueryParams;
    use crate::server::router::Route;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn hello(_: &(), _: &QueryParams, _: &[String], out: &mut Vec<u8>) -> anyhow::Result<()> {
        out.extend_from_slice(b"hello");
        Ok(())
    }

    async fn start() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Arc::new(Router::new(vec![Route::new("/", hello).unwrap()]));
        tokio::spawn(serve_listener(listener, router, Arc::new(())));
        addr
    }

    async fn exchange(addr: SocketAddr, request: &[u8]) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request).await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        String::from_utf8_lossy(&response).into_owned()
    }

    #[test]
    fn test_into_http_keeps_status_headers_and_body() {
        let response = into_http(Response::html(b"page".to_vec()));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/html");
        assert_eq!(response.headers()["cache-control"], "no-cache");
    }

    #[tokio::test]
    async fn test_get_round_trip() {
        let addr = start().await;
        let response = exchange(addr, b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").await;

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("content-type: text/html\r\n"));
        assert!(response.contains("cache-control: no-cache\r\n"));
        assert!(response.ends_with("\r\n\r\nhello"));
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let addr = start().await;
        let response = exchange(addr, b"GET /nope HTTP/1.1\r\nConnection: close\r\n\r\n").await;
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let addr = start().await;
        let response = exchange(
            addr,
            b"POST / HTTP/1.1\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 501 Not Implemented\r\n"));
    }

    #[tokio::test]
    async fn test_non_utf8_target_is_rejected() {
        let addr = start().await;
        let response = exchange(addr, b"GET /?filter=\xff\xfe HTTP/1.1\r\n\r\n").await;
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    }

    #[tokio::test]
    async fn test_malformed_request_line() {
        let addr = start().await;
        let response = exchange(addr, b"garbage\r\n\r\n").await;
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    }

    #[tokio::test]
    async fn test_stalled_client_does_not_block_others() {
        let addr = start().await;

        let mut stalled = TcpStream::connect(addr).await.unwrap();
        stalled.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();

        let response = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            exchange(addr, b"GET / HTTP/1.1\r\nConnection: close\r\n\r\n"),
        )
        .await
        .unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    }
}
