use callprof_viewer::profile::{CallStats, Function, ProfileDataset, Totals};
use callprof_viewer::server::{serve_listener, viewer_router, Response, Router};
use std::sync::Arc;
use std::thread;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn dataset() -> ProfileDataset {
    let a = Function::new("/proj/app/a.py", 1, "A");
    let b = Function::new("/proj/app/b.py", 5, "B");
    ProfileDataset::new(
        vec!["scenario.prof".to_string()],
        vec![
            (a.clone(), CallStats::new(Totals::new(10, 10, 2.0, 5.0))),
            (
                b,
                CallStats::new(Totals::new(1, 1, 3.0, 3.0)).with_caller(a, Totals::new(1, 1, 3.0, 3.0)),
            ),
        ],
    )
    .unwrap()
}

fn setup() -> (Router<ProfileDataset>, ProfileDataset) {
    (viewer_router().unwrap(), dataset())
}

fn body(response: &Response) -> String {
    String::from_utf8_lossy(&response.body).into_owned()
}

#[test]
fn test_index_route() {
    let (router, dataset) = setup();
    let response = router.dispatch(&dataset, "/");

    assert_eq!(response.status, 200);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.header("Cache-Control"), Some("no-cache"));
    assert!(body(&response).contains("scenario.prof"));
}

#[test]
fn test_function_route() {
    let (router, dataset) = setup();
    let a = dataset.registry().id_of(&Function::new("/proj/app/a.py", 1, "A")).unwrap();
    let response = router.dispatch(&dataset, &format!("/func/{}", a));

    assert_eq!(response.status, 200);
    let page = body(&response);
    assert!(page.contains("app/b.py:5:B"));
    assert!(page.contains("3.00s"));
}

#[test]
fn test_unknown_path_is_404() {
    let (router, dataset) = setup();
    assert_eq!(router.dispatch(&dataset, "/nope").status, 404);
    assert_eq!(router.dispatch(&dataset, "/func").status, 404);
}

#[test]
fn test_non_numeric_id_is_500() {
    let (router, dataset) = setup();
    let response = router.dispatch(&dataset, "/func/abc");

    assert_eq!(response.status, 500);
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert!(body(&response).contains("Invalid function id: \"abc\""));
}

#[test]
fn test_signed_id_is_500() {
    let (router, dataset) = setup();
    let response = router.dispatch(&dataset, "/func/+0");

    assert_eq!(response.status, 500);
    assert!(body(&response).contains("Invalid function id: \"+0\""));
}

#[test]
fn test_unknown_id_is_500() {
    let (router, dataset) = setup();
    let response = router.dispatch(&dataset, "/func/99");

    assert_eq!(response.status, 500);
    assert!(body(&response).contains("Unknown function id: 99"));
}

#[test]
fn test_invalid_sort_key_is_500() {
    let (router, dataset) = setup();
    let response = router.dispatch(&dataset, "/?sort=bogus");

    assert_eq!(response.status, 500);
    assert!(body(&response).contains("Invalid sort key"));
}

#[test]
fn test_invalid_filter_is_500() {
    let (router, dataset) = setup();
    let response = router.dispatch(&dataset, "/?filter=%28unclosed");

    assert_eq!(response.status, 500);
    assert!(body(&response).contains("Invalid filter expression"));
}

#[test]
fn test_failure_does_not_affect_next_request() {
    let (router, dataset) = setup();
    assert_eq!(router.dispatch(&dataset, "/func/abc").status, 500);
    assert_eq!(router.dispatch(&dataset, "/").status, 200);
}

#[test]
fn test_filter_preserved_in_links() {
    let (router, dataset) = setup();
    let page = body(&router.dispatch(&dataset, "/?filter=app%2Fa"));

    assert!(page.contains("value=\"app/a\""));
    assert!(page.contains("href=\"/func/0?filter=app%2Fa\""));
    assert!(!page.contains("app/b.py:5:B"));
}

#[test]
fn test_concurrent_requests_match_sequential() {
    let (router, dataset) = setup();
    let targets = ["/", "/?sort=tt", "/?sort=ipc&filter=b", "/func/0", "/func/1?filter=a", "/func/x", "/nope"];
    let expected: Vec<Response> = targets.iter().map(|t| router.dispatch(&dataset, t)).collect();

    let router = Arc::new(router);
    let dataset = Arc::new(dataset);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let router = Arc::clone(&router);
            let dataset = Arc::clone(&dataset);
            thread::spawn(move || {
                targets
                    .iter()
                    .map(|t| router.dispatch(&dataset, t))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

async fn fetch(addr: std::net::SocketAddr, target: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n", target);
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_tcp_round_trip() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Arc::new(viewer_router().unwrap());
    let dataset = Arc::new(dataset());
    tokio::spawn(serve_listener(listener, router, dataset));

    let index = fetch(addr, "/").await;
    assert!(index.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(index.contains("app/a.py:1:A"));

    assert!(fetch(addr, "/nope").await.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(fetch(addr, "/func/abc")
        .await
        .starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
    assert!(fetch(addr, "/").await.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[tokio::test]
async fn test_stalled_client_does_not_block_reports() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_listener(listener, Arc::new(viewer_router().unwrap()), Arc::new(dataset())));

    let mut stalled = TcpStream::connect(addr).await.unwrap();
    stalled.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();

    let index = tokio::time::timeout(std::time::Duration::from_secs(5), fetch(addr, "/"))
        .await
        .unwrap();
    assert!(index.contains("app/a.py:1:A"));
}
