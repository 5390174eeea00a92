//! Listing behavior against a canned local HTTP server.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use reposync_github::{Client, GithubError, RepoFilter};

/// Serve one canned HTTP response per expected request, logging request
/// lines. Closes each connection so the client reconnects per request.
struct CannedServer {
    base: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: thread::JoinHandle<()>,
}

impl CannedServer {
    fn start(responses: Vec<(u16, String)>) -> CannedServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let base = format!("http://{}", listener.local_addr().expect("addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();
        let handle = thread::spawn(move || {
            for (status, body) in responses {
                let (stream, _) = listener.accept().expect("accept");
                let mut reader = BufReader::new(stream);
                let mut request_line = String::new();
                reader.read_line(&mut request_line).expect("request line");
                log.lock()
                    .expect("request log")
                    .push(request_line.trim_end().to_string());
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).expect("header");
                    if header == "\r\n" || header == "\n" || header.is_empty() {
                        break;
                    }
                }
                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{body}",
                    body.len()
                );
                let mut stream = reader.into_inner();
                stream.write_all(response.as_bytes()).expect("respond");
                stream.flush().expect("flush");
            }
        });
        CannedServer {
            base,
            requests,
            handle,
        }
    }

    fn finish(self) -> Vec<String> {
        self.handle.join().expect("server thread");
        Arc::try_unwrap(self.requests)
            .expect("request log still shared")
            .into_inner()
            .expect("request log")
    }
}

fn page_of(names: Vec<String>) -> String {
    let repos: Vec<serde_json::Value> = names
        .into_iter()
        .map(|name| serde_json::json!({ "name": name, "language": "Rust" }))
        .collect();
    serde_json::Value::Array(repos).to_string()
}

#[test]
fn listing_follows_pages_until_a_short_one() {
    let full_page = page_of((0..100).map(|i| format!("repo{i:03}")).collect());
    let short_page = page_of(vec!["zz-last".to_string(), "zz-more".to_string()]);
    let server = CannedServer::start(vec![(200, full_page), (200, short_page)]);

    let client = Client::with_base("t", server.base.clone());
    let names = client
        .list_repo_names("acme", &RepoFilter::default())
        .expect("list");

    assert_eq!(names.len(), 102);
    assert_eq!(names[0], "repo000");
    assert_eq!(names[101], "zz-more");

    let requests = server.finish();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].contains("GET /orgs/acme/repos"), "got: {requests:?}");
    assert!(requests[0].contains("per_page=100"), "got: {requests:?}");
    assert!(requests[0].contains("page=1"), "got: {requests:?}");
    assert!(requests[1].contains("page=2"), "got: {requests:?}");
}

#[test]
fn listing_falls_back_to_the_user_endpoint_on_404() {
    let server = CannedServer::start(vec![
        (404, r#"{"message":"Not Found"}"#.to_string()),
        (200, r#"[{"name":"dotfiles","language":"Go"}]"#.to_string()),
    ]);

    let client = Client::with_base("t", server.base.clone());
    let names = client
        .list_repo_names("solo", &RepoFilter::default())
        .expect("list");

    assert_eq!(names, vec!["dotfiles".to_string()]);

    let requests = server.finish();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].contains("/orgs/solo/repos"), "got: {requests:?}");
    assert!(requests[1].contains("/users/solo/repos"), "got: {requests:?}");
}

#[test]
fn non_404_errors_surface_without_a_fallback() {
    let server = CannedServer::start(vec![(500, r#"{"message":"boom"}"#.to_string())]);

    let client = Client::with_base("t", server.base.clone());
    let err = client
        .list_repo_names("acme", &RepoFilter::default())
        .expect_err("should fail");

    match err {
        GithubError::Status { status, .. } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.finish().len(), 1);
}
