//! Drive the C ABI the way a native host would: the library builds the
//! request and owns the view state, ureq plays the host's HTTP stack.

use std::ffi::{CStr, CString};

use axum::http::StatusCode;
use biblioteca_ffi::types::{FfiHttpMethod, FfiHttpRequest, FfiHttpResponse};
use biblioteca_ffi::*;

/// Serve `router` on an ephemeral port from a background thread.
fn spawn_server(router: axum::Router) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, router).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Outcome of the host executing a request.
enum HostResult {
    Response { status: u16, body: CString },
    Failed(CString),
}

fn execute(req: &FfiHttpRequest) -> HostResult {
    let url = unsafe { CStr::from_ptr(req.url) }.to_str().unwrap();
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let call = match req.method {
        FfiHttpMethod::Get => agent.get(url).call(),
    };
    match call {
        Ok(mut response) => HostResult::Response {
            status: response.status().as_u16(),
            body: CString::new(response.body_mut().read_to_string().unwrap_or_default()).unwrap(),
        },
        Err(e) => HostResult::Failed(CString::new(e.to_string()).unwrap()),
    }
}

/// One full fetch attempt; returns the settled error message, if any, and
/// the number of books.
fn fetch_once(base_url: &str) -> (Option<String>, u32) {
    let url = CString::new(base_url).unwrap();
    let client = biblioteca_client_new(url.as_ptr());
    let view = biblioteca_view_new();

    assert!(biblioteca_view_begin(view));
    let req = biblioteca_build_list_libros(client);
    match execute(unsafe { &*req }) {
        HostResult::Response { status, body } => {
            let resp = FfiHttpResponse {
                status,
                reason: std::ptr::null(),
                body: body.as_ptr(),
            };
            assert!(biblioteca_view_complete(view, client, &resp));
        }
        HostResult::Failed(detail) => {
            assert!(biblioteca_view_fail_transport(view, detail.as_ptr()));
        }
    }
    biblioteca_free_request(req);

    let snap = biblioteca_view_snapshot(view);
    let s = unsafe { &*snap };
    assert!(!s.is_loading);
    let message = (!s.error_message.is_null())
        .then(|| unsafe { CStr::from_ptr(s.error_message) }.to_str().unwrap().to_string());
    let len = s.libros.len;

    biblioteca_free_view_state(snap);
    biblioteca_view_free(view);
    biblioteca_client_free(client);
    (message, len)
}

#[test]
fn seeded_catalog_reaches_the_view() {
    let base_url = spawn_server(mock_server::app());
    let (message, len) = fetch_once(&base_url);
    assert_eq!(message, None);
    assert_eq!(len as usize, mock_server::seed().len());
}

#[test]
fn empty_catalog_reaches_the_view_as_message() {
    let base_url = spawn_server(mock_server::app_with(Vec::new()));
    let (message, len) = fetch_once(&base_url);
    assert_eq!(message.as_deref(), Some("no books available"));
    assert_eq!(len, 0);
}

#[test]
fn server_error_reaches_the_view_with_status() {
    let base_url = spawn_server(mock_server::failing_app(StatusCode::SERVICE_UNAVAILABLE));
    let (message, _) = fetch_once(&base_url);
    assert_eq!(message.as_deref(), Some("Error: 503 - Service Unavailable"));
}

#[test]
fn unreachable_server_reaches_the_view_with_guidance() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (message, len) = fetch_once(&format!("http://{addr}"));
    let message = message.unwrap();
    assert!(message.contains("http://localhost:8080"), "{message}");
    assert!(message.contains("http://10.0.2.2:8080"), "{message}");
    assert_eq!(len, 0);
}
