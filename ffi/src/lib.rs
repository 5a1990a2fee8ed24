//! C-ABI wrapper around `biblioteca-core`.
//!
//! # Overview
//! Lets a native host (an Android or iOS app, a C test harness) reuse the
//! request builder, the response parser and the view state machine while
//! keeping its own HTTP stack and UI thread.
//!
//! A host typically:
//! 1. creates a client and a view,
//! 2. calls `biblioteca_view_begin`; if it returns true, builds the list
//!    request and executes it,
//! 3. feeds the response to `biblioteca_view_complete` (or the network error
//!    to `biblioteca_view_fail_transport`),
//! 4. renders `biblioteca_view_snapshot`.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The C caller owns all returned pointers and must call the matching
//!   `biblioteca_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use biblioteca_core::{FetchError, FetchResult, HttpResponse, TransportError, ViewState};

use types::*;

/// Borrow a C string as UTF-8, replacing invalid sequences.
fn read_c_str(s: *const c_char) -> String {
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `LibrosClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `biblioteca_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_client_new(base_url: *const c_char) -> *mut FfiLibrosClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let client = biblioteca_core::LibrosClient::new(&read_c_str(base_url));
        Box::into_raw(Box::new(FfiLibrosClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `biblioteca_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_client_free(client: *mut FfiLibrosClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// Build the `GET {base_url}/api/libros` request.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `biblioteca_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_build_list_libros(
    client: *const FfiLibrosClient,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_libros())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. Null `reason` and
/// `body` read as empty strings.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let read = |s: *const c_char| if s.is_null() { String::new() } else { read_c_str(s) };
    HttpResponse {
        status: resp.status,
        reason: read(resp.reason),
        headers: Vec::new(),
        body: read(resp.body),
    }
}

/// Parse the response of a list request.
///
/// Never returns null. Free the result with `biblioteca_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_parse_list_libros(
    client: *const FfiLibrosClient,
    response: *const FfiHttpResponse,
) -> *mut FfiLibrosResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiLibrosResult::null_arg("client");
        }
        if response.is_null() {
            return FfiLibrosResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_list_libros(ffi_response_to_core(resp)) {
            Ok(libros) => FfiLibrosResult::ok(libros),
            Err(e) => FfiLibrosResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiLibrosResult::panic("panic in biblioteca_parse_list_libros"))
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Create an empty view. Free it with `biblioteca_view_free`.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_view_new() -> *mut FfiViewController {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiViewController {
            state: ViewState::default(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a view created by `biblioteca_view_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_view_free(view: *mut FfiViewController) {
    if !view.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(view) });
        });
    }
}

/// Enter the loading state. Returns false, and the host must not start a
/// request, when a fetch is already in flight or `view` is null.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_view_begin(view: *mut FfiViewController) -> bool {
    if view.is_null() {
        return false;
    }
    let view = unsafe { &mut *view };
    catch_unwind(AssertUnwindSafe(|| view.state.begin_fetch())).unwrap_or(false)
}

/// Settle the in-flight fetch with the server's response.
///
/// Returns false if any argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_view_complete(
    view: *mut FfiViewController,
    client: *const FfiLibrosClient,
    response: *const FfiHttpResponse,
) -> bool {
    if view.is_null() || client.is_null() || response.is_null() {
        return false;
    }
    let view = unsafe { &mut *view };
    catch_unwind(AssertUnwindSafe(|| {
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let result = client
            .inner
            .parse_list_libros(ffi_response_to_core(resp))
            .map_err(FetchError::from);
        view.state.apply(FetchResult::from(result));
        true
    }))
    .unwrap_or(false)
}

/// Settle the in-flight fetch with a network failure reported by the host.
///
/// `detail` is the host's error text and may be null. The resulting message
/// tells the user to check the server is reachable and names the desktop and
/// emulator addresses.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_view_fail_transport(
    view: *mut FfiViewController,
    detail: *const c_char,
) -> bool {
    if view.is_null() {
        return false;
    }
    let view = unsafe { &mut *view };
    catch_unwind(AssertUnwindSafe(|| {
        let detail = if detail.is_null() {
            "network error".to_string()
        } else {
            read_c_str(detail)
        };
        let err = FetchError::from(TransportError::Other(detail));
        view.state.apply(FetchResult::Failure(err.to_string()));
        true
    }))
    .unwrap_or(false)
}

/// Copy the current view state. Returns null if `view` is null.
/// Free the snapshot with `biblioteca_free_view_state`.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_view_snapshot(view: *const FfiViewController) -> *mut FfiViewState {
    catch_unwind(|| {
        if view.is_null() {
            return std::ptr::null_mut();
        }
        let view = unsafe { &*view };
        FfiViewState::from_core(&view.state)
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `biblioteca_build_list_libros`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        for h in unsafe { reclaim_vec(req.headers, req.headers_len) } {
            free_c_string(h.key);
            free_c_string(h.value);
        }
    });
}

/// Free a result returned by `biblioteca_parse_list_libros`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_free_result(result: *mut FfiLibrosResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { *Box::from_raw(result) };
        free_c_string(result.error_message);
        result.libros.free();
    });
}

/// Free a snapshot returned by `biblioteca_view_snapshot`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn biblioteca_free_view_state(state: *mut FfiViewState) {
    if state.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let state = unsafe { *Box::from_raw(state) };
        free_c_string(state.error_message);
        state.libros.free();
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
