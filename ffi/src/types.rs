//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! enums with explicit discriminants. Conversions live here to keep `lib.rs`
//! focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use biblioteca_core::{ApiError, HttpMethod, Libro, ViewState};

/// Opaque handle to a `LibrosClient`.
pub struct FfiLibrosClient {
    pub(crate) inner: biblioteca_core::LibrosClient,
}

/// Opaque handle to a `ViewState` driven by the host.
pub struct FfiViewController {
    pub(crate) state: ViewState,
}

/// Move a Rust string into a C string owned by the caller. Interior NUL bytes
/// are dropped rather than failing the whole conversion.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

/// Free a C string created by `into_c_string`. Null is ignored.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request for the C caller to execute.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: biblioteca_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: into_c_string(k),
                value: into_c_string(v),
            })
            .collect();
        let (headers, headers_len) = leak_vec(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: into_c_string(req.url),
            headers,
            headers_len,
        }))
    }
}

/// Hand a `Vec` to C as pointer + length. Empty vectors become null.
fn leak_vec<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let boxed = items.into_boxed_slice();
    (Box::into_raw(boxed) as *mut T, len)
}

/// Take back a pointer + length produced by `leak_vec`.
pub(crate) unsafe fn reclaim_vec<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    Box::from_raw(slice).into_vec()
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller builds this on the stack after executing the request. The
/// FFI layer reads but never frees these fields. `reason` may be null, in
/// which case the canonical phrase for `status` is used.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub reason: *const c_char,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Book types
// ---------------------------------------------------------------------------

/// A single book exposed to C. `autor_id` is -1 when the server sent none.
#[repr(C)]
pub struct FfiLibro {
    pub id_libro: i64,
    pub titulo: *mut c_char,
    pub autor_id: i64,
    pub autor_nombre: *mut c_char,
    pub categoria: *mut c_char,
    pub cantidad_disponible: u32,
}

impl From<Libro> for FfiLibro {
    fn from(libro: Libro) -> Self {
        FfiLibro {
            id_libro: libro.id_libro,
            titulo: into_c_string(libro.titulo),
            autor_id: libro.autor.id_autor.unwrap_or(-1),
            autor_nombre: into_c_string(libro.autor.nombre),
            categoria: into_c_string(libro.categoria),
            cantidad_disponible: libro.cantidad_disponible,
        }
    }
}

/// A list of books exposed to C, in server order.
#[repr(C)]
pub struct FfiLibroList {
    pub items: *mut FfiLibro,
    pub len: u32,
}

impl FfiLibroList {
    pub(crate) fn empty() -> Self {
        FfiLibroList {
            items: std::ptr::null_mut(),
            len: 0,
        }
    }

    pub(crate) fn from_core(libros: Vec<Libro>) -> Self {
        let (items, len) = leak_vec(libros.into_iter().map(FfiLibro::from).collect());
        FfiLibroList { items, len }
    }

    /// Release every item and its strings.
    pub(crate) fn free(self) {
        for libro in unsafe { reclaim_vec(self.items, self.len) } {
            free_c_string(libro.titulo);
            free_c_string(libro.autor_nombre);
            free_c_string(libro.categoria);
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiLibrosResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Deserialization = 2,
    Panic = 3,
    NullArg = 4,
}

/// Result envelope for `biblioteca_parse_list_libros`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `libros`
/// holds the parsed books. On failure `error_message` is a human-readable C
/// string and `libros` is empty.
#[repr(C)]
pub struct FfiLibrosResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub libros: FfiLibroList,
}

impl FfiLibrosResult {
    pub(crate) fn ok(libros: Vec<Libro>) -> *mut Self {
        Box::into_raw(Box::new(FfiLibrosResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            libros: FfiLibroList::from_core(libros),
        }))
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::Http { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::Deserialization(_) => (FfiErrorCode::Deserialization, 0),
        };
        Self::failure(error_code, http_status, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, 0, msg.to_string())
    }

    fn failure(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiLibrosResult {
            error_code,
            error_message: into_c_string(msg),
            http_status,
            libros: FfiLibroList::empty(),
        }))
    }
}

/// Snapshot of the host-driven view state. `error_message` is null when no
/// error is shown.
#[repr(C)]
pub struct FfiViewState {
    pub is_loading: bool,
    pub error_message: *mut c_char,
    pub libros: FfiLibroList,
}

impl FfiViewState {
    pub(crate) fn from_core(state: &ViewState) -> *mut Self {
        Box::into_raw(Box::new(FfiViewState {
            is_loading: state.is_loading,
            error_message: state
                .error_message
                .clone()
                .map_or(std::ptr::null_mut(), into_c_string),
            libros: FfiLibroList::from_core(state.libros.clone()),
        }))
    }
}
