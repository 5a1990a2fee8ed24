//! Stateless HTTP request builder and response parser for the books API.
//!
//! # Design
//! `LibrosClient` holds only a `base_url`. The list operation is split into
//! `build_list_libros`, which produces an `HttpRequest`, and
//! `parse_list_libros`, which consumes an `HttpResponse`. The caller executes
//! the round-trip in between, keeping this module deterministic and free of
//! I/O.

use crate::error::ApiError;
use crate::http::{canonical_reason, HttpMethod, HttpRequest, HttpResponse};
use crate::types::Libro;

/// Path of the books collection, relative to the base URL.
pub const LIBROS_PATH: &str = "/api/libros";

/// Synchronous, stateless client for the books API.
#[derive(Debug, Clone)]
pub struct LibrosClient {
    base_url: String,
}

impl LibrosClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_libros(&self) -> HttpRequest {
        let url = format!("{}{LIBROS_PATH}", self.base_url);
        tracing::debug!(%url, "built list request");
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Parse the body of a list response. Either every element becomes a
    /// `Libro` or the whole response is rejected.
    pub fn parse_list_libros(&self, response: HttpResponse) -> Result<Vec<Libro>, ApiError> {
        let body = check_status(response)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Map a non-2xx status to `ApiError::Http`, otherwise hand back the body.
fn check_status(response: HttpResponse) -> Result<String, ApiError> {
    if response.is_success() {
        return Ok(response.body);
    }
    let reason = if response.reason.is_empty() {
        canonical_reason(response.status).to_string()
    } else {
        response.reason
    };
    Err(ApiError::Http {
        status: response.status,
        reason,
        body: response.body,
    })
}
