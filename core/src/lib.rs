//! Client core for the library books API.
//!
//! # Overview
//! Fetches the book catalog from `GET {base_url}/api/libros` and turns each
//! fetch attempt into a display state with loading, error, empty and data
//! branches.
//!
//! # Design
//! - `LibrosClient` is sans-IO: it builds `HttpRequest` values and parses
//!   `HttpResponse` values. Native hosts can run the network call themselves
//!   and reuse the parser (see the `biblioteca-ffi` crate).
//! - `LibrosFetcher` pairs the client with a `Transport`; `HttpTransport` is
//!   the `reqwest` implementation.
//! - `ViewState` holds the pure state machine; `LibrosController` publishes
//!   it through a `watch` channel and enforces one in-flight fetch.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod http;
pub mod types;
pub mod view;

pub use client::LibrosClient;
pub use config::{ClientConfig, ConfigError, Target};
pub use controller::LibrosController;
pub use error::{ApiError, FetchError, TransportError};
pub use fetch::{FetchResult, HttpTransport, LibrosFetcher, Transport};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Autor, Libro};
pub use view::{ViewBranch, ViewState, NO_BOOKS_MESSAGE};
