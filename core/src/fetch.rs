//! One fetch attempt against the books endpoint.
//!
//! `LibrosFetcher` glues the sans-IO `LibrosClient` to a `Transport` and
//! folds every failure into `FetchResult::Failure`, so callers never see a
//! `Result` they could forget to handle.

use std::future::Future;

use crate::client::LibrosClient;
use crate::config::ClientConfig;
use crate::error::{FetchError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Libro;

/// Outcome of one fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Success(Vec<Libro>),
    Failure(String),
}

impl From<Result<Vec<Libro>, FetchError>> for FetchResult {
    fn from(result: Result<Vec<Libro>, FetchError>) -> Self {
        match result {
            Ok(libros) => FetchResult::Success(libros),
            Err(e) => FetchResult::Failure(e.to_string()),
        }
    }
}

/// Executes an `HttpRequest` and returns the response as plain data.
///
/// Any status code is a valid response; only failures to obtain a response
/// at all are errors.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// `reqwest`-backed transport. Uses the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    inner: reqwest::Client,
}

impl HttpTransport {
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.inner.get(&request.url),
        };
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let detail = error_chain(&err);
        if err.is_connect() {
            TransportError::Connect(detail)
        } else if err.is_timeout() {
            TransportError::Timeout(detail)
        } else {
            TransportError::Other(detail)
        }
    }
}

/// Join an error and its sources, e.g. `error sending request: tcp connect
/// error: Connection refused`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Fetches the book list through a `Transport`.
#[derive(Debug, Clone)]
pub struct LibrosFetcher<T> {
    client: LibrosClient,
    transport: T,
}

impl LibrosFetcher<HttpTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(LibrosClient::new(&config.base_url), HttpTransport::default())
    }
}

impl<T: Transport> LibrosFetcher<T> {
    pub fn new(client: LibrosClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &LibrosClient {
        &self.client
    }

    pub async fn try_fetch(&self) -> Result<Vec<Libro>, FetchError> {
        let request = self.client.build_list_libros();
        let response = self.transport.execute(request).await?;
        Ok(self.client.parse_list_libros(response)?)
    }

    pub async fn fetch(&self) -> FetchResult {
        let result = self.try_fetch().await;
        match &result {
            Ok(libros) => tracing::info!(count = libros.len(), "fetched libros"),
            Err(e) => tracing::warn!(error = %e, base_url = self.client.base_url(), "fetch failed"),
        }
        result.into()
    }
}
