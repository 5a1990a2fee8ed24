//! Development server for the library books API.
//!
//! Serves the read side of the upstream API from an in-memory catalog so the
//! client can be exercised without the real backend. Setting a forced status
//! makes every route fail with it, which drives the client's error paths.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Autor {
    pub id_autor: i64,
    pub nombre: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Libro {
    pub id_libro: i64,
    pub titulo: String,
    pub autor: Autor,
    pub categoria: String,
    pub cantidad_disponible: i32,
}

/// JSON error body, shaped like the upstream backend's.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.status.as_u16(),
            error: self.status.canonical_reason().unwrap_or_default().to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Clone)]
struct AppState {
    catalog: Arc<Vec<Libro>>,
    fail_status: Option<StatusCode>,
}

impl AppState {
    fn check(&self) -> Result<(), ApiError> {
        match self.fail_status {
            Some(status) => Err(ApiError {
                status,
                message: "forced failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub fail_status: Option<u16>,
    pub empty: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `PORT` (default 8080), `MOCK_HOST` (default 127.0.0.1),
    /// `MOCK_FAIL_STATUS` and `MOCK_EMPTY=1`. Unparseable values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("MOCK_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            fail_status: lookup("MOCK_FAIL_STATUS").and_then(|s| s.parse().ok()),
            empty: lookup("MOCK_EMPTY").is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn router(&self) -> Router {
        let libros = if self.empty { Vec::new() } else { seed() };
        match self.fail_status.and_then(|s| StatusCode::from_u16(s).ok()) {
            Some(status) => failing_app(status),
            None => app_with(libros),
        }
    }
}

fn autor(id_autor: i64, nombre: &str) -> Autor {
    Autor {
        id_autor,
        nombre: nombre.to_string(),
    }
}

/// The catalog the server starts with.
pub fn seed() -> Vec<Libro> {
    let garcia_marquez = autor(1, "Gabriel García Márquez");
    let borges = autor(2, "Jorge Luis Borges");
    let allende = autor(3, "Isabel Allende");
    let herbert = autor(4, "Frank Herbert");
    let entries = [
        ("Cien años de soledad", &garcia_marquez, "Novela", 5),
        ("El amor en los tiempos del cólera", &garcia_marquez, "Novela", 2),
        ("Ficciones", &borges, "Cuento", 3),
        ("El Aleph", &borges, "Cuento", 0),
        ("La casa de los espíritus", &allende, "Novela", 4),
        ("Dune", &herbert, "Ciencia ficción", 1),
    ];
    entries
        .into_iter()
        .zip(1..)
        .map(|((titulo, autor, categoria, cantidad), id_libro)| Libro {
            id_libro,
            titulo: titulo.to_string(),
            autor: autor.clone(),
            categoria: categoria.to_string(),
            cantidad_disponible: cantidad,
        })
        .collect()
}

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(libros: Vec<Libro>) -> Router {
    router(AppState {
        catalog: Arc::new(libros),
        fail_status: None,
    })
}

/// Router whose every route answers with `status`.
pub fn failing_app(status: StatusCode) -> Router {
    router(AppState {
        catalog: Arc::new(Vec::new()),
        fail_status: Some(status),
    })
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/libros", get(list_libros))
        .route("/api/libros/{id}", get(get_libro))
        .route("/api/libros/autor/{nombre}", get(libros_by_autor))
        .route("/api/libros/categoria/{categoria}", get(libros_by_categoria))
        .with_state(state)
}

pub async fn run(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn list_libros(State(state): State<AppState>) -> Result<Json<Vec<Libro>>, ApiError> {
    state.check()?;
    tracing::info!(count = state.catalog.len(), "list libros");
    Ok(Json(state.catalog.to_vec()))
}

async fn get_libro(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Libro>, ApiError> {
    state.check()?;
    state
        .catalog
        .iter()
        .find(|l| l.id_libro == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError {
            status: StatusCode::NOT_FOUND,
            message: format!("Libro no encontrado con ID: {id}"),
        })
}

async fn libros_by_autor(
    State(state): State<AppState>,
    Path(nombre): Path<String>,
) -> Result<Json<Vec<Libro>>, ApiError> {
    state.check()?;
    Ok(Json(filter(&state.catalog, |l| l.autor.nombre == nombre)))
}

async fn libros_by_categoria(
    State(state): State<AppState>,
    Path(categoria): Path<String>,
) -> Result<Json<Vec<Libro>>, ApiError> {
    state.check()?;
    Ok(Json(filter(&state.catalog, |l| l.categoria == categoria)))
}

fn filter(catalog: &[Libro], pred: impl Fn(&Libro) -> bool) -> Vec<Libro> {
    catalog.iter().filter(|l| pred(l)).cloned().collect()
}
