//! Domain DTOs for the books endpoint.
//!
//! # Design
//! These types mirror the server's `LibroResponseDTO` wire shape (camelCase
//! keys) but are defined independently from the mock-server crate.
//! Integration tests catch any schema drift between the two crates.
//!
//! `cantidad_disponible` is unsigned, so a negative count on the wire fails
//! deserialization instead of producing an invalid `Libro`.

use serde::{Deserialize, Serialize};

/// Author attribution embedded in every book. Held by value, never shared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Autor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_autor: Option<i64>,
    pub nombre: String,
}

/// A single catalog entry returned by `GET /api/libros`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Libro {
    pub id_libro: i64,
    pub titulo: String,
    pub autor: Autor,
    pub categoria: String,
    pub cantidad_disponible: u32,
}

impl Libro {
    /// True when at least one copy can be lent out.
    pub fn is_available(&self) -> bool {
        self.cantidad_disponible > 0
    }
}
