//! Plain-text rendering of a `ViewState`.

use std::fmt::Write;

use biblioteca_core::{Libro, ViewBranch, ViewState};

pub const TITLE: &str = "Biblioteca - Lista de Libros";

/// Label of the reload action; it reads as disabled while loading.
pub fn reload_label(state: &ViewState) -> &'static str {
    if state.is_loading {
        "Cargando..."
    } else {
        "Recargar Libros"
    }
}

pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "[{}]", reload_label(state));
    out.push('\n');

    match state.branch() {
        ViewBranch::Loading => out.push_str("  ...\n"),
        ViewBranch::Error(message) => {
            for line in message.lines() {
                let _ = writeln!(out, "! {line}");
            }
        }
        ViewBranch::Empty => out.push_str("No hay libros para mostrar\n"),
        ViewBranch::Data(libros) => {
            for (i, libro) in libros.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                card(&mut out, libro);
            }
        }
    }
    out
}

fn card(out: &mut String, libro: &Libro) {
    let _ = writeln!(out, "{}", libro.titulo);
    let _ = writeln!(out, "  Autor: {}", libro.autor.nombre);
    let _ = writeln!(out, "  Categoría: {}", libro.categoria);
    if libro.is_available() {
        let _ = writeln!(out, "  Disponibles: {}", libro.cantidad_disponible);
    } else {
        let _ = writeln!(out, "  Disponibles: 0 (agotado)");
    }
}
