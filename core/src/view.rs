//! Display state for the book list and its transitions.
//!
//! # Design
//! `ViewState` is plain data with two transitions, `begin_fetch` and
//! `apply`. Keeping it free of channels and runtimes lets the async
//! controller and the C ABI drive the exact same machine.
//!
//! Renderers pick what to show with `branch()`, which applies the fixed
//! precedence loading > error > empty > data.

use crate::fetch::FetchResult;
use crate::types::Libro;

/// Message shown when the server returns an empty catalog.
pub const NO_BOOKS_MESSAGE: &str = "no books available";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub libros: Vec<Libro>,
}

/// The single branch a renderer should show for a `ViewState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewBranch<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Data(&'a [Libro]),
}

impl ViewState {
    /// Enter the loading state. Returns `false`, leaving the state
    /// untouched, when a fetch is already in flight.
    pub fn begin_fetch(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        self.is_loading = true;
        self.error_message = None;
        true
    }

    /// Settle the in-flight fetch with its outcome.
    ///
    /// A failure keeps the previous list; it stays hidden behind the error
    /// until the next successful fetch replaces it.
    pub fn apply(&mut self, result: FetchResult) {
        self.is_loading = false;
        match result {
            FetchResult::Success(libros) if libros.is_empty() => {
                self.libros = libros;
                self.error_message = Some(NO_BOOKS_MESSAGE.to_string());
            }
            FetchResult::Success(libros) => {
                self.libros = libros;
                self.error_message = None;
            }
            FetchResult::Failure(message) => {
                self.error_message = Some(message);
            }
        }
    }

    pub fn branch(&self) -> ViewBranch<'_> {
        if self.is_loading {
            ViewBranch::Loading
        } else if let Some(message) = &self.error_message {
            ViewBranch::Error(message)
        } else if self.libros.is_empty() {
            ViewBranch::Empty
        } else {
            ViewBranch::Data(&self.libros)
        }
    }
}
