//! Terminal front end for the books client.
//!
//! The binary mounts a `LibrosController`, redraws every `ViewState` the
//! controller publishes and turns stdin commands into `trigger()` calls.
//! Everything but stdin and stdout wiring lives here so it can be tested
//! without a terminal.

pub mod args;
pub mod render;
pub mod session;
pub mod telemetry;
