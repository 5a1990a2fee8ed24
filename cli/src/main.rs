use std::process::ExitCode;

use anyhow::Context;
use biblioteca_cli::args::{command, Options};
use biblioteca_cli::render::render;
use biblioteca_cli::session::interactive;
use biblioteca_cli::telemetry;
use biblioteca_core::{LibrosController, LibrosFetcher, ViewBranch, ViewState};
use tokio::io::BufReader;
use tokio::sync::watch;

/// Book list in the terminal.
///
/// Environment variables can be set directly or loaded from a .env file in
/// the working directory:
/// - BIBLIOTECA_BASE_URL: API base URL (default http://localhost:8080)
/// - BIBLIOTECA_TARGET: "desktop" or "emulator"
/// - RUST_LOG: log filter, logs are written to stderr
///
/// Interactive commands: `r` or an empty line reloads, `q` quits.
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();
    telemetry::init("info");

    let options = Options::from_matches(&command().get_matches());
    let config = options
        .client_config(|key| std::env::var(key).ok())
        .context("invalid client configuration")?;
    tracing::info!(base_url = %config.base_url, "starting");

    let controller = LibrosController::mount(LibrosFetcher::from_config(&config));
    if options.once {
        return once(controller.subscribe()).await;
    }
    interactive(&controller, BufReader::new(tokio::io::stdin()), draw).await?;
    Ok(ExitCode::SUCCESS)
}

async fn once(mut rx: watch::Receiver<ViewState>) -> anyhow::Result<ExitCode> {
    let state = rx.wait_for(|s| !s.is_loading).await?.clone();
    print!("{}", render(&state));
    Ok(match state.branch() {
        ViewBranch::Data(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn draw(state: &ViewState) {
    println!("{}", render(state));
}
