use mock_server::Settings;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_env();
    let addr = settings.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, fail_status = ?settings.fail_status, empty = settings.empty, "listening");
    mock_server::run(listener, settings.router()).await
}
