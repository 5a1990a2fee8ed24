//! Render what the controller settles into against the development server.

use biblioteca_cli::render::render;
use biblioteca_core::{ClientConfig, LibrosController, LibrosFetcher};

async fn settled_output(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener, router));

    let config = ClientConfig::new(format!("http://{addr}"));
    let ctl = LibrosController::mount(LibrosFetcher::from_config(&config));
    let mut rx = ctl.subscribe();
    let state = rx.wait_for(|s| !s.is_loading).await.unwrap().clone();
    render(&state)
}

#[tokio::test]
async fn seeded_catalog_renders_cards() {
    let out = settled_output(mock_server::app()).await;

    assert!(out.contains("[Recargar Libros]"));
    assert!(out.contains("Cien años de soledad\n  Autor: Gabriel García Márquez\n  Categoría: Novela\n  Disponibles: 5\n"));
    assert!(out.contains("El Aleph\n  Autor: Jorge Luis Borges\n  Categoría: Cuento\n  Disponibles: 0 (agotado)\n"));
}

#[tokio::test]
async fn empty_catalog_renders_message() {
    let out = settled_output(mock_server::app_with(Vec::new())).await;
    assert!(out.contains("! no books available"));
}
