use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, app_with, failing_app, seed, ErrorBody, Libro};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_libros_returns_seeded_catalog_in_order() {
    let resp = get(app(), "/api/libros").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let libros: Vec<Libro> = body_json(resp).await;
    assert_eq!(libros, seed());
}

#[tokio::test]
async fn list_libros_sets_json_content_type() {
    let resp = get(app(), "/api/libros").await;
    let content_type = resp.headers()["content-type"].to_str().unwrap();
    assert_eq!(content_type, "application/json");
}

#[tokio::test]
async fn list_libros_empty_catalog() {
    let resp = get(app_with(Vec::new()), "/api/libros").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"[]");
}

// --- get by id ---

#[tokio::test]
async fn get_libro_found() {
    let resp = get(app(), "/api/libros/3").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let libro: Libro = body_json(resp).await;
    assert_eq!(libro.titulo, "Ficciones");
}

#[tokio::test]
async fn get_libro_not_found_has_error_body() {
    let resp = get(app(), "/api/libros/99").await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.status, 404);
    assert_eq!(body.error, "Not Found");
    assert_eq!(body.message, "Libro no encontrado con ID: 99");
}

#[tokio::test]
async fn get_libro_bad_id_returns_400() {
    let resp = get(app(), "/api/libros/not-a-number").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- filters ---

#[tokio::test]
async fn libros_by_autor_matches_exact_name() {
    let resp = get(app(), "/api/libros/autor/Jorge%20Luis%20Borges").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let libros: Vec<Libro> = body_json(resp).await;
    let titulos: Vec<&str> = libros.iter().map(|l| l.titulo.as_str()).collect();
    assert_eq!(titulos, vec!["Ficciones", "El Aleph"]);
}

#[tokio::test]
async fn libros_by_autor_unknown_is_empty() {
    let resp = get(app(), "/api/libros/autor/Nadie").await;
    let libros: Vec<Libro> = body_json(resp).await;
    assert!(libros.is_empty());
}

#[tokio::test]
async fn libros_by_categoria() {
    let resp = get(app(), "/api/libros/categoria/Novela").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let libros: Vec<Libro> = body_json(resp).await;
    assert_eq!(libros.len(), 3);
    assert!(libros.iter().all(|l| l.categoria == "Novela"));
}

// --- forced failures ---

#[tokio::test]
async fn failing_app_answers_every_route_with_forced_status() {
    for uri in ["/api/libros", "/api/libros/1", "/api/libros/categoria/Novela"] {
        let resp = get(failing_app(StatusCode::INTERNAL_SERVER_ERROR), uri).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        let body: ErrorBody = body_json(resp).await;
        assert_eq!(body.error, "Internal Server Error");
    }
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = get(app(), "/api/autores").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
