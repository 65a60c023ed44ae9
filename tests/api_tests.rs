//! Pruebas de humo de la superficie HTTP: router mínimo con la misma
//! forma de respuestas que la API real, sin base de datos.

use axum::{
    http::{Request, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

fn create_test_app() -> Router {
    Router::new()
        .route(
            "/test",
            get(|| async {
                Json(json!({
                    "message": "API del taller funcionando correctamente",
                    "status": "ok",
                }))
            }),
        )
        .route(
            "/api/contracts",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "No autorizado",
                        "message": "Sesión requerida",
                    })),
                )
            }),
        )
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::get("/test").body(axum::body::Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_protected_route_without_session() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::get("/api/contracts")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // La forma del error es estable: {error, message}
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::get("/api/no-existe")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
