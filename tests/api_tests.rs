use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{routing::get, routing::put, Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

// Smoke tests del shape de la API de notificaciones sobre un router stub,
// sin base de datos. El contrato completo del motor se cubre en los tests
// unitarios de services/reminder_scheduler.

async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    use tower::util::ServiceExt;

    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, body)
}

// Función helper para crear la app de test
fn create_test_app() -> Router {
    Router::new()
        .route(
            "/test",
            get(|| async {
                Json(json!({ "status": "ok", "message": "AutoCare backend funcionando correctamente" }))
            }),
        )
        .route(
            "/notification/:user_id",
            get(|| async { Json(json!([])) }),
        )
        .route(
            "/notification/read/:id",
            put(|| async {
                Json(json!({ "success": true, "message": "Notificación marcada como leída" }))
            }),
        )
        .layer(CorsLayer::very_permissive())
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send(app, "GET", "/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_notifications_returns_array() {
    let app = create_test_app();
    let (status, body) = send(
        app,
        "GET",
        "/notification/00000000-0000-0000-0000-000000000001",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}

#[tokio::test]
async fn test_mark_read_shape() {
    let app = create_test_app();
    let (status, body) = send(
        app,
        "PUT",
        "/notification/read/00000000-0000-0000-0000-000000000002",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_test_app();
    let (status, _) = send(app, "GET", "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
