use axum::{
    http::{header, Request, StatusCode},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use bidwatch::{config::Settings, controllers::status_controller, routes, AppState};
use tower::ServiceExt;

fn test_state() -> AppState {
    AppState {
        settings: Settings::default(),
    }
}

async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

#[tokio::test]
async fn get_status_returns_ok_json() {
    let app = Router::new().route("/status", get(status_controller::status));

    let req = Request::builder()
        .method("GET")
        .uri("/status")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));

    let body = response_body_string(res).await;
    assert_eq!(body, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn app_router_serves_status() {
    let app = routes::app(test_state());

    let req = Request::builder()
        .uri("/status")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn app_router_has_no_other_routes() {
    let app = routes::app(test_state());

    let req = Request::builder()
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
