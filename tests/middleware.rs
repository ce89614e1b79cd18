//! Protocol middleware behaviour.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;

use inertia_server::inertia::{inertia_middleware, InertiaMiddlewareState};

mod common;

async fn found() -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, "/next"), (header::CACHE_CONTROL, "no-store")],
        "moved",
    )
        .into_response()
}

async fn ok() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], r#"{"ok":true}"#).into_response()
}

fn routes() -> Router {
    Router::new()
        .route("/redirect", get(found).put(found).patch(found).delete(found).post(found))
        .route("/page", get(ok))
}

fn with_protocol(router: Router, version: &str) -> Router {
    router.layer(middleware::from_fn_with_state(
        InertiaMiddlewareState::new(version),
        inertia_middleware,
    ))
}

fn app() -> Router {
    with_protocol(routes(), common::VERSION)
}

fn assert_tagged(response: &Response) {
    assert_eq!(response.headers()[header::VARY], "Accept");
    assert_eq!(response.headers()["x-inertia"], "true");
}

fn assert_untagged(response: &Response) {
    assert!(response.headers().get(header::VARY).is_none());
    assert!(response.headers().get("x-inertia").is_none());
}

#[tokio::test]
async fn test_non_protocol_request_passes_through_untouched() {
    for method in ["GET", "DELETE", "PUT"] {
        let request = || {
            Request::builder()
                .method(method)
                .uri("/redirect")
                .header("X-Inertia-Version", "stale")
                .body(Body::empty())
                .unwrap()
        };
        let response = app().oneshot(request()).await.unwrap();
        let expected = routes().oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND, "{method}");
        assert_eq!(response.status(), expected.status(), "{method}");
        assert_eq!(response.headers(), expected.headers(), "{method}");
        assert_untagged(&response);
        assert!(response.headers().get("x-inertia-location").is_none());
        assert_eq!(
            common::body_string(response).await,
            common::body_string(expected).await
        );
    }
}

#[tokio::test]
async fn test_stale_version_forces_location() {
    let request = Request::builder()
        .uri("/page?tab=2")
        .header("X-Inertia", "true")
        .header("X-Inertia-Version", "v0")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-inertia-location"], "/page");
    assert_untagged(&response);
}

#[tokio::test]
async fn test_missing_version_header_is_stale() {
    let request = Request::builder()
        .uri("/page")
        .header("X-Inertia", "true")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-inertia-location"], "/page");
    assert_untagged(&response);
}

#[tokio::test]
async fn test_stale_location_keeps_nested_prefix() {
    let app = Router::new().nest("/admin", app());

    let request = Request::builder()
        .uri("/admin/page?tab=1")
        .header("X-Inertia", "true")
        .header("X-Inertia-Version", "v0")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-inertia-location"], "/admin/page");
    assert_untagged(&response);
}

#[tokio::test]
async fn test_non_ascii_version_is_current() {
    let version = "build-caf\u{e9}";
    let app = with_protocol(routes(), version);

    let request = Request::builder()
        .uri("/page")
        .header("X-Inertia", "true")
        .header("X-Inertia-Version", HeaderValue::from_bytes(version.as_bytes()).unwrap())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.headers().get("x-inertia-location").is_none());
    assert_tagged(&response);
}

#[tokio::test]
async fn test_current_version_is_tagged() {
    let response = app()
        .oneshot(common::empty(common::inertia_request("GET", "/page")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-inertia-location").is_none());
    assert_tagged(&response);
    assert_eq!(common::body_string(response).await, r#"{"ok":true}"#);
}

#[tokio::test]
async fn test_version_ignored_for_non_get() {
    let request = Request::builder()
        .method("POST")
        .uri("/redirect")
        .header("X-Inertia", "true")
        .header("X-Inertia-Version", "stale")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert!(response.headers().get("x-inertia-location").is_none());
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_tagged(&response);
}

#[tokio::test]
async fn test_302_rewritten_for_mutating_methods() {
    for method in ["PUT", "PATCH", "DELETE"] {
        let response = app()
            .oneshot(common::empty(common::inertia_request(method, "/redirect")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{method}");
        assert_eq!(response.headers()[header::LOCATION], "/next");
        assert_tagged(&response);
    }
}

#[tokio::test]
async fn test_302_kept_for_get_and_post() {
    for method in ["GET", "POST"] {
        let response = app()
            .oneshot(common::empty(common::inertia_request(method, "/redirect")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND, "{method}");
        assert_tagged(&response);
    }
}

#[tokio::test]
async fn test_tags_replace_existing_vary() {
    let app = Router::new()
        .route(
            "/vary",
            get(|| async {
                let mut response = Response::new(Body::empty());
                response
                    .headers_mut()
                    .insert(header::VARY, HeaderValue::from_static("Cookie"));
                response
            }),
        )
        .layer(middleware::from_fn_with_state(
            InertiaMiddlewareState::new(common::VERSION),
            inertia_middleware,
        ));

    let response = app
        .oneshot(common::empty(common::inertia_request("GET", "/vary")))
        .await
        .unwrap();

    let vary: Vec<_> = response.headers().get_all(header::VARY).iter().collect();
    assert_eq!(vary, vec!["Accept"]);
}
