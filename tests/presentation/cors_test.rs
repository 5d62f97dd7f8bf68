use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;

use vaani::presentation::{AppState, create_router};

use crate::support::{CountingModel, create_orchestrator};

fn app(origins: &str, dir: &std::path::Path) -> axum::Router {
    let (orchestrator, store) = create_orchestrator(Arc::new(CountingModel::new()), dir);
    create_router(
        AppState {
            orchestrator: Arc::new(orchestrator),
            audio_store: store,
        },
        origins,
    )
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/translate")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn given_wildcard_origins_when_preflight_then_allows_any_origin() {
    let dir = tempfile::tempdir().unwrap();

    let response = app("*", dir.path())
        .oneshot(preflight("https://anywhere.example"))
        .await
        .unwrap();

    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn given_allow_list_when_listed_origin_preflights_then_echoes_origin() {
    let dir = tempfile::tempdir().unwrap();

    let response = app("https://a.example, https://b.example", dir.path())
        .oneshot(preflight("https://b.example"))
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://b.example"
    );
}

#[tokio::test]
async fn given_allow_list_when_unlisted_origin_preflights_then_no_allow_header() {
    let dir = tempfile::tempdir().unwrap();

    let response = app("https://a.example", dir.path())
        .oneshot(preflight("https://evil.example"))
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
