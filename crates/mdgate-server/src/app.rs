//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// The exact `/LICENSE` route wins over the page wildcard.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/LICENSE", get(handlers::license::get_license))
        .route("/", get(handlers::pages::get_root_page))
        .route("/{*path}", get(handlers::pages::get_page))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::bots::BotDetector;

    const README: &str = "# Meta Tags Standard\n\nThis content is also designed for agents.\n\nSee [the docs](DOCUMENTATION.md) for details.\n";
    const DOCUMENTATION: &str = "# Documentation\n\nEverything else.\n";
    const BROWSER_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:122.0) Gecko/20100101 Firefox/122.0";

    fn test_router(domain: Option<&str>) -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), README).unwrap();
        std::fs::write(dir.path().join("DOCUMENTATION.md"), DOCUMENTATION).unwrap();
        std::fs::write(dir.path().join("LICENSE"), "MIT License\n").unwrap();

        let state = Arc::new(AppState {
            source_dir: dir.path().to_path_buf(),
            license_path: dir.path().join("LICENSE"),
            detector: BotDetector::default(),
            domain: domain.map(str::to_owned),
        });
        (dir, create_router(state))
    }

    async fn send(
        router: Router,
        uri: &str,
        user_agent: Option<&str>,
    ) -> (StatusCode, String, String) {
        let mut builder = Request::builder().uri(uri);
        if let Some(ua) = user_agent {
            builder = builder.header(header::USER_AGENT, ua);
        }
        let response = router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_owned();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_root_browser_gets_html() {
        let (_dir, router) = test_router(Some("example.test"));
        let (status, content_type, body) = send(router, "/", Some(BROWSER_UA)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/html; charset=utf-8");
        assert!(body.contains("Meta Tags Standard"));
        assert!(body.contains("This content is also designed for agents"));
        assert!(body.starts_with("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_root_bot_gets_markdown() {
        let (_dir, router) = test_router(Some("example.test"));
        let (status, content_type, body) = send(router, "/", Some("Googlebot/2.1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/markdown; charset=utf-8");
        assert_eq!(body, README);
    }

    #[tokio::test]
    async fn test_md_extension_gets_raw_markdown_for_browsers() {
        let (_dir, router) = test_router(Some("example.test"));
        let (status, content_type, body) = send(router, "/index.md", Some(BROWSER_UA)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/markdown; charset=utf-8");
        assert_eq!(body, README);
    }

    #[tokio::test]
    async fn test_llms_forces_markdown() {
        let (_dir, router) = test_router(Some("example.test"));
        let (status, content_type, body) = send(router, "/llms", Some(BROWSER_UA)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/markdown; charset=utf-8");
        assert_eq!(body, README);
    }

    #[tokio::test]
    async fn test_named_page_rendered() {
        let (_dir, router) = test_router(Some("example.test"));
        let (status, content_type, body) =
            send(router, "/documentation", Some(BROWSER_UA)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/html; charset=utf-8");
        assert!(body.contains(r#"<h1 id="documentation">Documentation</h1>"#));
        assert!(body.contains("<title>Documentation</title>"));
    }

    #[tokio::test]
    async fn test_trailing_slash_tolerated() {
        let (_dir, router) = test_router(Some("example.test"));
        let (status, _, body) = send(router, "/documentation/", Some(BROWSER_UA)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Everything else."));
    }

    #[tokio::test]
    async fn test_missing_page_is_404() {
        let (_dir, router) = test_router(Some("example.test"));
        let (status, _, body) = send(router.clone(), "/notfound", Some(BROWSER_UA)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not Found");

        let (status, _, body) = send(router, "/notfound.md", Some(BROWSER_UA)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not Found");
    }

    #[tokio::test]
    async fn test_license_served_verbatim() {
        let (_dir, router) = test_router(Some("example.test"));
        let (status, content_type, body) = send(router, "/LICENSE", Some(BROWSER_UA)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/plain; charset=utf-8");
        assert_eq!(body, "MIT License\n");
    }

    #[tokio::test]
    async fn test_md_links_lowercased_in_html() {
        let (_dir, router) = test_router(Some("example.test"));
        let (_, _, body) = send(router, "/", Some(BROWSER_UA)).await;
        assert!(body.contains(r#"<a href="documentation.md">the docs</a>"#));
        assert!(!body.contains(r#"href="DOCUMENTATION.md""#));
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let (_dir, router) = test_router(Some("example.test"));
        let first = send(router.clone(), "/documentation", Some(BROWSER_UA)).await;
        let second = send(router, "/documentation", Some(BROWSER_UA)).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_domain_falls_back_to_host_header() {
        let (_dir, router) = test_router(None);
        let request = Request::builder()
            .uri("/")
            .header(header::USER_AGENT, BROWSER_UA)
            .header(header::HOST, "fallback.test")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("fallback.test"));
    }

    #[tokio::test]
    async fn test_configured_domain_wins_over_host_header() {
        let (_dir, router) = test_router(Some("configured.test"));
        let request = Request::builder()
            .uri("/")
            .header(header::USER_AGENT, BROWSER_UA)
            .header(header::HOST, "ignored.test")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("configured.test"));
        assert!(!body.contains("ignored.test"));
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let (_dir, router) = test_router(Some("example.test"));
        let request = Request::builder()
            .uri("/")
            .header(header::USER_AGENT, BROWSER_UA)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
        assert!(response.headers().contains_key("content-security-policy"));
    }

    #[tokio::test]
    async fn test_missing_user_agent_gets_html() {
        let (_dir, router) = test_router(Some("example.test"));
        let (status, content_type, _) = send(router, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/html; charset=utf-8");
    }
}
