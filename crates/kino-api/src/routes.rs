//! Route definitions

use axum::{Router, routing::get};

use crate::handlers::health;

/// Create the router
pub fn routes() -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::LIVENESS;
    use axum::body::{Body, to_bytes};
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_body(uri: &str) -> (StatusCode, String) {
        let response = routes()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_root_is_alive() {
        let (status, body) = get_body("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, LIVENESS);
    }

    #[tokio::test]
    async fn test_health_is_alive() {
        let (status, body) = get_body("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, LIVENESS);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = get_body("/api/chat").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
