use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use axum_prometheus::PrometheusMetricLayer;

use tokio::net;
use crate::domain::AppState;
use handlers::drafts::{delete_draft, find_draft, list_drafts, save_draft};
use handlers::posts::{delete_post, find_post, list_posts, publish_post};
use handlers::{health_check, login, logout};

mod api;
mod auth;
mod handlers;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig<'a> {
    pub port: &'a str,
}

/// The application's HTTP server. The underlying HTTP package is opaque to module consumers.
pub struct HttpServer {
    router: axum::Router,
    listener: net::TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to the port specified in `config`.
    pub async fn new(state: impl AppState, config: HttpServerConfig<'_>) -> anyhow::Result<Self> {
        let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
            |request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                tracing::info_span!("http_request", method = ?request.method(), uri)
            },
        );
        // see: https://github.com/metrics-rs/metrics
        // see: https://github.com/Ptrskay3/axum-prometheus
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

        let router = router(state)
            .route("/metrics", get(|| async move { metric_handle.render() }))
            .layer(trace_layer)
            .layer(prometheus_layer);

        let listener = net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("failed to listen on {}", config.port))?;

        Ok(Self { router, listener })
    }

    /// Runs the HTTP server.
    pub async fn run(self) -> anyhow::Result<()> {
        let address = self
            .listener
            .local_addr()
            .context("failed to read listener address")?;
        tracing::info!("listening on {}", address);
        axum::serve(self.listener, self.router)
            .await
            .context("received error from running server")?;
        Ok(())
    }
}

/// Application routes without the metrics and tracing layers
pub fn router<S: AppState>(state: S) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes<S: AppState>() -> Router<S> {
    Router::new()
        .route("/login", post(login::<S>))
        .route("/logout", post(logout::<S>))
        .route("/posts", get(list_posts::<S>).post(publish_post::<S>))
        .route("/posts/{id}", get(find_post::<S>).delete(delete_post::<S>))
        .route("/drafts", get(list_drafts::<S>).post(save_draft::<S>))
        .route("/drafts/{id}", get(find_draft::<S>).delete(delete_draft::<S>))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use scriptorium_common::{PasswordGate, test_utils::InMemoryRepository};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::AppStateImpl;

    const PASSWORD: &str = "open-sesame";

    fn app() -> Router {
        let state = AppStateImpl::new(InMemoryRepository::default(), PasswordGate::new(PASSWORD));
        router(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn login(app: &Router) -> String {
        let response = send(app, json_request("POST", "/api/login", None, json!({"password": PASSWORD}))).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["token"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(&app(), empty_request("GET", "/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let app = app();
        let response = send(&app, json_request("POST", "/api/login", None, json!({"password": "nope"}))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_editor_routes_require_session() {
        let app = app();
        let requests = [
            empty_request("GET", "/api/drafts", None),
            empty_request("GET", "/api/drafts", Some("forged")),
            json_request("POST", "/api/drafts", None, json!({"title": "x"})),
            json_request("POST", "/api/posts", None, json!({"title": "x"})),
            empty_request("DELETE", "/api/posts/1", None),
            empty_request("DELETE", "/api/drafts/1", None),
        ];
        for request in requests {
            assert_eq!(send(&app, request).await.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_draft_then_publish() {
        let app = app();
        let token = login(&app).await;

        let response = send(
            &app,
            json_request("POST", "/api/drafts", Some(&token), json!({"title": "Hello", "content": "# Hi", "tags": "a, b"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let saved = body_json(response).await;
        assert_eq!(saved, json!({"id": 1, "location": "/drafts?saved=1"}));

        let response = send(
            &app,
            json_request("POST", "/api/posts", Some(&token), json!({"title": "Hello", "content": "# Hi", "tags": "a, b", "draftId": "1"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"id": 1, "location": "/post/1"}));

        let drafts = body_json(send(&app, empty_request("GET", "/api/drafts", Some(&token))).await).await;
        assert_eq!(drafts, json!([]));

        let post = body_json(send(&app, empty_request("GET", "/api/posts/1", None)).await).await;
        assert_eq!(post["content"], "<h1>Hi</h1>");
        assert_eq!(post["rawContent"], "# Hi");
        assert_eq!(post["tags"], json!(["a", "b"]));

        let posts = body_json(send(&app, empty_request("GET", "/api/posts", None)).await).await;
        assert_eq!(posts.as_array().unwrap().len(), 1);
        assert!(posts[0].get("content").is_none());
    }

    #[tokio::test]
    async fn test_unknown_post_is_not_found() {
        let response = send(&app(), empty_request("GET", "/api/posts/42", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_logout_revokes_session() {
        let app = app();
        let token = login(&app).await;

        let response = send(&app, empty_request("POST", "/api/logout", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, empty_request("GET", "/api/drafts", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_delete_post() {
        let app = app();
        let token = login(&app).await;
        send(&app, json_request("POST", "/api/posts", Some(&token), json!({"title": "t"}))).await;

        let response = send(&app, empty_request("DELETE", "/api/posts/1", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, empty_request("DELETE", "/api/posts/1", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let posts = body_json(send(&app, empty_request("GET", "/api/posts", None)).await).await;
        assert_eq!(posts, json!([]));
    }
}
