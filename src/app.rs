use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, ConfigError, UpdatePolicy};
use crate::database::Connector;
use crate::handlers::{blog, public};
use crate::middleware::{auth_gate_middleware, AuthGate};

/// Values every handler may read. Built once from [`AppConfig`].
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<dyn Connector>,
    pub update_policy: UpdatePolicy,
    pub base_path: String,
}

/// Assemble the full application router.
///
/// The secret and connector are passed in explicitly so the same router can
/// run against Postgres in production and the in-memory store in tests.
pub fn app(config: &AppConfig, connector: Arc<dyn Connector>) -> Result<Router, ConfigError> {
    let gate = AuthGate::new(config.jwt_secret()?);
    let base_path = config.server.base_path.clone();

    let state = AppState {
        connector,
        update_policy: config.security.update_policy,
        base_path: base_path.clone(),
    };

    let blog = blog_routes(state.clone(), gate);

    let mut router = if base_path == "/" {
        Router::new()
            .route("/health", get(public::health))
            .with_state(state)
            .merge(blog)
    } else {
        Router::new()
            .route("/", get(public::root))
            .route("/health", get(public::health))
            .with_state(state)
            .nest(&base_path, blog)
    };

    router = router.layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));
    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    Ok(router)
}

/// Post routes; the gate runs in front of every one of them
fn blog_routes(state: AppState, gate: AuthGate) -> Router {
    Router::new()
        .route("/", post(blog::create).put(blog::update))
        .route("/bulk", get(blog::bulk))
        .route("/:id", get(blog::show))
        .layer(middleware::from_fn_with_state(gate, auth_gate_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::issue_token;
    use crate::database::MemoryConnector;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tower::ServiceExt;

    const SECRET: &str = "router-secret";

    fn config(extra: &[(&str, &str)]) -> AppConfig {
        let mut vars: HashMap<String, String> = HashMap::new();
        vars.insert("JWT_SECRET".into(), SECRET.into());
        for (k, v) in extra {
            vars.insert(k.to_string(), v.to_string());
        }
        AppConfig::from_map(&vars).unwrap()
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        builder.body(body).unwrap()
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[test]
    fn refuses_to_build_without_secret() {
        let config = AppConfig::from_map(&HashMap::new()).unwrap();
        assert!(app(&config, Arc::new(MemoryConnector::new())).is_err());
    }

    #[tokio::test]
    async fn health_and_root_are_public() {
        let router = app(&config(&[]), Arc::new(MemoryConnector::new())).unwrap();

        let (status, body) = send(&router, request(Method::GET, "/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "ok");

        let (status, body) = send(&router, request(Method::GET, "/", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["bulk"], "GET /api/v1/blog/bulk (auth)");
    }

    #[tokio::test]
    async fn gate_runs_before_validation() {
        let store = MemoryConnector::new();
        let router = app(&config(&[]), Arc::new(store.clone())).unwrap();

        // Invalid body and no token: the gate answers first
        let (status, body) = send(
            &router,
            request(Method::POST, "/api/v1/blog", None, Some(json!({ "title": 1 }))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "message": "You are not Logged" }));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn bulk_is_not_captured_by_id_route() {
        let router = app(&config(&[]), Arc::new(MemoryConnector::new())).unwrap();
        let token = issue_token(1, SECRET, None).unwrap();

        let (status, body) =
            send(&router, request(Method::GET, "/api/v1/blog/bulk", Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "blogs": [] }));
    }

    #[tokio::test]
    async fn mounts_at_root_when_configured() {
        let router = app(&config(&[("BLOG_BASE_PATH", "/")]), Arc::new(MemoryConnector::new())).unwrap();
        let token = issue_token(3, SECRET, None).unwrap();

        let (status, body) = send(
            &router,
            request(Method::POST, "/", Some(&token), Some(json!({ "title": "T", "content": "C" }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1 }));

        let (status, _) = send(&router, request(Method::GET, "/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn non_integer_id_is_bad_request() {
        let router = app(&config(&[]), Arc::new(MemoryConnector::new())).unwrap();
        let token = issue_token(1, SECRET, None).unwrap();

        let (status, body) =
            send(&router, request(Method::GET, "/api/v1/blog/abc", Some(&token), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn author_only_policy_blocks_other_subjects() {
        let router = app(
            &config(&[("BLOG_UPDATE_POLICY", "author")]),
            Arc::new(MemoryConnector::new()),
        )
        .unwrap();
        let author = issue_token(1, SECRET, None).unwrap();
        let stranger = issue_token(2, SECRET, None).unwrap();

        let (_, created) = send(
            &router,
            request(Method::POST, "/api/v1/blog", Some(&author), Some(json!({ "title": "T", "content": "C" }))),
        )
        .await;
        let id = created["id"].as_i64().unwrap();
        let edit = json!({ "id": id, "title": "X", "content": "Y" });

        let (status, _) =
            send(&router, request(Method::PUT, "/api/v1/blog", Some(&stranger), Some(edit.clone()))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) =
            send(&router, request(Method::PUT, "/api/v1/blog", Some(&author), Some(edit))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "X");

        let missing = json!({ "id": 999, "title": "X", "content": "Y" });
        let (status, _) =
            send(&router, request(Method::PUT, "/api/v1/blog", Some(&author), Some(missing))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
