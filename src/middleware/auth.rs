use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::verify_token;
use crate::error::ApiError;

/// Authenticated principal for a request, injected by the gate.
/// Handlers that need the caller's id take `Extension<Subject>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subject {
    pub user_id: i32,
}

/// Result of running the gate over a request's headers
#[derive(Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Proceed(Subject),
    Reject(ApiError),
}

/// Token check in front of every blog route.
///
/// Holds the shared secret it was constructed with; nothing is read from
/// global state.
#[derive(Clone)]
pub struct AuthGate {
    secret: Arc<str>,
}

impl AuthGate {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self { secret: secret.into() }
    }

    /// Decide whether a request may continue. Every failure collapses into
    /// the same `NotLogged` rejection; the reason only reaches the logs.
    pub fn check(&self, headers: &HeaderMap) -> GateOutcome {
        let credential = extract_credential(headers);

        match verify_token(credential, &self.secret) {
            Ok(claims) => GateOutcome::Proceed(Subject { user_id: claims.id }),
            Err(e) => {
                tracing::warn!("Auth gate rejected request: {}", e);
                GateOutcome::Reject(ApiError::NotLogged)
            }
        }
    }
}

/// Axum middleware wrapping [`AuthGate::check`]
pub async fn auth_gate_middleware(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Response {
    match gate.check(request.headers()) {
        GateOutcome::Proceed(subject) => {
            tracing::debug!("Authenticated subject {}", subject.user_id);
            request.extensions_mut().insert(subject);
            next.run(request).await
        }
        GateOutcome::Reject(api_error) => api_error.into_response(),
    }
}

/// Raw `Authorization` value, empty when absent or not visible ASCII.
/// A `Bearer ` prefix is stripped if present.
fn extract_credential(headers: &HeaderMap) -> &str {
    let raw = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .trim();

    raw.strip_prefix("Bearer ")
        .or_else(|| raw.strip_prefix("bearer "))
        .unwrap_or(raw)
        .trim()
}
