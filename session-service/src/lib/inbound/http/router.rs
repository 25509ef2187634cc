use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password::change_password;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::session::current_session;
use super::middleware::authentication_gate;
use crate::credential::ports::UserStore;
use crate::credential::service::CredentialVerifier;

pub struct AppState<S>
where
    S: UserStore,
{
    pub verifier: Arc<CredentialVerifier<S>>,
    pub tokens: Arc<TokenService>,
}

impl<S> Clone for AppState<S>
where
    S: UserStore,
{
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

pub fn create_router<S: UserStore>(
    verifier: Arc<CredentialVerifier<S>>,
    tokens: Arc<TokenService>,
) -> Router {
    let state = AppState {
        verifier,
        tokens: Arc::clone(&tokens),
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // The gate wraps every route and classifies paths itself: public ones
    // pass through (anonymously or with an attached identity), protected
    // ones require a valid token.
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/login", post(login::<S>))
        .route("/api/auth/logout", post(logout::<S>))
        .route("/api/account/password", post(change_password::<S>))
        .route("/api/session", get(current_session))
        .layer(middleware::from_fn_with_state(tokens, authentication_gate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
