use std::sync::Arc;

use auth::TokenService;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

/// Namespace marker prefixed onto token roles to form authorities.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Everything under this prefix requires authentication unless listed
/// in `PUBLIC_PATHS`.
const PROTECTED_PREFIX: &str = "/api/";

/// Sub-paths under the API namespace that stay public: health probes,
/// documentation, and the endpoints that establish a session.
const PUBLIC_PATHS: &[&str] = &["/api/health", "/api/docs", "/api/auth/login"];

/// Identity attached to a request after the gate admits it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub authorities: Vec<String>,
}

/// Per-request authentication gate.
///
/// Decides for every inbound request whether to admit it with an attached
/// identity, reject it with 401, or pass it through anonymously. The policy
/// is asymmetric on purpose: public paths fail open (a broken token never
/// blocks them), protected paths fail closed (no unauthenticated caller is
/// admitted by default). Internal distinctions between malformed, expired,
/// and revoked tokens are never surfaced to the caller.
pub async fn authentication_gate(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Response {
    let protected = is_protected(req.uri().path());

    let Some(token) = bearer_token(req.headers()) else {
        if protected {
            return unauthorized("Missing bearer token");
        }
        return next.run(req).await;
    };

    let subject = match tokens.extract_subject(&token) {
        Ok(subject) => subject,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting unverifiable bearer token");
            if protected {
                return unauthorized("Invalid token");
            }
            return next.run(req).await;
        }
    };

    // Idempotency guard: an identity attached earlier in the pipeline is
    // not re-validated.
    if req.extensions().get::<AuthenticatedUser>().is_none() {
        if tokens.validate(&token, &subject) {
            let roles = tokens.extract_roles(&token).unwrap_or_default();
            let authorities = roles.iter().map(|role| with_role_prefix(role)).collect();
            req.extensions_mut()
                .insert(AuthenticatedUser {
                    subject,
                    authorities,
                });
        } else {
            if protected {
                return unauthorized("Invalid or expired token");
            }
            return next.run(req).await;
        }
    }

    next.run(req).await
}

/// Classify a path: protected iff it falls under the API namespace and is
/// not one of the explicitly public sub-paths.
pub fn is_protected(path: &str) -> bool {
    if !path.starts_with(PROTECTED_PREFIX) {
        return false;
    }
    !PUBLIC_PATHS
        .iter()
        .any(|public| path == *public || path.starts_with(&format!("{}/", public)))
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// A missing, undecodable, or differently-schemed header all count as
/// "no token presented".
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(http::header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(|token| token.to_string())
}

/// Prefix a role with the authority namespace marker, exactly once.
fn with_role_prefix(role: &str) -> String {
    if role.starts_with(ROLE_PREFIX) {
        role.to_string()
    } else {
        format!("{}{}", ROLE_PREFIX, role)
    }
}

fn unauthorized(reason: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Unauthorized",
            "message": reason,
        })),
    )
        .into_response()
}
