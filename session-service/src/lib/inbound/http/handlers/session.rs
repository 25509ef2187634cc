use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Introspection endpoint: echoes the identity the gate attached.
pub async fn current_session(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<SessionData> {
    ApiSuccess::new(
        StatusCode::OK,
        SessionData {
            subject: user.subject,
            authorities: user.authorities,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub subject: String,
    pub authorities: Vec<String>,
}
