use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::ports::UserStore;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

pub async fn logout<S: UserStore>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    // The gate has already admitted this request; the header is present
    // unless a misconfigured client stripped it between retries.
    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::BadRequest("Missing bearer token".to_string()))?;

    state.verifier.logout(&token);

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData { revoked: true },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub revoked: bool,
}
