use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::ports::UserStore;
use crate::inbound::http::router::AppState;

pub async fn login<S: UserStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // The identity may be a username or an email address; the verifier
    // picks the lookup.
    let token = state.verifier.login(&body.username, &body.password).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token,
            token_type: "Bearer".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub token_type: String,
}
