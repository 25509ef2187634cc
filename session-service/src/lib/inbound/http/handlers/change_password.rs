use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::ports::UserStore;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn change_password<S: UserStore>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<ChangePasswordRequestBody>,
) -> Result<ApiSuccess<ChangePasswordResponseData>, ApiError> {
    state
        .verifier
        .change_password(&user.subject, &body.current_password, &body.new_password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ChangePasswordResponseData { updated: true },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequestBody {
    current_password: String,
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordResponseData {
    pub updated: bool,
}
