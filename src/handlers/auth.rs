//! Authentication HTTP handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::error::ApiError;
use crate::middleware::ValidatedJson;
use crate::models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::state::AppState;

/// POST /register - Create an account
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state
        .auth_service
        .register(&req.username, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /login - Exchange credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let tokens = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(tokens))
}
