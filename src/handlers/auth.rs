// src/handlers/auth.rs

use axum::{
    Json,
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::student::LoginRequest,
    store::ExamStore,
    utils::jwt::{session_cookie, sign_jwt},
};

/// Authenticates a student and installs the session cookie.
///
/// A missing or empty field is a `BadRequest`, distinct from credentials that
/// simply do not match. The actual hash comparison happens behind the store
/// boundary; an empty result means invalid credentials, with no hint whether
/// the email or the password was wrong.
pub async fn login(
    State(store): State<Arc<dyn ExamStore>>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let student = store
        .authenticate_student(&payload.email, &payload.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let token = sign_jwt(student.id, &student.email, &config.jwt_secret)?;

    tracing::info!("student {} logged in", student.id);

    Ok((
        AppendHeaders([(header::SET_COOKIE, session_cookie(&token))]),
        Json(json!({
            "success": true,
            "student": student,
        })),
    ))
}
