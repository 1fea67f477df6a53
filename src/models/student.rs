// src/models/student.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Public view of an authenticated student, as returned by the store's
/// authentication call. The password hash never leaves the store boundary.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub track_id: Option<String>,
}

/// DTO for student login.
///
/// Fields default to empty strings so that an absent field and an empty one
/// are rejected the same way, as `BadRequest` rather than a body-parse error.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 254, message = "Email and password are required."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "Email and password are required."))]
    pub password: String,
}
