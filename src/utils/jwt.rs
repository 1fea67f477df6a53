// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

/// Session tokens live exactly this long after issuance.
pub const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Name of the HTTP-only cookie carrying the session token.
pub const SESSION_COOKIE: &str = "auth_token";

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the Student ID (as string).
    pub sub: String,
    /// Student's email address.
    pub email: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

impl Claims {
    /// The student id carried by the token. The codec only ever writes
    /// numeric ids into `sub`, so a non-numeric value means the token was not
    /// ours.
    pub fn student_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized("Invalid session".to_string()))
    }
}

/// Signs a new session JWT for the student.
pub fn sign_jwt(id: i64, email: &str, secret: &str) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .as_secs() as usize
        + TOKEN_TTL_SECS as usize;

    let claims = Claims {
        sub: id.to_string(),
        email: email.to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

/// Verifies and decodes a session JWT.
///
/// Missing, malformed, wrongly-signed and expired tokens all collapse into
/// the same `Unauthorized` answer; callers learn nothing about which check
/// failed.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid session".to_string()))?;

    Ok(token_data.claims)
}

/// Builds the `Set-Cookie` value installing the session token on the client.
/// HTTP-only and SameSite=Strict keep it away from scripts and cross-site
/// requests; Max-Age matches the token TTL.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Max-Age={TOKEN_TTL_SECS}; Path=/")
}

fn token_from_cookie_header(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .map(str::trim)
                .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        })
}

/// Axum Middleware: Authentication.
///
/// Extracts the session cookie, verifies it, and injects `Claims` into the
/// request extensions for handlers to use. The verified token is the sole
/// identity carrier; handlers never read transport-level identity themselves.
pub async fn auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = token_from_cookie_header(req.headers())
        .ok_or_else(|| AppError::Unauthorized("Invalid session".to_string()))?;

    let claims = verify_jwt(token, &config.jwt_secret)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn round_trip_within_ttl() {
        let token = sign_jwt(42, "student@example.com", SECRET).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();

        assert_eq!(claims.student_id().unwrap(), 42);
        assert_eq!(claims.email, "student@example.com");
    }

    #[test]
    fn expired_token_is_rejected() {
        // Build an already-expired token directly; 'exp' is far enough in the
        // past to clear jsonwebtoken's default leeway.
        let expired = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize
            - 3_600;
        let claims = Claims {
            sub: "42".to_string(),
            email: "student@example.com".to_string(),
            exp: expired,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(verify_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn malformed_and_foreign_tokens_are_rejected() {
        assert!(verify_jwt("not-a-jwt", SECRET).is_err());

        let token = sign_jwt(42, "student@example.com", "some-other-secret").unwrap();
        assert!(verify_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn cookie_header_parsing_finds_the_session_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc.def.ghi; lang=en"),
        );

        assert_eq!(token_from_cookie_header(&headers), Some("abc.def.ghi"));

        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(token_from_cookie_header(&headers), None);
    }

    #[test]
    fn session_cookie_is_http_only_and_strict() {
        let cookie = session_cookie("tok");

        assert!(cookie.starts_with("auth_token=tok"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=86400"));
    }
}
