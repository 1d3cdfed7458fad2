//! Identity extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use faircms_core::error::CoreError;
use faircms_core::roles::Role;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

pub const MOCK_EMAIL_HEADER: &str = "x-mock-user-email";
pub const MOCK_ROLE_HEADER: &str = "x-mock-user-role";

/// The acting editor.
///
/// Resolved from a Bearer token in the `Authorization` header. When
/// `allow_mock_auth` is enabled, the `X-Mock-User-Email` / `X-Mock-User-Role`
/// headers are accepted first (role defaults to `author`).
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.config.allow_mock_auth {
            if let Some(user) = mock_user(parts)? {
                return Ok(user);
            }
        }

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let email = claims.sub.trim().to_string();
        if email.is_empty() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Token has no subject".into(),
            )));
        }
        let role = claims
            .resolved_role()
            .map_err(|e| AppError::Core(CoreError::Unauthorized(e.to_string())))?;

        Ok(AuthUser { email, role })
    }
}

fn mock_user(parts: &Parts) -> Result<Option<AuthUser>, AppError> {
    let Some(email) = header_str(parts, MOCK_EMAIL_HEADER).filter(|e| !e.is_empty()) else {
        return Ok(None);
    };
    let role = match header_str(parts, MOCK_ROLE_HEADER) {
        Some(r) => r
            .parse()
            .map_err(|e: CoreError| AppError::Core(CoreError::Unauthorized(e.to_string())))?,
        None => Role::Author,
    };
    Ok(Some(AuthUser {
        email: email.to_string(),
        role,
    }))
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
}
