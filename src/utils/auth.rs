// src/utils/auth.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::{config::Config, error::AppError};

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: &str) -> Option<&str> {
    value.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
}

/// Axum Middleware: Admin Authorization.
///
/// Compares the bearer token with the configured `ADMIN_TOKEN`.
/// Missing or wrong token returns 401; no configured token closes the route with 403.
pub async fn admin_middleware(
    State(config): State<Config>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = config.admin_token.as_deref() else {
        return Err(AppError::Forbidden("Admin access is disabled".to_string()));
    };

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);

    match token {
        Some(token) if token == expected => Ok(next.run(req).await),
        _ => Err(AppError::AuthError("Invalid token".to_string())),
    }
}
