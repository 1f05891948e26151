//! Role-based access guards, applied per-route with `middleware::from_fn`.
//!
//! Each guard authenticates the bearer token, inserts the resulting
//! `AuthUser` into request extensions for the handler, and enforces the
//! route's role requirement. Resource-level ownership (token email vs. a
//! session's faculty email) is checked in the handlers that need it.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::Request,
    middleware::Next,
    response::Response,
};
use services::auth_service::Role;

use crate::auth::claims::AuthUser;
use crate::response::ApiError;

/// Helper to extract and validate the user from the request, then insert it
/// back into the request extensions for downstream handlers.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), ApiError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| ApiError::unauthorized("Authentication required"))?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Teacher-only guard.
pub async fn require_teacher(
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if user.0.role != Role::Teacher {
        return Err(ApiError::forbidden("Teacher access required"));
    }

    Ok(next.run(req).await)
}

/// Student-only guard.
pub async fn require_student(
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if user.0.role != Role::Student {
        return Err(ApiError::forbidden(
            "Only students are allowed to mark attendance",
        ));
    }

    Ok(next.run(req).await)
}
