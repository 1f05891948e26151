use axum::Json;
use serde_json::{Value, json};

use crate::auth::AuthUser;

/// GET /api/auth/me
///
/// Echoes the authenticated identity. Mainly used by the client to restore a
/// login from a stored token.
pub async fn me(AuthUser(claims): AuthUser) -> Json<Value> {
    Json(json!({
        "user": {
            "email": claims.sub,
            "role": claims.role,
        }
    }))
}
