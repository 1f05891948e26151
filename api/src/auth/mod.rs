pub mod claims;
pub mod extractors;
pub mod guards;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use common::config;
use jsonwebtoken::{EncodingKey, Header, encode};
use services::auth_service::Role;

/// Generates a signed identity token and its expiry timestamp.
///
/// The token is the only credential the system issues; there is no refresh
/// and no server-side revocation, so its lifetime (7 days by default) is the
/// session length.
pub fn generate_jwt(email: &str, role: Role) -> (String, String) {
    let expiry = Utc::now() + Duration::days(config::jwt_duration_days());

    let claims = Claims {
        sub: email.to_owned(),
        role,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )
    .expect("Token encoding failed");

    (token, expiry.to_rfc3339())
}
