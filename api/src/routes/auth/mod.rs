use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

mod get;
mod post;

pub use get::me;
pub use post::{send_otp, verify_otp};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/me", get(me))
}
