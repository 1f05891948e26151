pub mod attendance_service;
pub mod auth_service;
pub mod export_service;
pub mod location;
pub mod qr;
pub mod session_service;
