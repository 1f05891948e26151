pub mod attendance_record;
pub mod session;

pub use attendance_record::AttendanceRecord;
pub use session::{Session, SessionStatus};
