//! Pure reshaping of raw provider payloads into the client's output shapes.

pub mod attendance;
pub mod closest;
pub mod feedback;
pub mod grades;
pub mod sessions;

pub use attendance::{attendance_status, normalize_attendance};
pub use closest::closest_session;
pub use feedback::{normalize_feedback, question_labels};
pub use grades::{GradeOptions, normalize_grades};
pub use sessions::{SessionFilter, normalize_sessions};
