use thiserror::Error;

#[derive(Debug, Error)]
pub enum BcsError {
    #[error("Invalid courseId: {course_id} not in your courses. Try one of these: {valid:?}")]
    InvalidCourse { course_id: i64, valid: Vec<i64> },

    #[error("Invalid enrollmentId: {enrollment_id} not in your enrollments. Try one of these: {valid:?}")]
    InvalidEnrollment { enrollment_id: i64, valid: Vec<i64> },

    #[error(
        "Invalid courseId: {course_id} does not match the selected enrollmentId {enrollment_id}. Did you mean {suggested}?"
    )]
    CourseMismatch {
        course_id: i64,
        enrollment_id: i64,
        suggested: i64,
        valid: Vec<i64>,
    },

    #[error(
        "Invalid enrollmentId: {enrollment_id} does not match the selected courseId {course_id}. Did you mean {suggested}?"
    )]
    EnrollmentMismatch {
        enrollment_id: i64,
        course_id: i64,
        suggested: i64,
        valid: Vec<i64>,
    },

    #[error("Duplicate catalog entry: courseId {course_id} / enrollmentId {enrollment_id}")]
    DuplicateCatalogEntry { course_id: i64, enrollment_id: i64 },

    #[error("No course selected: pass a courseId or select one first")]
    NoCourseSelected,

    #[error("Endpoint unavailable: {endpoint} returned no result")]
    Unavailable { endpoint: String },

    #[error("Unexpected payload from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Attendance record for {student} at {session} has no valid status")]
    InvalidAttendance { student: String, session: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("No sessions to choose from")]
    NoSessions,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BcsError>;

impl BcsError {
    pub(crate) fn decode(endpoint: &str, err: impl std::fmt::Display) -> Self {
        BcsError::Decode {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }
}
