pub mod attendance;
pub mod enrollment;
pub mod feedback;
pub mod grade;
pub mod session;

pub use attendance::{AttendanceKey, AttendanceMatrix, AttendanceStatus};
pub use enrollment::{Catalog, Enrollment};
pub use feedback::{FeedbackMatrix, FeedbackRecord};
pub use grade::{Grade, GradeMatrix, UNGRADED};
pub use session::{ContextCode, Session};
