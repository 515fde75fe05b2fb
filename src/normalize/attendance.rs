use crate::error::{BcsError, Result};
use crate::models::{AttendanceKey, AttendanceMatrix, AttendanceStatus};
use crate::provider::dto::RawAttendance;

/// Decide a record's status; the first matching rule wins.
///
/// | present | remote | excused | status  |
/// |---------|--------|---------|---------|
/// | true    | false  | any     | present |
/// | any     | true   | any     | remote  |
/// | any     | any    | true    | excused |
/// | false   | any    | false   | absent  |
///
/// Anything else (missing flags the table needs) is an error.
pub fn attendance_status(record: &RawAttendance) -> Result<AttendanceStatus> {
    match (record.present, record.remote, record.excused) {
        (Some(true), Some(false), _) => Ok(AttendanceStatus::Present),
        (_, Some(true), _) => Ok(AttendanceStatus::Remote),
        (_, _, Some(true)) => Ok(AttendanceStatus::Excused),
        (Some(false), _, Some(false)) => Ok(AttendanceStatus::Absent),
        _ => Err(BcsError::InvalidAttendance {
            student: record.student_name.clone(),
            session: record.session_name.clone(),
        }),
    }
}

pub fn normalize_attendance(
    records: Vec<RawAttendance>,
    by: AttendanceKey,
) -> Result<AttendanceMatrix> {
    let mut attendance = AttendanceMatrix::new();

    for record in records {
        let status = attendance_status(&record)?;
        let (primary, secondary) = match by {
            AttendanceKey::Student => (record.student_name, record.session_name),
            AttendanceKey::Session => (record.session_name, record.student_name),
        };
        attendance.entry(primary).or_default().insert(secondary, status);
    }

    attendance.retain(|_, row| !row.is_empty());
    Ok(attendance)
}
