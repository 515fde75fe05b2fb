use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Remote,
    Excused,
    Absent,
}

/// Which name the attendance matrix is keyed by first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceKey {
    Student,
    #[default]
    Session,
}

/// primary key -> secondary key -> status
pub type AttendanceMatrix = BTreeMap<String, BTreeMap<String, AttendanceStatus>>;
