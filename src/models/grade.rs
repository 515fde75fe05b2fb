use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Placeholder rendered for a missing or non-text grade.
pub const UNGRADED: &str = "Not Submitted";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grade {
    Graded(String),
    Ungraded,
}

impl Grade {
    /// Anything other than a JSON string counts as ungraded.
    pub fn from_raw(value: Option<&serde_json::Value>) -> Self {
        match value.and_then(|v| v.as_str()) {
            Some(grade) => Grade::Graded(grade.to_string()),
            None => Grade::Ungraded,
        }
    }

    pub fn is_ungraded(&self) -> bool {
        matches!(self, Grade::Ungraded)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Grade::Graded(grade) => grade,
            Grade::Ungraded => UNGRADED,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// assignment title -> student name -> grade
pub type GradeMatrix = BTreeMap<String, BTreeMap<String, Grade>>;
