use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BcsError, Result};

/// One course the authenticated account is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub course_id: i64,
    pub enrollment_id: i64,
    pub course_name: String,
}

/// The account's enrollments, fixed once built.
///
/// `course_id -> enrollment_id` is a bijection over the entries; [`Catalog::new`]
/// rejects input that would break it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<Enrollment>,
    #[serde(skip)]
    by_course: HashMap<i64, i64>,
    #[serde(skip)]
    by_enrollment: HashMap<i64, i64>,
}

impl Catalog {
    pub fn new(entries: Vec<Enrollment>) -> Result<Self> {
        let mut by_course = HashMap::with_capacity(entries.len());
        let mut by_enrollment = HashMap::with_capacity(entries.len());

        for entry in &entries {
            let course_taken = by_course.insert(entry.course_id, entry.enrollment_id).is_some();
            let enrollment_taken = by_enrollment
                .insert(entry.enrollment_id, entry.course_id)
                .is_some();
            if course_taken || enrollment_taken {
                return Err(BcsError::DuplicateCatalogEntry {
                    course_id: entry.course_id,
                    enrollment_id: entry.enrollment_id,
                });
            }
        }

        Ok(Self {
            entries,
            by_course,
            by_enrollment,
        })
    }

    pub fn entries(&self) -> &[Enrollment] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn courses(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.course_id).collect()
    }

    pub fn enrollments(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.enrollment_id).collect()
    }

    /// Course display names, in catalog order.
    pub fn cohorts(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.course_name.as_str()).collect()
    }

    pub fn enrollment_for(&self, course_id: i64) -> Option<i64> {
        self.by_course.get(&course_id).copied()
    }

    pub fn course_for(&self, enrollment_id: i64) -> Option<i64> {
        self.by_enrollment.get(&enrollment_id).copied()
    }

    /// Looks up the enrollment for `course_id`, failing with the valid courses listed.
    pub fn require_course(&self, course_id: i64) -> Result<i64> {
        self.enrollment_for(course_id)
            .ok_or_else(|| BcsError::InvalidCourse {
                course_id,
                valid: self.courses(),
            })
    }

    pub fn require_enrollment(&self, enrollment_id: i64) -> Result<i64> {
        self.course_for(enrollment_id)
            .ok_or_else(|| BcsError::InvalidEnrollment {
                enrollment_id,
                valid: self.enrollments(),
            })
    }
}
