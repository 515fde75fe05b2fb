//! Course/enrollment selection.
//!
//! Every transition is a pure function of the current [`Selection`], the
//! account [`Catalog`] and the input id, returning either the next selection
//! or a typed error. Once both ids are set they always correspond under the
//! catalog's bijection.

use crate::error::{BcsError, Result};
use crate::models::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Unset,
    CourseOnly,
    EnrollmentOnly,
    Both,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    course: Option<i64>,
    enrollment: Option<i64>,
}

impl Selection {
    pub fn course(&self) -> Option<i64> {
        self.course
    }

    pub fn enrollment(&self) -> Option<i64> {
        self.enrollment
    }

    pub fn state(&self) -> SelectionState {
        match (self.course, self.enrollment) {
            (None, None) => SelectionState::Unset,
            (Some(_), None) => SelectionState::CourseOnly,
            (None, Some(_)) => SelectionState::EnrollmentOnly,
            (Some(_), Some(_)) => SelectionState::Both,
        }
    }

    /// Select `course_id`, deriving the enrollment when none is set.
    pub fn with_course(self, catalog: &Catalog, course_id: i64) -> Result<Selection> {
        let enrollment_for_course = catalog.require_course(course_id)?;

        if let Some(enrollment_id) = self.enrollment {
            let selected_course = catalog.require_enrollment(enrollment_id)?;
            if selected_course != course_id {
                return Err(BcsError::CourseMismatch {
                    course_id,
                    enrollment_id,
                    suggested: selected_course,
                    valid: catalog.courses(),
                });
            }
        }

        Ok(Selection {
            course: Some(course_id),
            enrollment: Some(self.enrollment.unwrap_or(enrollment_for_course)),
        })
    }

    /// Select `enrollment_id`, deriving the course when none is set.
    pub fn with_enrollment(self, catalog: &Catalog, enrollment_id: i64) -> Result<Selection> {
        let course_for_enrollment = catalog.require_enrollment(enrollment_id)?;

        if let Some(course_id) = self.course {
            let selected_enrollment = catalog.require_course(course_id)?;
            if selected_enrollment != enrollment_id {
                return Err(BcsError::EnrollmentMismatch {
                    enrollment_id,
                    course_id,
                    suggested: selected_enrollment,
                    valid: catalog.enrollments(),
                });
            }
        }

        Ok(Selection {
            course: Some(self.course.unwrap_or(course_for_enrollment)),
            enrollment: Some(enrollment_id),
        })
    }

    pub fn cleared(self) -> Selection {
        Selection::default()
    }

    /// Ids to use for one call.
    ///
    /// An explicit `course_id` is validated and paired with its enrollment
    /// without touching the selection; otherwise the selected pair is returned,
    /// which is `(None, None)` when nothing was ever selected.
    pub fn resolve(
        &self,
        catalog: &Catalog,
        course_id: Option<i64>,
    ) -> Result<(Option<i64>, Option<i64>)> {
        match course_id {
            Some(course_id) => {
                let enrollment_id = catalog.require_course(course_id)?;
                Ok((Some(course_id), Some(enrollment_id)))
            }
            None => Ok((self.course, self.enrollment)),
        }
    }
}
