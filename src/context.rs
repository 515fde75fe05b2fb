use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::{BcsError, Result};
use crate::models::{
    AttendanceKey, AttendanceMatrix, Catalog, Enrollment, FeedbackMatrix, GradeMatrix, Session,
};
use crate::normalize::{
    GradeOptions, SessionFilter, closest_session, normalize_attendance, normalize_feedback,
    normalize_grades, normalize_sessions,
};
use crate::provider::dto::{self, STUDENT_ROLE_ID};
use crate::provider::{HttpProvider, Provider, ProviderConfig};
use crate::selection::Selection;

/// Options for [`SessionContext::sessions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionQuery {
    pub course_id: Option<i64>,
    /// Fetch this enrollment's calendar instead of the course's.
    pub enrollment_id: Option<i64>,
    pub career_ok: bool,
    pub orientation_ok: bool,
}

/// An authenticated account: its enrollment catalog, the current
/// course/enrollment selection, and the data-fetching operations.
///
/// Every fetch goes back to the provider; nothing is cached between calls.
pub struct SessionContext {
    provider: Arc<dyn Provider>,
    user: Value,
    catalog: Catalog,
    selection: Selection,
}

impl SessionContext {
    /// Log in with `config` and load the account's enrollments.
    pub async fn login(config: &ProviderConfig) -> Result<Self> {
        let provider = HttpProvider::connect(config).await?;
        Self::new(Arc::new(provider), config.student_ok).await
    }

    pub async fn new(provider: Arc<dyn Provider>, student_ok: bool) -> Result<Self> {
        let me = provider.me().await?;

        let entries: Vec<Enrollment> = me
            .enrollments
            .into_iter()
            .filter(|e| student_ok || e.course_role_id != Some(STUDENT_ROLE_ID))
            .map(|e| Enrollment {
                course_id: e.course_id,
                enrollment_id: e.id,
                course_name: e.course.name,
            })
            .collect();
        let catalog = Catalog::new(entries)?;
        info!("Loaded {} enrollments", catalog.len());

        Ok(Self {
            provider,
            user: me.user_account,
            catalog,
            selection: Selection::default(),
        })
    }

    /// The raw `userAccount` profile.
    pub fn user(&self) -> &Value {
        &self.user
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn course(&self) -> Option<i64> {
        self.selection.course()
    }

    pub fn enrollment(&self) -> Option<i64> {
        self.selection.enrollment()
    }

    pub fn set_course(&mut self, course_id: i64) -> Result<Selection> {
        self.selection = self.selection.with_course(&self.catalog, course_id)?;
        debug!("Selected course {}", course_id);
        Ok(self.selection)
    }

    pub fn set_enrollment(&mut self, enrollment_id: i64) -> Result<Selection> {
        self.selection = self.selection.with_enrollment(&self.catalog, enrollment_id)?;
        debug!("Selected enrollment {}", enrollment_id);
        Ok(self.selection)
    }

    pub fn clear_selection(&mut self) {
        self.selection = self.selection.cleared();
    }

    /// See [`Selection::resolve`]; an override never changes the selection.
    pub fn resolve(&self, course_id: Option<i64>) -> Result<(Option<i64>, Option<i64>)> {
        self.selection.resolve(&self.catalog, course_id)
    }

    fn require_course(&self, course_id: Option<i64>) -> Result<(i64, i64)> {
        match self.resolve(course_id)? {
            (Some(course_id), Some(enrollment_id)) => Ok((course_id, enrollment_id)),
            _ => Err(BcsError::NoCourseSelected),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, body: Value) -> Result<T> {
        let payload = self
            .provider
            .call(endpoint, &body)
            .await
            .ok_or_else(|| BcsError::Unavailable {
                endpoint: endpoint.to_string(),
            })?;
        serde_json::from_value(payload).map_err(|e| BcsError::decode(endpoint, e))
    }

    /// `assignment -> student -> grade` for a course.
    pub async fn grades(
        &self,
        course_id: Option<i64>,
        options: GradeOptions,
    ) -> Result<GradeMatrix> {
        let (course_id, _) = self.require_course(course_id)?;
        info!("Fetching grades for course {}", course_id);

        let records: Vec<dto::RawGrade> =
            self.fetch("grades", json!({ "courseId": course_id })).await?;
        Ok(normalize_grades(records, options))
    }

    /// Calendar entries visible under `query`.
    pub async fn sessions(&self, query: SessionQuery) -> Result<Vec<Session>> {
        let (course_filter, enrollment_id) = match query.enrollment_id {
            Some(enrollment_id) => {
                self.catalog.require_enrollment(enrollment_id)?;
                if let Some(course_id) = query.course_id {
                    let paired = self.catalog.require_course(course_id)?;
                    if paired != enrollment_id {
                        return Err(BcsError::EnrollmentMismatch {
                            enrollment_id,
                            course_id,
                            suggested: paired,
                            valid: self.catalog.enrollments(),
                        });
                    }
                }
                (query.course_id, enrollment_id)
            }
            None => {
                let (course_id, enrollment_id) = self.require_course(query.course_id)?;
                (Some(course_id), enrollment_id)
            }
        };
        info!("Fetching sessions for enrollment {}", enrollment_id);

        let response: dto::SessionsResponse = self
            .fetch("sessions", json!({ "enrollmentId": enrollment_id }))
            .await?;

        let filter = SessionFilter {
            course_id: course_filter,
            career_ok: query.career_ok,
            orientation_ok: query.orientation_ok,
        };
        Ok(normalize_sessions(response, &filter))
    }

    pub async fn attendance(
        &self,
        course_id: Option<i64>,
        by: AttendanceKey,
    ) -> Result<AttendanceMatrix> {
        let (course_id, _) = self.require_course(course_id)?;
        info!("Fetching attendance for course {}", course_id);

        let records: Vec<dto::RawAttendance> =
            self.fetch("attendance", json!({ "courseId": course_id })).await?;
        normalize_attendance(records, by)
    }

    /// The `session` object of a session's detail payload.
    pub async fn session_details(&self, session_id: i64) -> Result<Value> {
        let mut detail: Value = self
            .fetch("sessionDetail", json!({ "sessionId": session_id }))
            .await?;
        detail
            .get_mut("session")
            .map(Value::take)
            .ok_or_else(|| BcsError::decode("sessionDetail", "missing session"))
    }

    /// Details of the course's session starting nearest to now (UTC).
    pub async fn session_closest(&self, course_id: Option<i64>) -> Result<Value> {
        self.session_closest_to(course_id, Utc::now().naive_utc()).await
    }

    pub async fn session_closest_to(
        &self,
        course_id: Option<i64>,
        now: NaiveDateTime,
    ) -> Result<Value> {
        let (course_id, _) = self.require_course(course_id)?;
        let sessions = self
            .sessions(SessionQuery {
                course_id: Some(course_id),
                ..Default::default()
            })
            .await?;

        let closest = closest_session(&sessions, now).ok_or(BcsError::NoSessions)?;
        debug!("Closest session to {} is {} ({})", now, closest.id, closest.start_time);

        let mut detail = self.session_details(closest.id).await?;
        detail
            .get_mut("session")
            .map(Value::take)
            .ok_or_else(|| BcsError::decode("sessionDetail", "missing session.session"))
    }

    /// Weekly survey answers per student username.
    pub async fn feedback(&self, course_id: Option<i64>) -> Result<FeedbackMatrix> {
        let (course_id, _) = self.require_course(course_id)?;
        info!("Fetching weekly feedback for course {}", course_id);

        let response: dto::FeedbackResponse = self
            .fetch("weeklyFeedback", json!({ "courseId": course_id }))
            .await?;
        normalize_feedback(response)
    }
}
