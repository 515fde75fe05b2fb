use serde::{Deserialize, Serialize};

/// Role id the provider assigns to student enrollments.
pub const STUDENT_ROLE_ID: i64 = 2;

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub authentication_info: Option<AuthenticationInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationInfo {
    pub auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(default)]
    pub user_account: serde_json::Value,
    #[serde(default)]
    pub enrollments: Vec<RawEnrollment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnrollment {
    pub id: i64,
    pub course_id: i64,
    #[serde(default)]
    pub course_role_id: Option<i64>,
    pub course: RawCourse,
}

#[derive(Debug, Deserialize)]
pub struct RawCourse {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGrade {
    pub assignment_title: String,
    pub student_name: String,
    #[serde(default)]
    pub submitted: Option<bool>,
    #[serde(default)]
    pub grade: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsResponse {
    #[serde(default)]
    pub calendar_sessions: Vec<CalendarEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub session: RawSession,
    pub context: RawContext,
    #[serde(default)]
    pub classroom: Option<serde_json::Value>,
    #[serde(default)]
    pub video_url_list: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSession {
    pub id: i64,
    #[serde(default)]
    pub course_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub chapter: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContext {
    pub context_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttendance {
    pub student_name: String,
    pub session_name: String,
    #[serde(default)]
    pub present: Option<bool>,
    #[serde(default)]
    pub remote: Option<bool>,
    #[serde(default)]
    pub excused: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub survey_definition: SurveyDefinition,
    #[serde(default)]
    pub submissions: Vec<RawSubmission>,
}

#[derive(Debug, Deserialize)]
pub struct SurveyDefinition {
    #[serde(default)]
    pub steps: Vec<SurveyStep>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyStep {
    pub step_number: u32,
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    pub username: String,
    pub date: String,
    #[serde(default)]
    pub answers: Vec<RawAnswer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswer {
    pub step_number: u32,
    #[serde(default)]
    pub answer: Option<AnswerValue>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerValue {
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}
