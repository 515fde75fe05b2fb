use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bcs_client::models::{AttendanceKey, AttendanceStatus, Grade};
use bcs_client::provider::dto::MeResponse;
use bcs_client::{
    BcsError, GradeOptions, NoopProvider, Provider, SelectionState, SessionContext, SessionQuery,
};
use chrono::NaiveDate;
use serde_json::{Value, json};

/// Answers each endpoint with a canned payload and records every call.
struct ScriptedProvider {
    me: Value,
    responses: HashMap<&'static str, Value>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<(&'static str, Value)>) -> Self {
        Self {
            me: json!({
                "userAccount": { "id": 77, "firstName": "Ada" },
                "enrollments": [
                    { "id": 249477, "courseId": 1158, "courseRoleId": 1, "course": { "name": "UCB Data Viz" } },
                    { "id": 250001, "courseId": 1200, "courseRoleId": 1, "course": { "name": "UCB Full Stack" } },
                    { "id": 260100, "courseId": 1301, "courseRoleId": 2, "course": { "name": "Student seat" } }
                ]
            }),
            responses: responses.into_iter().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn me(&self) -> bcs_client::Result<MeResponse> {
        Ok(serde_json::from_value(self.me.clone()).unwrap())
    }

    async fn call(&self, endpoint: &str, body: &Value) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), body.clone()));
        self.responses.get(endpoint).cloned()
    }
}

async fn context(responses: Vec<(&'static str, Value)>) -> (Arc<ScriptedProvider>, SessionContext) {
    let provider = Arc::new(ScriptedProvider::new(responses));
    let bcs = SessionContext::new(provider.clone(), false)
        .await
        .expect("Failed to build context");
    (provider, bcs)
}

fn calendar() -> Value {
    json!({
        "calendarSessions": [
            {
                "session": {
                    "id": 11, "courseId": 1158, "name": "Pandas",
                    "startTime": "2020-03-02T15:00:00Z", "endTime": "2020-03-02T18:00:00Z"
                },
                "context": { "contextCode": "academic" }
            },
            {
                "session": {
                    "id": 12, "courseId": 1158, "name": "Matplotlib",
                    "startTime": "2020-03-03T19:00:00Z", "endTime": "2020-03-03T22:00:00Z"
                },
                "context": { "contextCode": "academic" }
            },
            {
                "session": {
                    "id": 13, "courseId": 1158, "name": "APIs",
                    "startTime": "2020-03-04T04:00:00Z", "endTime": "2020-03-04T07:00:00Z"
                },
                "context": { "contextCode": "academic" }
            },
            {
                "session": {
                    "id": 90, "courseId": 1, "name": "Career Services",
                    "startTime": "2020-03-03T18:30:00Z", "endTime": "2020-03-03T19:30:00Z"
                },
                "context": { "contextCode": "career" }
            }
        ]
    })
}

#[tokio::test]
async fn test_catalog_excludes_student_enrollments() {
    let (_, bcs) = context(Vec::new()).await;
    assert_eq!(bcs.catalog().courses(), vec![1158, 1200]);
    assert_eq!(bcs.catalog().enrollments(), vec![249477, 250001]);
    assert_eq!(bcs.user()["firstName"], "Ada");
}

#[tokio::test]
async fn test_catalog_keeps_student_enrollments_when_asked() {
    let provider = Arc::new(ScriptedProvider::new(Vec::new()));
    let bcs = SessionContext::new(provider, true).await.unwrap();
    assert_eq!(bcs.catalog().len(), 3);
    assert_eq!(bcs.catalog().enrollment_for(1301), Some(260100));
}

#[tokio::test]
async fn test_set_course_derives_enrollment() {
    let (_, mut bcs) = context(Vec::new()).await;
    assert_eq!(bcs.selection().state(), SelectionState::Unset);

    bcs.set_course(1158).unwrap();
    assert_eq!(bcs.enrollment(), Some(249477));
    assert_eq!(bcs.selection().state(), SelectionState::Both);

    assert!(matches!(
        bcs.set_enrollment(250001),
        Err(BcsError::EnrollmentMismatch { suggested: 249477, .. })
    ));
    assert!(matches!(bcs.set_course(1), Err(BcsError::InvalidCourse { .. })));
    assert_eq!(bcs.course(), Some(1158));

    bcs.clear_selection();
    bcs.set_enrollment(250001).unwrap();
    assert_eq!(bcs.course(), Some(1200));
}

#[tokio::test]
async fn test_fetch_without_selection_is_an_error() {
    let (provider, bcs) = context(vec![("grades", json!([]))]).await;
    assert_eq!(bcs.resolve(None).unwrap(), (None, None));
    assert!(matches!(
        bcs.grades(None, GradeOptions::default()).await,
        Err(BcsError::NoCourseSelected)
    ));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_grades_use_override_without_changing_selection() {
    let (provider, mut bcs) = context(vec![(
        "grades",
        json!([
            { "assignmentTitle": "HW1", "studentName": "Alice", "submitted": true, "grade": "A" },
            { "assignmentTitle": "HW1", "studentName": "Bob", "submitted": false, "grade": null },
            { "assignmentTitle": "Milestone1", "studentName": "Alice", "submitted": false, "grade": null },
            { "assignmentTitle": "HW2", "studentName": "Alice", "submitted": false, "grade": null }
        ]),
    )])
    .await;
    bcs.set_course(1158).unwrap();

    let grades = bcs.grades(Some(1200), GradeOptions::default()).await.unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades["HW1"]["Alice"], Grade::Graded("A".into()));
    assert_eq!(grades["HW1"]["Bob"], Grade::Ungraded);

    assert_eq!(provider.calls(), vec![("grades".to_string(), json!({ "courseId": 1200 }))]);
    assert_eq!(bcs.resolve(None).unwrap(), (Some(1158), Some(249477)));
}

#[tokio::test]
async fn test_unavailable_endpoint_is_not_an_empty_result() {
    let (_, mut bcs) = context(Vec::new()).await;
    bcs.set_course(1158).unwrap();

    match bcs.attendance(None, AttendanceKey::Session).await {
        Err(BcsError::Unavailable { endpoint }) => assert_eq!(endpoint, "attendance"),
        other => panic!("unexpected: {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_payload_shape_is_a_decode_error() {
    let (_, mut bcs) = context(vec![("attendance", json!({ "oops": true }))]).await;
    bcs.set_course(1158).unwrap();
    assert!(matches!(
        bcs.attendance(None, AttendanceKey::Session).await,
        Err(BcsError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_attendance_by_student() {
    let (provider, mut bcs) = context(vec![(
        "attendance",
        json!([
            { "studentName": "Alice", "sessionName": "1.1", "present": true, "remote": false, "excused": null },
            { "studentName": "Alice", "sessionName": "1.2", "present": false, "remote": false, "excused": true },
            { "studentName": "Bob", "sessionName": "1.1", "present": false, "remote": false, "excused": false }
        ]),
    )])
    .await;
    bcs.set_course(1200).unwrap();

    let attendance = bcs.attendance(None, AttendanceKey::Student).await.unwrap();
    assert_eq!(attendance["Alice"]["1.1"], AttendanceStatus::Present);
    assert_eq!(attendance["Alice"]["1.2"], AttendanceStatus::Excused);
    assert_eq!(attendance["Bob"]["1.1"], AttendanceStatus::Absent);
    assert_eq!(provider.calls()[0].1, json!({ "courseId": 1200 }));
}

#[tokio::test]
async fn test_sessions_posts_enrollment_and_filters_course() {
    let (provider, mut bcs) = context(vec![("sessions", calendar())]).await;
    bcs.set_course(1158).unwrap();

    let sessions = bcs.sessions(SessionQuery::default()).await.unwrap();
    let ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![11, 12, 13]);
    assert_eq!(sessions[0].start_time, "2020-03-02T15:00:00");
    assert_eq!(provider.calls()[0].1, json!({ "enrollmentId": 249477 }));

    let with_career = bcs
        .sessions(SessionQuery {
            career_ok: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(with_career.len(), 4);
}

#[tokio::test]
async fn test_sessions_with_explicit_enrollment() {
    let (provider, bcs) = context(vec![("sessions", calendar())]).await;

    let sessions = bcs
        .sessions(SessionQuery {
            enrollment_id: Some(250001),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(sessions.len(), 3);
    assert_eq!(provider.calls()[0].1, json!({ "enrollmentId": 250001 }));

    assert!(matches!(
        bcs.sessions(SessionQuery {
            enrollment_id: Some(5),
            ..Default::default()
        })
        .await,
        Err(BcsError::InvalidEnrollment { enrollment_id: 5, .. })
    ));
}

#[tokio::test]
async fn test_sessions_reject_unpaired_course_and_enrollment() {
    let (provider, bcs) = context(vec![("sessions", calendar())]).await;

    let result = bcs
        .sessions(SessionQuery {
            course_id: Some(1158),
            enrollment_id: Some(250001),
            ..Default::default()
        })
        .await;
    match result {
        Err(BcsError::EnrollmentMismatch {
            enrollment_id,
            course_id,
            suggested,
            valid,
        }) => {
            assert_eq!(enrollment_id, 250001);
            assert_eq!(course_id, 1158);
            assert_eq!(suggested, 249477);
            assert_eq!(valid, vec![249477, 250001]);
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert!(provider.calls().is_empty());

    let paired = bcs
        .sessions(SessionQuery {
            course_id: Some(1158),
            enrollment_id: Some(249477),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(paired.len(), 3);
}

#[tokio::test]
async fn test_session_closest_fetches_detail_of_nearest() {
    let (provider, mut bcs) = context(vec![
        ("sessions", calendar()),
        (
            "sessionDetail",
            json!({
                "session": {
                    "session": { "id": 12, "name": "Matplotlib", "shortDescription": "plots" },
                    "videoUrlList": []
                }
            }),
        ),
    ])
    .await;
    bcs.set_course(1158).unwrap();

    let now = NaiveDate::from_ymd_opt(2020, 3, 3)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap();
    let detail = bcs.session_closest_to(None, now).await.unwrap();
    assert_eq!(detail["id"], 12);
    assert_eq!(detail["shortDescription"], "plots");

    let calls = provider.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], ("sessionDetail".to_string(), json!({ "sessionId": 12 })));
}

#[tokio::test]
async fn test_session_details_returns_outer_session() {
    let (_, bcs) = context(vec![(
        "sessionDetail",
        json!({ "session": { "session": { "id": 5 }, "videoUrlList": ["u"] } }),
    )])
    .await;

    let detail = bcs.session_details(5).await.unwrap();
    assert_eq!(detail["session"]["id"], 5);
    assert_eq!(detail["videoUrlList"][0], "u");
}

#[tokio::test]
async fn test_session_closest_with_empty_calendar() {
    let (_, mut bcs) = context(vec![("sessions", json!({ "calendarSessions": [] }))]).await;
    bcs.set_course(1158).unwrap();
    assert!(matches!(
        bcs.session_closest(None).await,
        Err(BcsError::NoSessions)
    ));
}

#[tokio::test]
async fn test_feedback_by_username() {
    let (provider, mut bcs) = context(vec![(
        "weeklyFeedback",
        json!({
            "surveyDefinition": {
                "steps": [
                    { "stepNumber": 1, "text": "How was class? (1-10)" },
                    { "stepNumber": 2, "text": "Comments" }
                ]
            },
            "submissions": [
                {
                    "username": "alice",
                    "date": "2020-03-06T20:00:00Z",
                    "answers": [ { "stepNumber": 1, "answer": { "value": "8" } } ]
                }
            ]
        }),
    )])
    .await;
    bcs.set_course(1158).unwrap();

    let feedback = bcs.feedback(None).await.unwrap();
    let alice = &feedback["alice"];
    assert_eq!(alice.submitted, NaiveDate::from_ymd_opt(2020, 3, 6).unwrap());
    assert_eq!(alice.answers["How was class?"].as_deref(), Some("8"));
    assert_eq!(alice.answers["Comments"], None);
    assert_eq!(provider.calls()[0].0, "weeklyFeedback");
}

#[tokio::test]
async fn test_noop_provider_has_empty_catalog() {
    let mut bcs = SessionContext::new(Arc::new(NoopProvider), false).await.unwrap();
    assert!(bcs.catalog().is_empty());
    assert!(matches!(
        bcs.set_course(1158),
        Err(BcsError::InvalidCourse { ref valid, .. }) if valid.is_empty()
    ));
}
