use serde_json::Value;

use crate::models::session::strip_zone;
use crate::models::{ContextCode, Session};
use crate::provider::dto::{CalendarEntry, SessionsResponse};

/// Visibility mask applied to calendar entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionFilter {
    pub course_id: Option<i64>,
    pub career_ok: bool,
    pub orientation_ok: bool,
}

impl SessionFilter {
    pub fn admits(&self, context: &ContextCode, course_id: Option<i64>) -> bool {
        match context {
            ContextCode::Career => self.career_ok,
            ContextCode::Orientation => self.orientation_ok,
            _ => match self.course_id {
                Some(filter) => course_id == Some(filter),
                None => true,
            },
        }
    }
}

pub fn normalize_sessions(response: SessionsResponse, filter: &SessionFilter) -> Vec<Session> {
    response
        .calendar_sessions
        .into_iter()
        .filter(|entry| {
            let context = ContextCode::from_code(&entry.context.context_code);
            filter.admits(&context, entry.session.course_id)
        })
        .map(project)
        .collect()
}

fn project(entry: CalendarEntry) -> Session {
    let session = entry.session;
    Session {
        id: session.id,
        course_id: session.course_id,
        name: session.name,
        short_description: session.short_description,
        long_description: session.long_description,
        start_time: strip_zone(&session.start_time).to_string(),
        end_time: strip_zone(&session.end_time).to_string(),
        chapter: session.chapter.and_then(chapter_label),
        context: entry.context.context_code,
        classroom: entry.classroom.filter(|c| !c.is_null()),
        video_url_list: entry.video_url_list.unwrap_or_default(),
    }
}

fn chapter_label(chapter: Value) -> Option<String> {
    match chapter {
        Value::Null => None,
        Value::String(label) => Some(label),
        other => Some(other.to_string()),
    }
}
