use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{BcsError, Result};
use crate::models::{FeedbackMatrix, FeedbackRecord};
use crate::provider::dto::{FeedbackResponse, RawAnswer, SurveyStep};

/// `step number -> label`, the label being the question text before any `(`.
///
/// A label already taken by an earlier step gets its step number appended,
/// so no two questions share a key.
pub fn question_labels(steps: &[SurveyStep]) -> BTreeMap<u32, String> {
    let mut taken = HashSet::new();
    let mut labels = BTreeMap::new();

    for step in steps {
        let mut key = label(&step.text);
        if !taken.insert(key.clone()) {
            warn!("Step {} repeats the question label {:?}", step.step_number, key);
            key = format!("{} ({})", key, step.step_number);
            taken.insert(key.clone());
        }
        labels.insert(step.step_number, key);
    }

    labels
}

fn label(text: &str) -> String {
    let head = match text.find('(') {
        Some(idx) => &text[..idx],
        None => text,
    };
    head.trim().to_string()
}

/// Day-precision date from the `YYYY-MM-DD` prefix of an ISO timestamp.
pub fn submission_date(raw: &str) -> Result<NaiveDate> {
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .ok_or_else(|| BcsError::InvalidTimestamp(raw.to_string()))
}

fn answer_text(answer: &RawAnswer) -> Option<String> {
    answer
        .answer
        .as_ref()
        .and_then(|a| a.value.as_ref())
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Every record carries every question label; unanswered or non-text
/// answers are `None`.
pub fn normalize_feedback(response: FeedbackResponse) -> Result<FeedbackMatrix> {
    let labels = question_labels(&response.survey_definition.steps);
    let mut feedback = FeedbackMatrix::new();

    for submission in response.submissions {
        let submitted = submission_date(&submission.date)?;
        let mut answers: BTreeMap<String, Option<String>> =
            labels.values().map(|label| (label.clone(), None)).collect();

        for answer in &submission.answers {
            match labels.get(&answer.step_number) {
                Some(label) => {
                    answers.insert(label.clone(), answer_text(answer));
                }
                None => warn!(
                    "Ignoring answer to unknown step {} from {}",
                    answer.step_number, submission.username
                ),
            }
        }

        feedback.insert(submission.username, FeedbackRecord { submitted, answers });
    }

    Ok(feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> FeedbackResponse {
        serde_json::from_value(json!({
            "surveyDefinition": {
                "steps": [
                    { "stepNumber": 1, "text": "Overall satisfaction (1-10)" },
                    { "stepNumber": 2, "text": "  Pace of class  (too slow / too fast)" },
                    { "stepNumber": 3, "text": "Anything else?" }
                ]
            },
            "submissions": [
                {
                    "username": "alice",
                    "date": "2020-03-02T23:12:45.123Z",
                    "answers": [
                        { "stepNumber": 1, "answer": { "value": "9" } },
                        { "stepNumber": 2, "answer": { "value": 4 } },
                        { "stepNumber": 7, "answer": { "value": "stray" } }
                    ]
                },
                {
                    "username": "bob",
                    "date": "2020-03-03",
                    "answers": [
                        { "stepNumber": 3, "answer": null }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn labels_drop_parenthetical_and_trim() {
        let labels = question_labels(&payload().survey_definition.steps);
        assert_eq!(labels[&1], "Overall satisfaction");
        assert_eq!(labels[&2], "Pace of class");
        assert_eq!(labels[&3], "Anything else?");
        assert_eq!(labels.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn records_keyed_by_username_and_label() {
        let feedback = normalize_feedback(payload()).unwrap();
        let alice = &feedback["alice"];
        assert_eq!(alice.submitted, NaiveDate::from_ymd_opt(2020, 3, 2).unwrap());
        assert_eq!(alice.answers["Overall satisfaction"].as_deref(), Some("9"));
        assert_eq!(alice.answers["Pace of class"], None);
        assert_eq!(alice.answers["Anything else?"], None);
        assert_eq!(alice.answers.len(), 3);

        let bob = &feedback["bob"];
        assert_eq!(bob.submitted, NaiveDate::from_ymd_opt(2020, 3, 3).unwrap());
        assert!(bob.answers.values().all(Option::is_none));
    }

    #[test]
    fn repeated_label_keeps_both_answers() {
        let response: FeedbackResponse = serde_json::from_value(json!({
            "surveyDefinition": {
                "steps": [
                    { "stepNumber": 1, "text": "Rating (pace)" },
                    { "stepNumber": 2, "text": "Rating (content)" }
                ]
            },
            "submissions": [
                {
                    "username": "carol",
                    "date": "2020-03-09",
                    "answers": [
                        { "stepNumber": 1, "answer": { "value": "5" } },
                        { "stepNumber": 2, "answer": { "value": "9" } }
                    ]
                }
            ]
        }))
        .unwrap();

        let labels = question_labels(&response.survey_definition.steps);
        assert_eq!(labels[&1], "Rating");
        assert_eq!(labels[&2], "Rating (2)");

        let feedback = normalize_feedback(response).unwrap();
        let carol = &feedback["carol"].answers;
        assert_eq!(carol["Rating"].as_deref(), Some("5"));
        assert_eq!(carol["Rating (2)"].as_deref(), Some("9"));
    }

    #[test]
    fn bad_date_is_an_error() {
        assert!(matches!(
            submission_date("03/02/2020"),
            Err(BcsError::InvalidTimestamp(_))
        ));
        assert!(submission_date("2020").is_err());
    }
}
