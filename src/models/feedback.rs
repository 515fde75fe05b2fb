use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// One student's weekly survey submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRecord {
    pub submitted: NaiveDate,
    /// question label -> answer text, `None` when the answer wasn't text
    pub answers: BTreeMap<String, Option<String>>,
}

/// student username -> submission
pub type FeedbackMatrix = BTreeMap<String, FeedbackRecord>;
