use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One submitted answer. `time` is the local time of day (`HH:MM:SS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub time: String,
    pub answer: String,
}

/// Every stored answer, keyed by ISO day (`YYYY-MM-DD`).
///
/// Serializes as a bare object so the persisted blob is
/// `{ "2024-01-01": [{"time": "...", "answer": "..."}] }`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SurveyData {
    pub days: BTreeMap<String, Vec<Record>>,
}

/// A freshly appended record together with the day it was filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub day: String,
    pub record: Record,
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct StatsQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub date: String,
    pub time: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    /// Normalized grouping key (lowercased, trimmed).
    pub key: String,
    /// First-seen original text, shown to users.
    pub text: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub text: String,
    pub count: usize,
    pub diameter: f64,
    /// Horizontal position in percent of the canvas width.
    pub x: f64,
    /// Vertical position in percent of the canvas height.
    pub y: f64,
    pub color: &'static str,
    /// Float animation delay in seconds.
    pub delay: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub date: Option<String>,
    pub days: Vec<String>,
    pub total: usize,
    pub tally: Vec<TallyEntry>,
    pub bubbles: Vec<Bubble>,
}
