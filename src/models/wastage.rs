use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::menu::Weekday;

/// One day's kitchen figures. `wasted` never exceeds `cooked`; enforced
/// at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WastageEntry {
    pub date: NaiveDate,
    pub day: Weekday,
    pub cooked: f64,
    pub wasted: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Rolling series of at most 7 entries, one per calendar date, oldest
/// first. Read by both the admin chart and the student impact panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WastageLog {
    pub entries: Vec<WastageEntry>,
}

/// Body for POST /wastage/submit.
#[derive(Debug, Deserialize)]
pub struct SubmitWastageRequest {
    pub cooked: f64,
    pub wasted: f64,
}

/// Payload of GET /wastage/yesterday: the figures plus the derived
/// could-have-fed estimate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YesterdayImpact {
    pub date: NaiveDate,
    pub cooked: f64,
    pub wasted: f64,
    pub students_fed: u32,
}
