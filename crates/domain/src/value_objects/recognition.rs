//! Badges and achievements shown on the profile.
//!
//! Nothing in the progression rules awards these; they are stored and
//! returned as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub earned_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub progress: u32,
    pub target: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_date: Option<DateTime<Utc>>,
}
