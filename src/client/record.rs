//! Wire records exchanged with the task API.
//!
//! Records are decoded leniently: status and priority text the client does
//! not recognise becomes `None` instead of failing the whole list, and a
//! missing creation time falls back to the Unix epoch.

use crate::projection::ProjectedTask;
use crate::task::domain::{TaskPriority, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier.
    pub id: Uuid,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Status, `None` when absent or unrecognised.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<TaskStatus>,
    /// Priority, `None` when absent or unrecognised.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub priority: Option<TaskPriority>,
    /// Category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional start date.
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    /// Optional deadline.
    #[serde(default, deserialize_with = "lenient_date")]
    pub deadline: Option<NaiveDate>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl ProjectedTask for TaskRecord {
    fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Fields for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Title (required by the server).
    pub title: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional priority text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Optional category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Optional deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

/// Partial update; absent fields are left unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// Replacement title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement status text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Replacement priority text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Replacement category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Replacement start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Replacement deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> TryFrom<&'a str>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|text| T::try_from(text).ok()))
}

// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(text) = raw.as_ref().and_then(serde_json::Value::as_str) else {
        return Ok(None);
    };
    let date = text.parse::<NaiveDate>().ok().or_else(|| {
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|stamp| stamp.with_timezone(&Utc).date_naive())
    });
    Ok(date)
}
