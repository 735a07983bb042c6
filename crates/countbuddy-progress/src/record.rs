//! Progress record types as they appear on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ProgressError;

/// One child's remote progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub id: Uuid,
    pub kid_name: String,
    pub counting_level: u32,
    pub tap_level: u32,
    pub total_sessions: u32,
    pub total_correct: u32,
    pub last_played: DateTime<Utc>,
}

impl ProgressRecord {
    /// A fresh record with default levels and counters.
    pub fn new(kid_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kid_name: kid_name.into(),
            counting_level: 1,
            tap_level: 1,
            total_sessions: 0,
            total_correct: 0,
            last_played: Utc::now(),
        }
    }
}

/// Body of `POST /api/kids`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewKid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid_name: Option<String>,
}

impl NewKid {
    pub fn named(kid_name: impl Into<String>) -> Self {
        Self {
            kid_name: Some(kid_name.into()),
        }
    }

    /// The trimmed kid name, or a validation error if it is missing or blank.
    pub fn validated_name(&self) -> Result<&str, ProgressError> {
        match self.kid_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ProgressError::Validation("kidName is required".into())),
        }
    }
}

/// Body of `PUT /api/kids/{id}/progress`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counting_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sessions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_correct: Option<u32>,
}

impl ProgressUpdate {
    /// Apply the provided fields and stamp `last_played`.
    pub fn apply(&self, record: &mut ProgressRecord, now: DateTime<Utc>) {
        if let Some(v) = self.tap_level {
            record.tap_level = v;
        }
        if let Some(v) = self.counting_level {
            record.counting_level = v;
        }
        if let Some(v) = self.total_sessions {
            record.total_sessions = v;
        }
        if let Some(v) = self.total_correct {
            record.total_correct = v;
        }
        record.last_played = now;
    }
}
