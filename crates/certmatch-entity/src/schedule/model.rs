//! Schedule entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use certmatch_core::types::{ApplicationId, ScheduleId};

/// A meeting or audit slot attached to an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    /// Unique schedule identifier.
    pub id: ScheduleId,
    /// Application the slot belongs to.
    pub application_id: ApplicationId,
    /// Short title.
    pub title: String,
    /// Start of the slot.
    pub starts_at: DateTime<Utc>,
    /// End of the slot; always after `starts_at`.
    pub ends_at: DateTime<Utc>,
    /// Where it takes place.
    pub location: Option<String>,
    /// Free-form note.
    pub note: Option<String>,
    /// When the slot was created.
    pub created_at: DateTime<Utc>,
    /// When the slot was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a schedule entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSchedule {
    /// Owning application.
    pub application_id: ApplicationId,
    /// Title.
    pub title: String,
    /// Start time.
    pub starts_at: DateTime<Utc>,
    /// End time.
    pub ends_at: DateTime<Utc>,
    /// Location.
    pub location: Option<String>,
    /// Note.
    pub note: Option<String>,
}

/// Partial update of a schedule entry. `None` keeps the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSchedule {
    /// New title.
    pub title: Option<String>,
    /// New start time.
    pub starts_at: Option<DateTime<Utc>>,
    /// New end time.
    pub ends_at: Option<DateTime<Utc>>,
    /// New location.
    pub location: Option<String>,
    /// New note.
    pub note: Option<String>,
}

impl UpdateSchedule {
    /// Apply the present fields onto an existing entry.
    pub fn apply_to(&self, schedule: &mut Schedule) {
        if let Some(title) = &self.title {
            schedule.title.clone_from(title);
        }
        if let Some(starts_at) = self.starts_at {
            schedule.starts_at = starts_at;
        }
        if let Some(ends_at) = self.ends_at {
            schedule.ends_at = ends_at;
        }
        if self.location.is_some() {
            schedule.location.clone_from(&self.location);
        }
        if self.note.is_some() {
            schedule.note.clone_from(&self.note);
        }
    }
}

/// Whether `[starts_at, ends_at)` is a non-empty window.
pub fn is_valid_window(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
    ends_at > starts_at
}
