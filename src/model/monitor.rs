use chrono::{SecondsFormat, Utc};

use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::*;
use serde_json::Value;

use uuid::Uuid;

use crate::domain::{AirportCode, DayRange};

const DEFAULT_NOTIFY_TIME: &str = "10";
const DEFAULT_DAYS_MIN: i64 = 28;
const DEFAULT_DAYS_MAX: i64 = 38;

/// New monitor request, validated
#[derive(Debug, Clone)]
pub struct NewMonitor {
    pub from: AirportCode,
    pub to: AirportCode,
    pub days: DayRange,
    pub email: String,
    pub notify_time: Option<String>,
}

/// Stored monitor record.
///
/// Decoding is per-field lenient so that a record written by another client
/// never makes the whole collection unreadable. Missing fields take their
/// defaults and a missing or non-`true` `active` reads as inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorRecord {
    /// Opaque ID, assigned at creation
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub id: String,
    /// Route airport codes, upper case
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    /// Trip-length window in days
    #[serde(
        default = "default_days_min",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub days_min: i64,
    #[serde(
        default = "default_days_max",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub days_max: i64,
    /// Recipient of the daily email
    #[serde(default)]
    pub email: String,
    /// Hour-of-day hint, not used when scheduling
    #[serde(
        default = "default_notify_time",
        deserialize_with = "deserialize_string_from_number"
    )]
    pub notify_time: String,
    /// Creation timestamp, stored verbatim
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub created_at: String,
    /// Only active monitors are listed and notified
    #[serde(default, deserialize_with = "strictly_true")]
    pub active: bool,
}

impl MonitorRecord {
    /// Stamp a new, active record for a validated request
    pub fn create(new_monitor: NewMonitor) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            from: new_monitor.from.into(),
            to: new_monitor.to.into(),
            days_min: new_monitor.days.min(),
            days_max: new_monitor.days.max(),
            email: new_monitor.email,
            notify_time: new_monitor
                .notify_time
                .filter(|t| !t.is_empty())
                .unwrap_or_else(default_notify_time),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            active: true,
        }
    }

    /// The trip window of this record
    pub fn days(&self) -> DayRange {
        DayRange::new(Some(self.days_min), Some(self.days_max)).unwrap_or_default()
    }
}

fn default_notify_time() -> String {
    DEFAULT_NOTIFY_TIME.into()
}

fn default_days_min() -> i64 {
    DEFAULT_DAYS_MIN
}

fn default_days_max() -> i64 {
    DEFAULT_DAYS_MAX
}

/// Only a JSON `true` counts, any other value reads as `false`
fn strictly_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}
