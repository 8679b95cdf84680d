//! The persisted countdown record and the views derived from it

use serde::{Deserialize, Deserializer, Serialize};

/// The single record kept in the remote store.
///
/// `is_active` is written for readers of the raw document but never trusted
/// on read; activity is always recomputed from `end_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownState {
    #[serde(default, deserialize_with = "deserialize_end_time")]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub is_active: bool,
}

/// Read an end time from any JSON number, flooring fractional milliseconds.
/// Values outside the i64 range saturate.
pub fn deserialize_end_time<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64))))
}

impl CountdownState {
    /// No countdown running
    pub fn inactive() -> Self {
        Self {
            end_time: None,
            is_active: false,
        }
    }

    /// A countdown ending at `end_time`
    pub fn running(end_time: i64) -> Self {
        Self {
            end_time: Some(end_time),
            is_active: true,
        }
    }

    /// Build the record to persist for a start request.
    ///
    /// An absent, zero or past end time clears the countdown.
    pub fn from_request(requested: Option<i64>, now: i64) -> Self {
        match requested {
            Some(end_time) if end_time != 0 && end_time > now => Self::running(end_time),
            _ => Self::inactive(),
        }
    }

    /// Derive what a reader sees at `now`
    pub fn observe(&self, now: i64) -> CountdownStatus {
        match self.end_time {
            Some(end_time) if end_time > now => CountdownStatus {
                end_time: Some(end_time),
                is_active: true,
                time_remaining: end_time - now,
            },
            _ => CountdownStatus::inactive(),
        }
    }
}

/// Response to a countdown query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownStatus {
    #[serde(default, deserialize_with = "deserialize_end_time")]
    pub end_time: Option<i64>,
    pub is_active: bool,
    pub time_remaining: i64,
}

impl CountdownStatus {
    pub fn inactive() -> Self {
        Self {
            end_time: None,
            is_active: false,
            time_remaining: 0,
        }
    }
}

/// Response to a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOutcome {
    pub success: bool,
    #[serde(default, deserialize_with = "deserialize_end_time")]
    pub end_time: Option<i64>,
}
