use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event id must be a positive integer, got {0}")]
pub struct EventIdError(pub i64);

/// Identifier of the event a screen is bound to. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EventId(i64);

impl EventId {
    pub fn new(raw: i64) -> Result<Self, EventIdError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(EventIdError(raw))
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for EventId {
    type Error = EventIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventId> for i64 {
    fn from(value: EventId) -> Self {
        value.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatus {
    Confirmed,
    Cancelled,
    /// Any token the backend adds later.
    Other(String),
}

impl RegistrationStatus {
    pub const CONFIRMED: &'static str = "CONFIRMED";
    pub const CANCELLED: &'static str = "CANCELLED";

    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::CONFIRMED => Self::Confirmed,
            Self::CANCELLED => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Confirmed => Self::CONFIRMED,
            Self::Cancelled => Self::CANCELLED,
            Self::Other(raw) => raw,
        }
    }
}
