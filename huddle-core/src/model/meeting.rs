use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValidationError, required};
use crate::model::participant::ParticipantId;

/// Room that exists before any client shows up.
pub const CONSTANT_ROOM_CODE: &str = "CONSTANT";

/// Globally unique meeting room code.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl RoomCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn constant() -> Self {
        Self(CONSTANT_ROOM_CODE.to_owned())
    }
}

impl From<&str> for RoomCode {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RoomCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub code: RoomCode,
    pub title: String,
    pub created_by: ParticipantId,
    pub created_at: DateTime<Utc>,
}

/// Body of a create-meeting request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeeting {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl NewMeeting {
    pub fn new(code: &str, title: &str, created_by: &str) -> Self {
        Self {
            code: Some(code.to_owned()),
            title: Some(title.to_owned()),
            created_by: Some(created_by.to_owned()),
        }
    }

    /// Stamps the request with `now`, rejecting it if any field is absent.
    pub fn into_meeting(self, now: DateTime<Utc>) -> Result<Meeting, ValidationError> {
        Ok(Meeting {
            code: RoomCode(required(self.code, "code")?),
            title: required(self.title, "title")?,
            created_by: ParticipantId(required(self.created_by, "createdBy")?),
            created_at: now,
        })
    }
}
