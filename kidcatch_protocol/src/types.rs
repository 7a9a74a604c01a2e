// Identifier newtypes for the HTTP API.
//
// Both are opaque strings on the wire (`#[serde(transparent)]`). Stored games
// get a UUID v4; games that could not be persisted get a `temp_{millis}` id so
// the client can still show and play them for the current session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix marking a game that was never persisted.
pub const TEMPORARY_PREFIX: &str = "temp_";

/// Game record ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    /// Fresh random ID for a new stored record.
    pub fn generate() -> Self {
        GameId(uuid::Uuid::new_v4().to_string())
    }

    /// ID for an unsaved game created at `unix_millis`.
    pub fn temporary(unix_millis: i64) -> Self {
        GameId(format!("{TEMPORARY_PREFIX}{unix_millis}"))
    }

    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMPORARY_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied user ID. Not authenticated; used only for ownership checks.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
