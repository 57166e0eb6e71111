//! Conversation turn types for TaxMitra.
//!
//! A conversation is an ordered sequence of [`Turn`]s exchanged between the
//! user and the advisory bot. Turns are immutable once created; the
//! conversation store holds them in strict chronological insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Which side of the conversation produced a turn.
///
/// Serialized lowercase ("user"/"bot") to match the persisted slot layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// One conversation entry.
///
/// `content` is the raw text as entered; it may contain any user-supplied
/// characters. Escaping happens at render time, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub sender: Sender,
    pub content: String,
    /// Assigned at creation time, serialized RFC 3339.
    pub timestamp: DateTime<Utc>,
    /// Marks the bootstrap welcome turn so a history clear can retain it
    /// without inferring from position. Omitted from the wire layout on
    /// ordinary turns.
    #[serde(default, rename = "isWelcome", skip_serializing_if = "is_false")]
    pub is_welcome: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Turn {
    /// A user-authored turn stamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
            timestamp: Utc::now(),
            is_welcome: false,
        }
    }

    /// A bot-authored turn stamped now.
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            content: content.into(),
            timestamp: Utc::now(),
            is_welcome: false,
        }
    }

    /// The bootstrap welcome turn, tagged for retention across clears.
    pub fn welcome(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            content: content.into(),
            timestamp: Utc::now(),
            is_welcome: true,
        }
    }
}

/// Identity token for one pending deferred response, wrapping a UUID v7.
///
/// A completion resolves only while its token still matches the armed one;
/// superseded completions are dropped instead of corrupting the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Create a new RequestId using UUID v7 (time-sortable).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
