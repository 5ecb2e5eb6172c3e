//! Conversation session data model
//!
//! A [`Session`] is the ordered, append-only sequence of [`Turn`]s exchanged
//! so far in one conversation. It lives only in process memory: it is
//! created when a chat starts, grows one user/assistant pair at a time, and
//! is discarded when the user starts a new chat. Nothing here touches the
//! network or the filesystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Speaker role for a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human participant
    User,
    /// The model's reply
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message exchanged in a conversation, tagged with its speaker role
///
/// Turns are immutable once created: the struct exposes no mutators and the
/// session only ever appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who spoke this turn
    pub role: Role,
    /// The text of the turn
    pub content: String,
}

impl Turn {
    /// Creates a user turn
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::session::{Role, Turn};
    ///
    /// let turn = Turn::user("Hello there");
    /// assert_eq!(turn.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::session::{Role, Turn};
    ///
    /// let turn = Turn::assistant("I'm listening.");
    /// assert_eq!(turn.role, Role::Assistant);
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The ordered set of turns exchanged so far in one conversation
///
/// The turn sequence is append-only. Clearing the session resets it to the
/// state of a freshly created one, with a new id and start time; the shell
/// uses this for the "start new chat" action.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    turns: Vec<Turn>,
}

impl Session {
    /// Creates an empty session
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::session::Session;
    ///
    /// let session = Session::new();
    /// assert!(session.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            turns: Vec::new(),
        }
    }

    /// Unique identifier for this session
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When this session was started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Appends a turn to the session
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns in chronological order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recent `n` turns in chronological order
    ///
    /// Returns all turns when the session holds fewer than `n`.
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::session::{Session, Turn};
    ///
    /// let mut session = Session::new();
    /// session.push(Turn::user("one"));
    /// session.push(Turn::assistant("two"));
    /// session.push(Turn::user("three"));
    /// session.push(Turn::assistant("four"));
    ///
    /// let recent = session.last(3);
    /// assert_eq!(recent.len(), 3);
    /// assert_eq!(recent[0].content, "two");
    /// ```
    pub fn last(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Number of turns in the session
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if the session has no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Clears the session, giving it a fresh id and start time
    pub fn clear(&mut self) {
        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
        self.turns.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
