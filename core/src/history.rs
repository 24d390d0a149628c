//! Turn history types
//!
//! The history is a linear, timestamped sequence of turns, append-only and
//! ordered by creation. Turns are created and mutated only by the
//! coordinator; the containers it publishes are replaced wholesale, never
//! mutated in place, so held snapshots stay stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::protocol::Part;

/// Author of a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    User,
    Agent {
        display_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
}

/// Lifecycle of a turn; there is no failed state, a turn whose cycle
/// errored simply stays pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    Pending,
    Completed,
}

/// One displayable unit inside a turn, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    pub part: Part,
}

impl Content {
    /// Wrap a part in a freshly-identified content
    pub fn new(part: Part) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            part,
        }
    }

    /// Convenience for a text content
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Part::text(text))
    }
}

/// One exchange unit in history, authored by the user or the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub context_id: Option<String>,
    pub role: Role,
    pub contents: Vec<Content>,
    pub status: TurnStatus,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, contents: Vec<Content>, status: TurnStatus, context_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            context_id,
            role,
            contents,
            status,
            created: now,
            last_updated: now,
        }
    }

    /// A user turn, complete as soon as it is built
    pub fn user(contents: Vec<Content>, context_id: Option<String>) -> Self {
        Self::new(Role::User, contents, TurnStatus::Completed, context_id)
    }

    /// An agent turn awaiting its response, empty until the cycle finishes
    pub fn agent(role: Role, context_id: Option<String>) -> Self {
        Self::new(role, Vec::new(), TurnStatus::Pending, context_id)
    }

    pub fn is_pending(&self) -> bool {
        self.status == TurnStatus::Pending
    }

    /// Concatenated text of all text contents, for display
    pub fn text(&self) -> String {
        let mut out = String::new();
        for content in &self.contents {
            if let Part::Text { text } = &content.part {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(text);
            }
        }
        out
    }
}
