//! Static quest catalog.
//!
//! The catalog is fixed at build time and validated once at load, so a
//! malformed entry fails startup instead of failing at lookup time.

use serde::{Deserialize, Serialize};

use questline_common::QuestlineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestId {
    Connector,
    Helper,
    FirstContact,
}

impl QuestId {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestId::Connector => "connector",
            QuestId::Helper => "helper",
            QuestId::FirstContact => "first_contact",
        }
    }
}

impl std::fmt::Display for QuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity-event categories the catalog can listen for.
///
/// `Unknown` absorbs every category the platform sends that no quest
/// cares about, so unrecognized events deserialize and no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Message,
    ReactionAdded,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone)]
pub struct QuestDefinition {
    pub id: QuestId,
    pub name: &'static str,
    pub description: &'static str,
    /// Events required before completion. Always positive.
    pub target_count: u32,
    /// Reward amount on completion.
    pub points: u32,
    /// Which event category advances this quest.
    pub event_kind: EventKind,
    /// Restricts the quest to one named channel. Presence selects the
    /// durable first-contact path instead of the counter path.
    pub channel_name: Option<&'static str>,
}

/// Read-only table of all quests. Built once at process start.
#[derive(Debug)]
pub struct QuestCatalog {
    quests: Vec<QuestDefinition>,
}

impl QuestCatalog {
    /// The built-in quest table.
    pub fn builtin() -> Result<Self, QuestlineError> {
        Self::validated(vec![
            QuestDefinition {
                id: QuestId::Connector,
                name: "Connector",
                description: "React to 5 messages",
                target_count: 5,
                points: 5,
                event_kind: EventKind::ReactionAdded,
                channel_name: None,
            },
            QuestDefinition {
                id: QuestId::Helper,
                name: "Helper",
                description: "Reply to 3 threads",
                target_count: 3,
                points: 5,
                event_kind: EventKind::Message,
                channel_name: None,
            },
            QuestDefinition {
                id: QuestId::FirstContact,
                name: "First Contact",
                description: "First post in #_start-here",
                target_count: 1,
                points: 2,
                event_kind: EventKind::Message,
                channel_name: Some("_start-here"),
            },
        ])
    }

    /// Build a catalog from a quest table, rejecting malformed entries.
    pub fn validated(quests: Vec<QuestDefinition>) -> Result<Self, QuestlineError> {
        for quest in &quests {
            if quest.target_count == 0 {
                return Err(QuestlineError::Validation(format!(
                    "quest {} has zero target_count",
                    quest.id
                )));
            }
            if quest.event_kind == EventKind::Unknown {
                return Err(QuestlineError::Validation(format!(
                    "quest {} listens for an unknown event kind",
                    quest.id
                )));
            }
        }
        for (i, quest) in quests.iter().enumerate() {
            if quests[..i].iter().any(|q| q.id == quest.id) {
                return Err(QuestlineError::Validation(format!(
                    "duplicate quest id {}",
                    quest.id
                )));
            }
        }
        Ok(Self { quests })
    }

    pub fn definition(&self, id: QuestId) -> Option<&QuestDefinition> {
        self.quests.iter().find(|q| q.id == id)
    }

    /// Quests listening for a given event kind.
    pub fn listening_for(&self, kind: EventKind) -> impl Iterator<Item = &QuestDefinition> {
        self.quests.iter().filter(move |q| q.event_kind == kind)
    }
}
