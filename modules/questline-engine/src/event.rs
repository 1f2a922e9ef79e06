//! Inbound activity events, as delivered by the chat platform.

use serde::Deserialize;

use crate::catalog::EventKind;

/// One activity event from the chat platform.
///
/// Timestamps are the platform's opaque strings; the only operation on
/// them is equality (a thread reply carries its root's timestamp in
/// `thread_ts`, and the root message carries its own).
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// The acting user. Events without one are dropped with no effect.
    #[serde(default)]
    pub user: Option<String>,
    pub ts: String,
    /// Root timestamp of the thread this message belongs to, if any.
    #[serde(default)]
    pub thread_ts: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    /// Bot-originated flag.
    #[serde(default)]
    pub is_automated: bool,
    /// Marker for system-generated messages (joins, topic changes, ...).
    #[serde(default)]
    pub subtype: Option<String>,
}

impl ActivityEvent {
    /// Human-authored content: not bot-originated and carrying no system
    /// subtype marker.
    pub fn is_human_message(&self) -> bool {
        !self.is_automated && self.subtype.as_deref().is_none_or(str::is_empty)
    }

    /// A reply inside a thread, as opposed to the thread-starting message
    /// (which carries its own timestamp as the root).
    pub fn is_thread_reply(&self) -> bool {
        matches!(&self.thread_ts, Some(root) if *root != self.ts)
    }
}
