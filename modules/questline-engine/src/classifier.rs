//! Maps one inbound event to quest triggers. Pure, no side effects.

use crate::catalog::{QuestCatalog, QuestId};
use crate::event::ActivityEvent;

/// Signal produced by classification. An event may produce several.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Advance the progress counter for an ordinary quest.
    Advance(QuestId),
    /// Evaluate the durable first-contact path.
    FirstContact,
}

/// Classify one event against the catalog.
///
/// Only quests the catalog lists for the event's kind are considered;
/// each quest's own applicability rule is evaluated independently, so
/// one event can trigger more than one quest.
pub fn classify(catalog: &QuestCatalog, event: &ActivityEvent) -> Vec<Trigger> {
    let mut triggers = Vec::new();

    for quest in catalog.listening_for(event.kind) {
        match quest.id {
            // Any reaction counts.
            QuestId::Connector => triggers.push(Trigger::Advance(QuestId::Connector)),

            // Human thread replies only. The thread-starting message
            // carries its own ts as the root and does not count.
            QuestId::Helper => {
                if event.is_human_message() && event.is_thread_reply() {
                    triggers.push(Trigger::Advance(QuestId::Helper));
                }
            }

            // Human top-level posts only; thread traffic is ignored.
            QuestId::FirstContact => {
                if event.is_human_message() && event.thread_ts.is_none() {
                    triggers.push(Trigger::FirstContact);
                }
            }
        }
    }

    triggers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EventKind;

    fn catalog() -> QuestCatalog {
        QuestCatalog::builtin().unwrap()
    }

    fn message(ts: &str, thread_ts: Option<&str>) -> ActivityEvent {
        ActivityEvent {
            kind: EventKind::Message,
            user: Some("U1".into()),
            ts: ts.into(),
            thread_ts: thread_ts.map(String::from),
            channel: Some("C1".into()),
            is_automated: false,
            subtype: None,
        }
    }

    #[test]
    fn reaction_triggers_connector() {
        let mut event = message("1.0", None);
        event.kind = EventKind::ReactionAdded;
        assert_eq!(
            classify(&catalog(), &event),
            vec![Trigger::Advance(QuestId::Connector)]
        );
    }

    #[test]
    fn thread_reply_triggers_helper() {
        let event = message("2.0", Some("1.0"));
        assert_eq!(
            classify(&catalog(), &event),
            vec![Trigger::Advance(QuestId::Helper)]
        );
    }

    #[test]
    fn thread_starting_message_triggers_nothing() {
        // thread_ts == ts means this message started the thread
        let event = message("1.0", Some("1.0"));
        assert!(classify(&catalog(), &event).is_empty());
    }

    #[test]
    fn top_level_post_triggers_first_contact() {
        let event = message("1.0", None);
        assert_eq!(classify(&catalog(), &event), vec![Trigger::FirstContact]);
    }

    #[test]
    fn automated_message_triggers_nothing() {
        let mut reply = message("2.0", Some("1.0"));
        reply.is_automated = true;
        assert!(classify(&catalog(), &reply).is_empty());

        let mut top_level = message("1.0", None);
        top_level.is_automated = true;
        assert!(classify(&catalog(), &top_level).is_empty());
    }

    #[test]
    fn subtyped_message_triggers_nothing() {
        let mut event = message("1.0", None);
        event.subtype = Some("channel_join".into());
        assert!(classify(&catalog(), &event).is_empty());
    }

    #[test]
    fn unknown_kind_triggers_nothing() {
        let mut event = message("1.0", None);
        event.kind = EventKind::Unknown;
        assert!(classify(&catalog(), &event).is_empty());
    }
}
