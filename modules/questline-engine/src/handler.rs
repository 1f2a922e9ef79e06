//! The event handling path: classify, advance, complete.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{QuestCatalog, QuestDefinition, QuestId};
use crate::classifier::{classify, Trigger};
use crate::event::ActivityEvent;
use crate::progress::{Advance, ProgressStore};
use crate::traits::{ChatPlatform, RewardsLedger};

/// What handling one event did for one quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestOutcome {
    /// Counter moved but the quest is not done yet.
    Progressed {
        quest: QuestId,
        count: u32,
        target: u32,
    },
    /// The quest was already complete (or the first post already
    /// recorded); nothing changed.
    AlreadyComplete { quest: QuestId },
    /// The quest just completed; `completion` says how delivery went.
    Completed {
        quest: QuestId,
        completion: CompletionOutcome,
    },
    /// A store or durable-check failure kept the quest from being
    /// evaluated. Contained here, not propagated.
    CheckFailed { quest: QuestId, error: String },
}

/// How reward and notification delivery went for a completed quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Awarded { points: u32 },
    /// The bot identity could not be resolved: no award, no DM. The
    /// counter has already reached target and will not re-trigger, so
    /// the quest stays unawarded for this process lifetime.
    IdentityUnresolved,
    /// The award itself failed; no points were credited. No retry,
    /// no rollback.
    DeliveryFailed { error: String },
    /// Points were credited but the completion DM failed. No retry.
    NotificationFailed { points: u32, error: String },
}

pub struct QuestEngine {
    catalog: QuestCatalog,
    progress: Arc<dyn ProgressStore>,
    ledger: Arc<dyn RewardsLedger>,
    chat: Arc<dyn ChatPlatform>,
}

impl QuestEngine {
    pub fn new(
        catalog: QuestCatalog,
        progress: Arc<dyn ProgressStore>,
        ledger: Arc<dyn RewardsLedger>,
        chat: Arc<dyn ChatPlatform>,
    ) -> Self {
        Self {
            catalog,
            progress,
            ledger,
            chat,
        }
    }

    pub fn catalog(&self) -> &QuestCatalog {
        &self.catalog
    }

    /// Handle one inbound activity event.
    ///
    /// Never fails: every downstream error is contained here and reported
    /// in the returned outcomes, so the event source sees fire-and-forget.
    pub async fn handle_event(&self, event: &ActivityEvent) -> Vec<QuestOutcome> {
        let Some(user_id) = event.user.as_deref() else {
            debug!("Event without actor, ignoring");
            return Vec::new();
        };

        let mut outcomes = Vec::new();
        for trigger in classify(&self.catalog, event) {
            let outcome = match trigger {
                Trigger::Advance(quest) => self.advance(user_id, quest).await,
                Trigger::FirstContact => self.first_contact(user_id, event).await,
            };
            if let Some(outcome) = outcome {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    async fn advance(&self, user_id: &str, quest: QuestId) -> Option<QuestOutcome> {
        let def = self.catalog.definition(quest)?;

        match self.progress.advance(user_id, quest, def.target_count).await {
            Ok(Advance::JustCompleted) => {
                info!(user = user_id, quest = %quest, "Quest complete");
                let completion = self.complete(user_id, def).await;
                Some(QuestOutcome::Completed { quest, completion })
            }
            Ok(Advance::StillInProgress { count }) if count >= def.target_count => {
                // Dedup guard fired: the quest was already done.
                Some(QuestOutcome::AlreadyComplete { quest })
            }
            Ok(Advance::StillInProgress { count }) => {
                debug!(
                    user = user_id,
                    quest = %quest,
                    count,
                    target = def.target_count,
                    "Quest progress"
                );
                Some(QuestOutcome::Progressed {
                    quest,
                    count,
                    target: def.target_count,
                })
            }
            Err(e) => {
                warn!(user = user_id, quest = %quest, error = %e, "Progress store failure");
                Some(QuestOutcome::CheckFailed {
                    quest,
                    error: e.to_string(),
                })
            }
        }
    }

    /// The durable first-contact path. Never touches the progress store:
    /// the backend owns the "already posted" state, so completion survives
    /// process restarts.
    async fn first_contact(&self, user_id: &str, event: &ActivityEvent) -> Option<QuestOutcome> {
        let quest = QuestId::FirstContact;
        let def = self.catalog.definition(quest)?;
        let channel_name = def.channel_name?;
        let event_channel = event.channel.as_deref()?;

        let target_channel = match self.chat.channel_id(channel_name).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                debug!(channel = channel_name, "Quest channel not found, skipping");
                return None;
            }
            Err(e) => {
                warn!(channel = channel_name, error = %e, "Channel resolution failed");
                return Some(QuestOutcome::CheckFailed {
                    quest,
                    error: e.to_string(),
                });
            }
        };

        if event_channel != target_channel {
            return None;
        }

        match self
            .ledger
            .has_posted_in_channel(user_id, &target_channel)
            .await
        {
            Ok(true) => Some(QuestOutcome::AlreadyComplete { quest }),
            Ok(false) => {
                if let Err(e) = self.ledger.record_post(user_id, &target_channel).await {
                    warn!(user = user_id, error = %e, "Failed to record first post");
                    return Some(QuestOutcome::CheckFailed {
                        quest,
                        error: e.to_string(),
                    });
                }
                info!(user = user_id, quest = %quest, "Quest complete");
                let completion = self.complete(user_id, def).await;
                Some(QuestOutcome::Completed { quest, completion })
            }
            Err(e) => {
                warn!(user = user_id, error = %e, "First-contact check failed");
                Some(QuestOutcome::CheckFailed {
                    quest,
                    error: e.to_string(),
                })
            }
        }
    }

    /// Award points and notify the user. All failures are contained here;
    /// there is no retry, and the already-advanced counter is not rolled
    /// back.
    async fn complete(&self, user_id: &str, def: &QuestDefinition) -> CompletionOutcome {
        let bot_id = match self.chat.bot_user_id().await {
            Ok(Some(id)) => id,
            Ok(None) => {
                warn!(
                    user = user_id,
                    quest = %def.id,
                    "Cannot award quest points: bot identity unresolved"
                );
                return CompletionOutcome::IdentityUnresolved;
            }
            Err(e) => {
                warn!(user = user_id, quest = %def.id, error = %e, "Bot identity lookup failed");
                return CompletionOutcome::DeliveryFailed {
                    error: e.to_string(),
                };
            }
        };

        let reason = format!("Completed quest: {}", def.name);
        if let Err(e) = self
            .ledger
            .award(&bot_id, user_id, def.points, &reason)
            .await
        {
            warn!(user = user_id, quest = %def.id, error = %e, "Failed to award quest points");
            return CompletionOutcome::DeliveryFailed {
                error: e.to_string(),
            };
        }

        let text = format!(
            ":trophy: *Quest Complete!*\n\nYou've completed the *{}* quest and earned {} points! :star2:",
            def.name, def.points
        );
        if let Err(e) = self.chat.send_dm(user_id, &text).await {
            warn!(user = user_id, quest = %def.id, error = %e, "Failed to send completion DM");
            return CompletionOutcome::NotificationFailed {
                points: def.points,
                error: e.to_string(),
            };
        }

        CompletionOutcome::Awarded { points: def.points }
    }
}
