//! Engagement quest engine.
//!
//! Consumes chat-platform activity events, classifies them against a static
//! quest catalog, tracks per-user progress toward each quest's threshold,
//! and fires a one-time reward plus a DM on completion.
//!
//! The engine is a pure consumer with one entry point
//! (`QuestEngine::handle_event`); all downstream failures are contained
//! there and reported through `QuestOutcome`, never propagated to the
//! event source.

pub mod catalog;
pub mod classifier;
pub mod event;
pub mod handler;
pub mod progress;
pub mod testing;
pub mod traits;

pub use catalog::{EventKind, QuestCatalog, QuestDefinition, QuestId};
pub use classifier::{classify, Trigger};
pub use event::ActivityEvent;
pub use handler::{CompletionOutcome, QuestEngine, QuestOutcome};
pub use progress::{Advance, InMemoryProgress, ProgressStore};
pub use traits::{ChatPlatform, RewardsLedger};
