// src/lib.rs
// Public library surface for the Meridian briefs clients.

pub mod config;
pub mod error;
pub mod events;
pub mod llm;

// ---- Re-exports for stable public API ----
pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::events::{Event, EventsClient, Source};
pub use crate::llm::{ChatMessage, LlmClient, Usage};
