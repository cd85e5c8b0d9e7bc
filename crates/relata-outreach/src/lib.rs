//! # relata-outreach
//!
//! Message personalization backends for the relata referral engine.
//!
//! This crate provides:
//! - HTTP composer backend (Ollama-style chat endpoint, default)
//! - Deterministic prompt construction
//! - Mock backend for tests and offline use
//!
//! The [`relata_core::Personalizer`] trait is the seam: the store never knows
//! which backend it talks to, bounds each call with a timeout, and falls back
//! to token substitution when the backend fails.

pub mod http;
pub mod mock;
pub mod prompt;

// Re-export core types
pub use relata_core::*;

pub use http::HttpComposerBackend;
pub use mock::{MockCall, MockComposerBackend};
pub use prompt::{personalization_prompt, PERSONALIZE_SYSTEM_PROMPT};
