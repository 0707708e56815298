//! Gemini API client and types
//!
//! A single `generateContent` call per prompt; the first candidate's
//! first text part is the answer.

mod client;
mod types;

pub use client::{GeminiClient, PLACEHOLDER_REPLY, TextGenerator, generate_or_placeholder};
pub use types::*;
