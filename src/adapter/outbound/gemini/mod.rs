//! Gemini REST adapter for the [`VisionModel`](crate::port::outbound::vision::VisionModel) port.
//!
//! Talks to the `generateContent` endpoint directly over `reqwest`:
//! structured JSON output for perspective text, inline image parts for
//! perspective renders.

mod client;
mod dto;
mod prompt;

pub use client::{GeminiClient, DEFAULT_BASE_URL};
