//! Outbound adapters: remote model clients and durable storage.

pub mod gemini;
pub mod storage;
