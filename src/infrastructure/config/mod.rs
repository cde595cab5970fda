//! Infrastructure configuration modules.

pub mod gemini;
pub mod logging;
pub mod settings;
pub mod storage;
