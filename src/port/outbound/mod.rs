//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the remote generative models and the durable
//! storage that the simulation and settings services rely on.

pub mod storage;
pub mod vision;
