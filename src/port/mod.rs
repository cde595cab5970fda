//! Hexagonal ports: interfaces the application core depends on.

pub mod outbound;
