//! Durable storage location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding saved records. Defaults to `~/.biovision/`.
    pub dir: Option<PathBuf>,
}
