//! Run events folded into the simulation state.

use std::fmt;

use crate::domain::{Animal, Side, VisionDetails};

/// Generation counter identifying one run.
///
/// Every call to start a run takes a fresh token; events carrying an older
/// token are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunToken(u64);

impl RunToken {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEvent {
    pub token: RunToken,
    pub kind: RunEventKind,
}

impl RunEvent {
    #[must_use]
    pub const fn new(token: RunToken, kind: RunEventKind) -> Self {
        Self { token, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEventKind {
    /// Run accepted; remote calls are about to start.
    Started,
    /// Run refused before any remote call.
    Rejected { message: String },
    /// Text step succeeded.
    TextReady {
        animal_a: Animal,
        animal_b: Animal,
        details: VisionDetails,
    },
    /// Text step failed; the run shows no result.
    TextFailed { message: String },
    ImageReady { side: Side, uri: String },
    ImageFailed { side: Side, reason: String },
    /// Manual retry of one image was requested.
    ImageRetry { side: Side },
    /// Run left the generating state.
    Finished,
}

impl RunEventKind {
    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Rejected { .. } => "rejected",
            Self::TextReady { .. } => "text_ready",
            Self::TextFailed { .. } => "text_failed",
            Self::ImageReady { .. } => "image_ready",
            Self::ImageFailed { .. } => "image_failed",
            Self::ImageRetry { .. } => "image_retry",
            Self::Finished => "finished",
        }
    }
}
