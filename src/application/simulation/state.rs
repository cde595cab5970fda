//! Observable simulation state and the reducer that folds run events into it.

use serde::Serialize;

use super::event::{RunEvent, RunEventKind, RunToken};
use crate::domain::{ImageState, Side, SimulationResult};

/// Coarse phase of the state, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Nothing started yet.
    Idle,
    /// Remote calls in flight.
    Generating,
    /// Last run ended with a message and no result.
    Error,
    /// Last run produced a result.
    Result,
}

/// Snapshot published to observers after every accepted event.
///
/// `result` and `error` are never both set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    #[serde(skip)]
    pub token: RunToken,
    pub generating: bool,
    pub result: Option<SimulationResult>,
    pub error: Option<String>,
}

impl SimulationState {
    #[must_use]
    pub fn phase(&self) -> RunPhase {
        if self.generating {
            RunPhase::Generating
        } else if self.error.is_some() {
            RunPhase::Error
        } else if self.result.is_some() {
            RunPhase::Result
        } else {
            RunPhase::Idle
        }
    }

    /// Fold `event` into the state. Returns whether anything changed.
    ///
    /// `Started` and `Rejected` adopt a newer token; every other event is
    /// dropped unless it carries the current token.
    pub fn apply(&mut self, event: &RunEvent) -> bool {
        match &event.kind {
            RunEventKind::Started => {
                if event.token < self.token {
                    return false;
                }
                self.token = event.token;
                self.generating = true;
                self.result = None;
                self.error = None;
                true
            }
            RunEventKind::Rejected { message } => {
                if event.token < self.token {
                    return false;
                }
                self.token = event.token;
                self.generating = false;
                self.result = None;
                self.error = Some(message.clone());
                true
            }
            _ if event.token != self.token => false,
            RunEventKind::TextReady {
                animal_a,
                animal_b,
                details,
            } => {
                self.result = Some(SimulationResult::pending(
                    *animal_a,
                    *animal_b,
                    details.clone(),
                ));
                self.error = None;
                true
            }
            RunEventKind::TextFailed { message } => {
                self.result = None;
                self.error = Some(message.clone());
                true
            }
            RunEventKind::ImageReady { side, uri } => {
                self.settle_image(*side, ImageState::Ready { uri: uri.clone() })
            }
            RunEventKind::ImageFailed { side, reason } => self.settle_image(
                *side,
                ImageState::Unavailable {
                    reason: reason.clone(),
                },
            ),
            RunEventKind::ImageRetry { side } => {
                let Some(result) = self.result.as_mut() else {
                    return false;
                };
                let perspective = result.perspective_mut(*side);
                if perspective.is_loading() {
                    return false;
                }
                perspective.image = ImageState::Loading;
                true
            }
            RunEventKind::Finished => std::mem::replace(&mut self.generating, false),
        }
    }

    /// Move a loading image to its settled state.
    fn settle_image(&mut self, side: Side, image: ImageState) -> bool {
        let Some(result) = self.result.as_mut() else {
            return false;
        };
        let perspective = result.perspective_mut(side);
        if !perspective.is_loading() {
            return false;
        }
        perspective.image = image;
        true
    }
}
