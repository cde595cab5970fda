//! Simulation orchestrator.
//!
//! Sequences one text call followed by two concurrent image calls and
//! publishes every step as a [`RunEvent`] folded into a shared
//! [`SimulationState`]. Observers follow along through a `watch` channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::stream::{FuturesUnordered, StreamExt};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::event::{RunEvent, RunEventKind, RunToken};
use super::state::SimulationState;
use crate::domain::{Animal, AppSettings, ModelKind, Side, SimulationResult};
use crate::error::{Error, Result};
use crate::port::outbound::vision::{ModelRequest, VisionModel};

/// Message shown when both selections name the same animal.
pub const SAME_ANIMAL_MESSAGE: &str = "Please select two different animals for comparison.";

/// Runs simulations against a [`VisionModel`] and publishes their progress.
pub struct SimulationOrchestrator {
    model: Arc<dyn VisionModel>,
    state: watch::Sender<SimulationState>,
    next_token: AtomicU64,
    active: Mutex<Option<CancellationToken>>,
}

/// Leaves the generating state when dropped, whatever path the run took.
struct FinishGuard<'a> {
    state: &'a watch::Sender<SimulationState>,
    token: RunToken,
}

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        publish(self.state, RunEvent::new(self.token, RunEventKind::Finished));
    }
}

fn publish(state: &watch::Sender<SimulationState>, event: RunEvent) -> bool {
    let kind = event.kind.as_str();
    let applied = state.send_if_modified(|current| current.apply(&event));
    if !applied {
        debug!(token = %event.token, event = kind, "Dropped run event");
    }
    applied
}

impl SimulationOrchestrator {
    #[must_use]
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        let (state, _) = watch::channel(SimulationState::default());
        Self {
            model,
            state,
            next_token: AtomicU64::new(1),
            active: Mutex::new(None),
        }
    }

    /// Follow state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SimulationState> {
        self.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> SimulationState {
        self.state.borrow().clone()
    }

    /// Take a new run token and cancel whatever run was in flight.
    ///
    /// Token order and cancellation order are taken under the same lock.
    fn begin_run(&self) -> (RunToken, CancellationToken) {
        let cancel = CancellationToken::new();
        let mut active = self.active.lock();
        let token = RunToken::new(self.next_token.fetch_add(1, Ordering::SeqCst));
        if let Some(previous) = active.replace(cancel.clone()) {
            previous.cancel();
        }
        (token, cancel)
    }

    fn result_for(&self, token: RunToken) -> Result<SimulationResult> {
        let state = self.state.borrow();
        if state.token != token {
            return Err(Error::Superseded);
        }
        state.result.clone().ok_or(Error::Superseded)
    }

    /// Compare how `animal_a` and `animal_b` see each other.
    ///
    /// Supersedes any run still in flight. Image failures are recorded on
    /// the affected perspective and never fail the run.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if both animals are the same (no remote call is made)
    /// - any error from the text step (the state then carries its message)
    /// - [`Error::Superseded`] if a newer run started before this one settled
    pub async fn run_simulation(
        &self,
        animal_a: &Animal,
        animal_b: &Animal,
        settings: &AppSettings,
    ) -> Result<SimulationResult> {
        let (token, cancel) = self.begin_run();

        if animal_a.id == animal_b.id {
            info!(%token, animal = animal_a.id, "Rejected simulation of an animal with itself");
            publish(
                &self.state,
                RunEvent::new(
                    token,
                    RunEventKind::Rejected {
                        message: SAME_ANIMAL_MESSAGE.to_string(),
                    },
                ),
            );
            return Err(Error::Validation(SAME_ANIMAL_MESSAGE.to_string()));
        }

        publish(&self.state, RunEvent::new(token, RunEventKind::Started));
        let _finish = FinishGuard {
            state: &self.state,
            token,
        };

        info!(
            %token,
            animal_a = animal_a.id,
            animal_b = animal_b.id,
            model = self.model.name(),
            text_model = %settings.text_model,
            "Simulation started"
        );

        let text_request = ModelRequest::new(settings.api_key(), settings.model(ModelKind::Text));
        let details = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Superseded),
            details = self.model.fetch_vision_details(animal_a.name, animal_b.name, &text_request) => details,
        };

        let details = match details {
            Ok(details) => details,
            Err(e) => {
                let message = e.user_message();
                warn!(%token, error = %e, "Vision details request failed");
                publish(
                    &self.state,
                    RunEvent::new(token, RunEventKind::TextFailed { message }),
                );
                return Err(e);
            }
        };

        let prompt_a = details.perspective_a.image_prompt.clone();
        let prompt_b = details.perspective_b.image_prompt.clone();
        publish(
            &self.state,
            RunEvent::new(
                token,
                RunEventKind::TextReady {
                    animal_a: *animal_a,
                    animal_b: *animal_b,
                    details,
                },
            ),
        );
        debug!(%token, "Vision details ready, requesting images");

        let image_request =
            ModelRequest::new(settings.api_key(), settings.model(ModelKind::Image));
        let mut pending: FuturesUnordered<_> = [(Side::A, prompt_a), (Side::B, prompt_b)]
            .into_iter()
            .map(|(side, prompt)| self.render(token, side, prompt, &image_request))
            .collect();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Err(Error::Superseded),
                next = pending.next() => match next {
                    Some(event) => {
                        publish(&self.state, event);
                    }
                    None => break,
                },
            }
        }

        let result = self.result_for(token)?;
        info!(
            %token,
            image_a = result.perspective_a.image.label(),
            image_b = result.perspective_b.image.label(),
            "Simulation complete"
        );
        Ok(result)
    }

    /// Request one perspective image again (manual "try again").
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if there is no result to retry, or a run is
    ///   still generating
    /// - [`Error::Superseded`] if a newer run started meanwhile
    pub async fn retry_image(&self, side: Side, settings: &AppSettings) -> Result<SimulationResult> {
        let (token, prompt) = {
            let state = self.state.borrow();
            if state.generating {
                return Err(Error::Validation(
                    "a simulation is still in progress".to_string(),
                ));
            }
            let Some(result) = state.result.as_ref() else {
                return Err(Error::Validation("there is no simulation to retry".to_string()));
            };
            (state.token, result.perspective(side).image_prompt.clone())
        };

        if !publish(&self.state, RunEvent::new(token, RunEventKind::ImageRetry { side })) {
            return Err(Error::Validation(format!(
                "image {side} is already being generated"
            )));
        }
        info!(%token, %side, "Retrying perspective image");

        let request = ModelRequest::new(settings.api_key(), settings.model(ModelKind::Image));
        let event = self.render(token, side, prompt, &request).await;
        publish(&self.state, event);

        self.result_for(token)
    }

    /// Render one prompt, turning the outcome into the matching event.
    async fn render(
        &self,
        token: RunToken,
        side: Side,
        prompt: String,
        request: &ModelRequest,
    ) -> RunEvent {
        let kind = match self.model.fetch_perspective_image(&prompt, request).await {
            Ok(uri) => {
                debug!(%token, %side, bytes = uri.len(), "Perspective image ready");
                RunEventKind::ImageReady { side, uri }
            }
            Err(e) => {
                warn!(%token, %side, error = %e, "Perspective image generation failed");
                RunEventKind::ImageFailed {
                    side,
                    reason: e.user_message(),
                }
            }
        };
        RunEvent::new(token, kind)
    }
}
