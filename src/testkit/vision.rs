//! Scripted [`VisionModel`] for orchestration tests.
//!
//! Outcomes are sticky: every call returns the currently scripted outcome
//! until it is replaced. Gates hold exactly one call each, so a test can
//! decide the order in which concurrent requests settle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::domain::{Side, VisionDetails};
use crate::error::{Error, Result};
use crate::port::outbound::vision::{ModelRequest, VisionModel};

use super::domain::dog_fly_details;

/// One-shot barrier released from the test body.
///
/// Releasing before the call arrives is fine; the permit is kept.
#[derive(Clone, Default)]
pub struct Gate(Arc<Notify>);

impl Gate {
    pub fn release(&self) {
        self.0.notify_one();
    }

    async fn wait(&self) {
        self.0.notified().await;
    }
}

enum Outcome<T> {
    Ok(T),
    Err(Error),
}

impl<T: Clone> Outcome<T> {
    fn produce(&self) -> Result<T> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Err(e) => Err(replicate(e)),
        }
    }
}

/// Rebuild an error so a sticky outcome can be returned more than once.
fn replicate(err: &Error) -> Error {
    match err {
        Error::Validation(m) => Error::Validation(m.clone()),
        Error::Auth(m) => Error::Auth(m.clone()),
        Error::EmptyResponse => Error::EmptyResponse,
        Error::MalformedResponse(m) => Error::MalformedResponse(m.clone()),
        Error::NoImageData => Error::NoImageData,
        Error::Api { status, message } => Error::Api {
            status: *status,
            message: message.clone(),
        },
        Error::Superseded => Error::Superseded,
        other => Error::MalformedResponse(other.to_string()),
    }
}

/// Default image returned for `side` by [`ScriptedVision::dog_fly`].
pub fn image_uri(side: Side) -> String {
    match side {
        Side::A => "data:image/png;base64,QQ==".to_string(),
        Side::B => "data:image/png;base64,Qg==".to_string(),
    }
}

/// Test double standing in for the Gemini client.
pub struct ScriptedVision {
    details: VisionDetails,
    text: Mutex<Outcome<VisionDetails>>,
    images: Mutex<HashMap<Side, Outcome<String>>>,
    text_gate: Mutex<Option<Gate>>,
    image_gates: Mutex<HashMap<Side, Gate>>,
    text_calls: AtomicUsize,
    image_calls: AtomicUsize,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedVision {
    /// Model answering with `details` and one image per side.
    pub fn new(details: VisionDetails) -> Self {
        let images = Side::BOTH
            .into_iter()
            .map(|side| (side, Outcome::Ok(image_uri(side))))
            .collect();
        Self {
            text: Mutex::new(Outcome::Ok(details.clone())),
            details,
            images: Mutex::new(images),
            text_gate: Mutex::new(None),
            image_gates: Mutex::new(HashMap::new()),
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Model answering with the dog and fly fixture.
    pub fn dog_fly() -> Self {
        Self::new(dog_fly_details())
    }

    pub fn fail_text(&self, err: Error) {
        *self.text.lock() = Outcome::Err(err);
    }

    pub fn succeed_text(&self, details: VisionDetails) {
        *self.text.lock() = Outcome::Ok(details);
    }

    pub fn fail_image(&self, side: Side, err: Error) {
        self.images.lock().insert(side, Outcome::Err(err));
    }

    pub fn succeed_image(&self, side: Side, uri: &str) {
        self.images.lock().insert(side, Outcome::Ok(uri.to_string()));
    }

    /// Hold the next text call until the returned gate is released.
    pub fn hold_text(&self) -> Gate {
        let gate = Gate::default();
        *self.text_gate.lock() = Some(gate.clone());
        gate
    }

    /// Hold the next image call for `side` until the returned gate is released.
    pub fn hold_image(&self, side: Side) -> Gate {
        let gate = Gate::default();
        self.image_gates.lock().insert(side, gate.clone());
        gate
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    /// Every request seen so far, in arrival order.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().clone()
    }

    /// Wait until at least `n` image calls have arrived.
    ///
    /// # Panics
    ///
    /// Panics after five seconds.
    pub async fn wait_for_image_calls(&self, n: usize) {
        wait_until(|| self.image_calls() >= n).await;
    }

    /// Wait until at least `n` text calls have arrived.
    ///
    /// # Panics
    ///
    /// Panics after five seconds.
    pub async fn wait_for_text_calls(&self, n: usize) {
        wait_until(|| self.text_calls() >= n).await;
    }

    fn side_for(&self, prompt: &str) -> Side {
        if prompt == self.details.perspective_b.image_prompt {
            Side::B
        } else {
            Side::A
        }
    }
}

async fn wait_until(done: impl Fn() -> bool) {
    let poll = async {
        while !done() {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    };
    if tokio::time::timeout(Duration::from_secs(5), poll).await.is_err() {
        panic!("timed out waiting for scripted calls");
    }
}

#[async_trait]
impl VisionModel for ScriptedVision {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_vision_details(
        &self,
        _name_a: &str,
        _name_b: &str,
        request: &ModelRequest,
    ) -> Result<VisionDetails> {
        self.requests.lock().push(request.clone());
        self.text_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.text_gate.lock().take();
        if let Some(gate) = gate {
            gate.wait().await;
        }
        self.text.lock().produce()
    }

    async fn fetch_perspective_image(
        &self,
        prompt: &str,
        request: &ModelRequest,
    ) -> Result<String> {
        self.requests.lock().push(request.clone());
        self.image_calls.fetch_add(1, Ordering::SeqCst);

        let side = self.side_for(prompt);
        let gate = self.image_gates.lock().remove(&side);
        if let Some(gate) = gate {
            gate.wait().await;
        }

        let images = self.images.lock();
        match images.get(&side) {
            Some(outcome) => outcome.produce(),
            None => Err(Error::NoImageData),
        }
    }
}
