//! Exactly-once reply handle for a dispatched request.

use serde_json::Value;

use super::types::{Outcome, ResponseError};

type Callback = Box<dyn FnOnce(Outcome) + Send>;

/// Delivers the single reply for one request.
///
/// Answering consumes the responder, so a request cannot be answered twice.
/// A responder dropped unanswered replies with an internal error, so a request
/// is never left without a reply either.
pub struct Responder {
    callback: Option<Callback>,
}

impl Responder {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    pub fn respond(mut self, outcome: Outcome) {
        if let Some(callback) = self.callback.take() {
            callback(outcome);
        }
    }

    pub fn ok(self, value: Value) {
        self.respond(Ok(value));
    }

    pub fn err(self, error: ResponseError) {
        self.respond(Err(error));
    }
}

impl Drop for Responder {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            tracing::warn!("request dropped without a reply");
            callback(Err(ResponseError::internal("request dropped without a reply")));
        }
    }
}
