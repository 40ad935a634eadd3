use crate::domain::model::InboundPayload;
use crate::utils::error::{FootprintError, Result};
use serde::Serialize;
use tokio::sync::{mpsc, watch};

/// Last average received from the subscription. Absent until the first
/// valid message, then only ever replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GlobalAverage(Option<f64>);

impl GlobalAverage {
    pub fn absent() -> Self {
        Self(None)
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// Two decimals, or an empty string while absent.
    pub fn display(&self) -> String {
        self.0.map(|v| format!("{:.2}", v)).unwrap_or_default()
    }

    /// Next state after an inbound payload. On error the caller keeps `self`.
    pub fn apply(&self, payload: &[u8]) -> Result<GlobalAverage> {
        let malformed = |reason: String| FootprintError::MalformedInboundPayload {
            payload: String::from_utf8_lossy(payload).into_owned(),
            reason,
        };

        let text = std::str::from_utf8(payload)
            .map_err(|e| malformed(format!("not UTF-8: {}", e)))?
            .trim();
        let value = text
            .parse::<f64>()
            .map_err(|e| malformed(format!("not a number: {}", e)))?;
        if !value.is_finite() {
            return Err(malformed("not a finite number".to_string()));
        }

        Ok(GlobalAverage(Some(value)))
    }
}

/// Receiver side of the subscription. Owns the only writer of the shared
/// average; everyone else holds a `watch::Receiver`.
pub struct AverageListener {
    inbound: mpsc::Receiver<InboundPayload>,
    state: watch::Sender<GlobalAverage>,
}

impl AverageListener {
    pub fn new(inbound: mpsc::Receiver<InboundPayload>) -> (Self, watch::Receiver<GlobalAverage>) {
        let (state, rx) = watch::channel(GlobalAverage::absent());
        (Self { inbound, state }, rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<GlobalAverage> {
        self.state.subscribe()
    }

    /// Runs until every inbound sender is dropped.
    pub async fn run(mut self) {
        while let Some(message) = self.inbound.recv().await {
            self.handle(&message);
        }
        tracing::debug!("Inbound channel closed, average listener stopping");
    }

    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    fn handle(&self, message: &InboundPayload) {
        let current = *self.state.borrow();
        match current.apply(&message.payload) {
            Ok(next) => {
                tracing::info!(
                    "📥 Global average updated from {}: {}",
                    message.topic,
                    next.display()
                );
                // send_replace succeeds even with no receivers left
                self.state.send_replace(next);
            }
            Err(e) => {
                tracing::warn!("Dropped inbound message on {}: {}", message.topic, e);
            }
        }
    }
}
