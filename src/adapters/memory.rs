use crate::domain::model::InboundPayload;
use crate::domain::ports::Publisher;
use crate::utils::error::{FootprintError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Broker stand-in for `--offline` runs and tests. Publishes are recorded,
/// inbound payloads are injected by hand.
#[derive(Debug, Clone)]
pub struct MemoryBroker {
    published: Arc<Mutex<Vec<(String, String)>>>,
    available: Arc<AtomicBool>,
    inbound: mpsc::Sender<InboundPayload>,
}

impl MemoryBroker {
    pub fn new(inbound: mpsc::Sender<InboundPayload>) -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            available: Arc::new(AtomicBool::new(true)),
            inbound,
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// `(topic, payload)` pairs in publish order.
    pub fn published(&self) -> Vec<(String, String)> {
        self.published
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub async fn inject(&self, topic: &str, payload: &str) -> Result<()> {
        self.inbound
            .send(InboundPayload::new(topic, payload))
            .await
            .map_err(|_| FootprintError::ChannelUnavailable {
                message: "average listener has stopped".to_string(),
            })
    }
}

#[async_trait]
impl Publisher for MemoryBroker {
    async fn publish(&self, topic: &str, payload: &str) -> Result<()> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(FootprintError::ChannelUnavailable {
                message: "in-memory broker marked unavailable".to_string(),
            });
        }

        let mut published = self
            .published
            .lock()
            .map_err(|_| FootprintError::ChannelUnavailable {
                message: "publish log poisoned".to_string(),
            })?;
        published.push((topic.to_string(), payload.to_string()));
        tracing::debug!("Recorded offline publish on {}", topic);
        Ok(())
    }
}
