use crate::utils::error::Result;
use async_trait::async_trait;

/// Outbound side of the broker. Implementations must not wait on the
/// network: failures are returned, the caller logs them and moves on.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn broker_uri(&self) -> &str;
    fn client_id(&self) -> &str;
    fn publish_topic(&self) -> &str;
    fn subscribe_topic(&self) -> &str;
    fn keep_alive_seconds(&self) -> u64;
    fn average_wait_ms(&self) -> u64;
}

#[async_trait]
impl<P: Publisher + ?Sized> Publisher for std::sync::Arc<P> {
    async fn publish(&self, topic: &str, payload: &str) -> Result<()> {
        (**self).publish(topic, payload).await
    }
}
