use crate::domain::model::InboundPayload;
use crate::domain::ports::{ConfigProvider, Publisher};
use crate::utils::error::{FootprintError, Result};
use crate::utils::validation::validate_broker_uri;
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const DEFAULT_PORT: u16 = 1883;
const REQUEST_CAPACITY: usize = 10;

/// MQTT side of the reporter. Publishing only queues the packet for the
/// event loop task; it never waits on the socket.
#[derive(Clone)]
pub struct MqttBroker {
    client: AsyncClient,
}

impl MqttBroker {
    /// Queues the subscription and starts the event loop. Connection
    /// failures show up in the log from the spawned task, not here.
    pub async fn connect<C: ConfigProvider>(
        config: &C,
        inbound: mpsc::Sender<InboundPayload>,
    ) -> Result<(Self, JoinHandle<()>)> {
        let url = validate_broker_uri("broker_uri", config.broker_uri())?;
        let host = url.host_str().unwrap_or_default().to_string();
        let port = url.port().unwrap_or(DEFAULT_PORT);
        // MqttOptions::new panics on these
        if config.client_id().is_empty() || config.client_id().starts_with(' ') {
            return Err(FootprintError::InvalidConfigValue {
                field: "client_id".to_string(),
                value: config.client_id().to_string(),
                reason: "Client id must be non-empty and not start with a space".to_string(),
            });
        }

        let mut options = MqttOptions::new(config.client_id(), host.clone(), port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_seconds()));
        options.set_clean_session(true);

        let (client, eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);
        client
            .subscribe(config.subscribe_topic(), QoS::AtLeastOnce)
            .await
            .map_err(unavailable)?;

        tracing::info!(
            "🔌 Connecting to {}:{} as {}, subscribed to {}",
            host,
            port,
            config.client_id(),
            config.subscribe_topic()
        );

        let handle = tokio::spawn(drive(eventloop, inbound));
        Ok((Self { client }, handle))
    }

    pub async fn disconnect(&self) -> Result<()> {
        self.client.disconnect().await.map_err(unavailable)
    }
}

fn unavailable(e: rumqttc::ClientError) -> FootprintError {
    FootprintError::ChannelUnavailable {
        message: e.to_string(),
    }
}

/// Polls until the connection fails or the listener goes away. A lost
/// connection ends the session's broker traffic; it is not retried.
async fn drive(mut eventloop: EventLoop, inbound: mpsc::Sender<InboundPayload>) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                tracing::info!("✅ Broker accepted connection ({:?})", ack.code);
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                tracing::debug!(
                    "Inbound message on {} ({} bytes)",
                    publish.topic,
                    publish.payload.len()
                );
                let message = InboundPayload::new(publish.topic, publish.payload.to_vec());
                if inbound.send(message).await.is_err() {
                    tracing::debug!("Average listener gone, stopping MQTT event loop");
                    break;
                }
            }
            Ok(Event::Incoming(Packet::Disconnect)) => {
                tracing::warn!("Broker closed the session");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("❌ No connection to broker: {}", e);
                tracing::error!("💡 Suggestion: check the broker URI or run with --offline");
                break;
            }
        }
    }
}

#[async_trait]
impl Publisher for MqttBroker {
    async fn publish(&self, topic: &str, payload: &str) -> Result<()> {
        self.client
            .try_publish(topic, QoS::AtLeastOnce, false, payload.as_bytes().to_vec())
            .map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::{ResolvedConfig, TomlConfig};

    #[tokio::test]
    async fn test_rejects_bad_uri_before_connecting() {
        let mut config = ResolvedConfig::from(TomlConfig::default());
        config.broker_uri = "http://example.com".to_string();

        let (tx, _rx) = mpsc::channel(1);
        let err = MqttBroker::connect(&config, tx).await.err().unwrap();
        assert!(matches!(err, FootprintError::InvalidConfigValue { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_broker_ends_event_loop() {
        let mut config = ResolvedConfig::from(TomlConfig::default());
        // port 1 on loopback refuses immediately
        config.broker_uri = "tcp://127.0.0.1:1".to_string();

        let (tx, _rx) = mpsc::channel(1);
        let (broker, handle) = MqttBroker::connect(&config, tx).await.unwrap();
        tokio::time::timeout(Duration::from_secs(10), handle)
            .await
            .expect("event loop should stop")
            .unwrap();

        // the loop is gone, so the request channel is closed
        assert!(broker.publish("footprint/userdata", "1_1.0").await.is_err());
    }
}
