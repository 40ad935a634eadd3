// Adapters layer: concrete implementations of the broker port.

pub mod memory;
#[cfg(feature = "mqtt")]
pub mod mqtt;

pub use memory::MemoryBroker;
#[cfg(feature = "mqtt")]
pub use mqtt::MqttBroker;
