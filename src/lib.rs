pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "mqtt")]
pub use adapters::MqttBroker;

pub use adapters::MemoryBroker;
pub use config::toml_config::{ResolvedConfig, TomlConfig};
pub use core::average::{AverageListener, GlobalAverage};
pub use core::comparator::{compare, Verdict};
pub use core::reporter::{FootprintReporter, Submission};
pub use domain::model::{Category, ConsumptionInput, RawForm};
pub use utils::error::{FootprintError, Result};
