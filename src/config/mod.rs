pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{Category, RawForm};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use toml_config::{ResolvedConfig, TomlConfig};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "footprint-reporter")]
#[command(about = "Estimate your daily CO2 footprint and report it to the broker")]
pub struct CliConfig {
    #[arg(long, default_value = "0", help = "Beef eaten (g)")]
    pub beef: String,

    #[arg(long, default_value = "0", help = "Pork eaten (g)")]
    pub pork: String,

    #[arg(long, default_value = "0", help = "Chicken eaten (g)")]
    pub chicken: String,

    #[arg(long, default_value = "0", help = "Fish eaten (g)")]
    pub fish: String,

    #[arg(long, default_value = "0", help = "Butter eaten (g)")]
    pub butter: String,

    #[arg(long, default_value = "0", help = "Other dairy eaten (g)")]
    pub dairy: String,

    #[arg(long, default_value = "0", help = "Distance by car (km)")]
    pub car: String,

    #[arg(long, default_value = "0", help = "Distance by public transport (km)")]
    pub public_transport: String,

    #[arg(long, default_value = "0", help = "Distance by plane (km)")]
    pub plane: String,

    #[arg(long, default_value = "0", help = "Appliance uses")]
    pub appliances: String,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Broker URI, e.g. tcp://localhost:1883")]
    pub broker: Option<String>,

    #[arg(long)]
    pub client_id: Option<String>,

    #[arg(long)]
    pub publish_topic: Option<String>,

    #[arg(long)]
    pub subscribe_topic: Option<String>,

    #[arg(long, help = "Milliseconds to wait for a first global average")]
    pub average_wait_ms: Option<u64>,

    #[arg(long, short, help = "Prompt for consumption repeatedly")]
    pub interactive: bool,

    #[arg(long, help = "Do not connect to a broker")]
    pub offline: bool,

    #[arg(long, help = "Print the submission as JSON")]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// The consumption flags as an unvalidated form.
    pub fn raw_form(&self) -> RawForm {
        RawForm::new()
            .with(Category::Beef, self.beef.as_str())
            .with(Category::Pork, self.pork.as_str())
            .with(Category::Chicken, self.chicken.as_str())
            .with(Category::Fish, self.fish.as_str())
            .with(Category::Butter, self.butter.as_str())
            .with(Category::Dairy, self.dairy.as_str())
            .with(Category::Car, self.car.as_str())
            .with(Category::PublicTransport, self.public_transport.as_str())
            .with(Category::Plane, self.plane.as_str())
            .with(Category::Appliances, self.appliances.as_str())
    }

    /// File settings (or defaults) with command-line overrides on top.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let mut file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        if let Some(uri) = &self.broker {
            file.broker.uri = uri.clone();
        }
        if let Some(id) = &self.client_id {
            file.broker.client_id = Some(id.clone());
        }
        if let Some(topic) = &self.publish_topic {
            file.topics.publish = topic.clone();
        }
        if let Some(topic) = &self.subscribe_topic {
            file.topics.subscribe = topic.clone();
        }
        if let Some(wait) = self.average_wait_ms {
            file.session.average_wait_ms = wait;
        }

        Ok(ResolvedConfig::from(file))
    }
}
