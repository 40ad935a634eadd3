use thiserror::Error;

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {:?}: {}", self.field, self.value, self.reason)
    }
}

#[derive(Error, Debug)]
pub enum FootprintError {
    #[error("Invalid input in {}", join_fields(.fields))]
    InvalidInput { fields: Vec<FieldError> },

    #[error("Channel unavailable: {message}")]
    ChannelUnavailable { message: String },

    #[error("Malformed inbound payload {payload:?}: {reason}")]
    MalformedInboundPayload { payload: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value:?}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Transport,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FootprintError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::ChannelUnavailable { .. } | Self::MalformedInboundPayload { .. } => {
                ErrorCategory::Transport
            }
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } | Self::TomlError(_) => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // the inbound listener drops these and keeps going
            Self::MalformedInboundPayload { .. } => ErrorSeverity::Low,
            Self::InvalidInput { .. } | Self::ChannelUnavailable { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } | Self::TomlError(_) => {
                ErrorSeverity::High
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { fields } => {
                let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                format!(
                    "Please enter whole, non-negative numbers for: {}",
                    names.join(", ")
                )
            }
            Self::ChannelUnavailable { .. } => {
                "The message broker is not reachable; your footprint was not reported".to_string()
            }
            Self::MalformedInboundPayload { payload, .. } => {
                format!("Ignored an unreadable global average: {:?}", payload)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::TomlError(_) => "The configuration file could not be parsed".to_string(),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::SerializationError(_) => "Could not render the result".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "Correct the listed fields and submit again",
            Self::ChannelUnavailable { .. } => {
                "Check the broker address or run with --offline"
            }
            Self::MalformedInboundPayload { .. } => {
                "Check the service publishing to the average topic"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } | Self::TomlError(_) => {
                "Fix the configuration file or command-line flags"
            }
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => "Run again without --json",
        }
    }
}

pub type Result<T> = std::result::Result<T, FootprintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_names_every_field() {
        let err = FootprintError::InvalidInput {
            fields: vec![
                FieldError {
                    field: "beef".to_string(),
                    value: "abc".to_string(),
                    reason: "not a whole number".to_string(),
                },
                FieldError {
                    field: "car".to_string(),
                    value: "-3".to_string(),
                    reason: "must not be negative".to_string(),
                },
            ],
        };

        let text = err.to_string();
        assert!(text.contains("beef"));
        assert!(text.contains("car"));
        assert!(err.user_friendly_message().contains("beef, car"));
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn severity_ordering() {
        let low = FootprintError::MalformedInboundPayload {
            payload: "x".to_string(),
            reason: "nope".to_string(),
        };
        let high = FootprintError::ConfigError {
            message: "bad".to_string(),
        };
        assert!(low.severity() < high.severity());
    }
}
