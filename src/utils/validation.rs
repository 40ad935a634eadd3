use crate::utils::error::{FootprintError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Broker URIs look like `tcp://host:1883`; `mqtt://` is accepted as an alias.
pub fn validate_broker_uri(field_name: &str, uri: &str) -> Result<Url> {
    if uri.is_empty() {
        return Err(FootprintError::InvalidConfigValue {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: "URI cannot be empty".to_string(),
        });
    }

    let url = Url::parse(uri).map_err(|e| FootprintError::InvalidConfigValue {
        field: field_name.to_string(),
        value: uri.to_string(),
        reason: format!("Invalid URI format: {}", e),
    })?;

    match url.scheme() {
        "tcp" | "mqtt" => {}
        scheme => {
            return Err(FootprintError::InvalidConfigValue {
                field: field_name.to_string(),
                value: uri.to_string(),
                reason: format!("Unsupported URI scheme: {}", scheme),
            })
        }
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(FootprintError::InvalidConfigValue {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: "URI has no host".to_string(),
        });
    }

    Ok(url)
}

/// Topic names for publishing: non-empty, no wildcards, no NUL.
pub fn validate_publish_topic(field_name: &str, topic: &str) -> Result<()> {
    validate_non_empty_string(field_name, topic)?;
    if topic.contains(['+', '#', '\0']) {
        return Err(FootprintError::InvalidConfigValue {
            field: field_name.to_string(),
            value: topic.to_string(),
            reason: "Publish topics cannot contain wildcards or null bytes".to_string(),
        });
    }
    Ok(())
}

/// Subscription filters may use `+` and a trailing `#`.
pub fn validate_topic_filter(field_name: &str, filter: &str) -> Result<()> {
    validate_non_empty_string(field_name, filter)?;
    let levels: Vec<&str> = filter.split('/').collect();
    for (i, level) in levels.iter().enumerate() {
        let bad_hash = level.contains('#') && (*level != "#" || i != levels.len() - 1);
        let bad_plus = level.contains('+') && *level != "+";
        if bad_hash || bad_plus || level.contains('\0') {
            return Err(FootprintError::InvalidConfigValue {
                field: field_name.to_string(),
                value: filter.to_string(),
                reason: format!("Invalid topic level: {:?}", level),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FootprintError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FootprintError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_broker_uri() {
        assert!(validate_broker_uri("broker.uri", "tcp://192.168.56.1:1883").is_ok());
        assert!(validate_broker_uri("broker.uri", "mqtt://localhost").is_ok());
        assert!(validate_broker_uri("broker.uri", "").is_err());
        assert!(validate_broker_uri("broker.uri", "not a uri").is_err());
        assert!(validate_broker_uri("broker.uri", "http://example.com").is_err());
    }

    #[test]
    fn test_validate_topics() {
        assert!(validate_publish_topic("topics.publish", "footprint/userdata").is_ok());
        assert!(validate_publish_topic("topics.publish", "footprint/#").is_err());
        assert!(validate_publish_topic("topics.publish", "  ").is_err());

        assert!(validate_topic_filter("topics.subscribe", "footprint/average").is_ok());
        assert!(validate_topic_filter("topics.subscribe", "footprint/+/avg").is_ok());
        assert!(validate_topic_filter("topics.subscribe", "footprint/#").is_ok());
        assert!(validate_topic_filter("topics.subscribe", "footprint/#/x").is_err());
        assert!(validate_topic_filter("topics.subscribe", "foot+print").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("broker.keep_alive_seconds", 30u64, 5, 3600).is_ok());
        assert!(validate_range("broker.keep_alive_seconds", 1u64, 5, 3600).is_err());
    }
}
