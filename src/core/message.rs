use serde::Serialize;
use std::fmt;

/// Payload sent to the publish topic: `<epoch-millis>_<total>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "String")]
pub struct OutboundMessage {
    timestamp_ms: i64,
    total: f64,
    text: String,
}

/// `{:?}` is the shortest representation that parses back to the same f64,
/// and it keeps the trailing `.0` on whole numbers.
pub fn format(timestamp_ms: i64, total: f64) -> String {
    format!("{}_{:?}", timestamp_ms, total)
}

impl OutboundMessage {
    pub fn new(timestamp_ms: i64, total: f64) -> Self {
        Self {
            timestamp_ms,
            total,
            text: format(timestamp_ms, total),
        }
    }

    /// Splits on the first underscore.
    pub fn parse(text: &str) -> Option<Self> {
        let (ts, total) = text.split_once('_')?;
        let timestamp_ms = ts.parse::<i64>().ok()?;
        let total = total.parse::<f64>().ok()?;
        Some(Self {
            timestamp_ms,
            total,
            text: text.to_string(),
        })
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<OutboundMessage> for String {
    fn from(message: OutboundMessage) -> Self {
        message.text
    }
}
