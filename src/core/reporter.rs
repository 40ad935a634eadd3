use crate::core::average::GlobalAverage;
use crate::core::comparator::{compare, Verdict};
use crate::core::input::validate_form;
use crate::core::message::OutboundMessage;
use crate::domain::model::{ConsumptionInput, EmissionFactors, FootprintResult, RawForm};
use crate::domain::ports::Publisher;
use crate::utils::error::Result;
use serde::Serialize;
use tokio::sync::watch;

/// Everything one submit produced.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub input: ConsumptionInput,
    pub total: FootprintResult,
    pub message: OutboundMessage,
    pub published: bool,
    pub average: GlobalAverage,
    pub verdict: Verdict,
}

impl Submission {
    pub fn verdict_text(&self) -> String {
        self.verdict.to_string()
    }
}

pub struct FootprintReporter<P: Publisher> {
    publisher: P,
    topic: String,
    factors: EmissionFactors,
    average: watch::Receiver<GlobalAverage>,
}

impl<P: Publisher> FootprintReporter<P> {
    pub fn new(publisher: P, topic: impl Into<String>, average: watch::Receiver<GlobalAverage>) -> Self {
        Self {
            publisher,
            topic: topic.into(),
            factors: EmissionFactors::STANDARD,
            average,
        }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Current average as the listener last stored it.
    pub fn current_average(&self) -> GlobalAverage {
        *self.average.borrow()
    }

    /// Waits until an average is present or the receiver is closed.
    pub async fn wait_for_average(&mut self) -> GlobalAverage {
        let seen = self
            .average
            .wait_for(GlobalAverage::is_present)
            .await
            .map(|avg| *avg);
        match seen {
            Ok(avg) => avg,
            Err(_) => *self.average.borrow(),
        }
    }

    pub async fn submit(&self, form: &RawForm) -> Result<Submission> {
        self.submit_at(form, chrono::Utc::now().timestamp_millis()).await
    }

    /// Validation errors abort before anything is sent. Publish errors are
    /// logged and recorded on the submission instead.
    pub async fn submit_at(&self, form: &RawForm, timestamp_ms: i64) -> Result<Submission> {
        let input = validate_form(form)?;
        let total = self.factors.total(&input);
        tracing::debug!("Computed footprint: {:?} g CO2", total.grams());

        let message = OutboundMessage::new(timestamp_ms, total.grams());
        tracing::info!("📤 Message: {}", message);

        let published = match self.publisher.publish(&self.topic, message.as_str()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("❌ Publish to {} failed: {}", self.topic, e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                false
            }
        };

        let average = self.current_average();
        let verdict = compare(total.grams(), average.value());

        Ok(Submission {
            input,
            total,
            message,
            published,
            average,
            verdict,
        })
    }
}
