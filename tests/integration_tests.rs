use anyhow::Result;
use footprint_reporter::core::message::OutboundMessage;
use footprint_reporter::{
    AverageListener, Category, FootprintError, FootprintReporter, MemoryBroker, RawForm, Verdict,
};
use std::time::Duration;
use tokio::sync::mpsc;

const PUBLISH_TOPIC: &str = "footprint/userdata";
const AVERAGE_TOPIC: &str = "footprint/average";

fn setup() -> (MemoryBroker, FootprintReporter<MemoryBroker>) {
    let (tx, rx) = mpsc::channel(16);
    let (listener, average) = AverageListener::new(rx);
    listener.spawn();
    let broker = MemoryBroker::new(tx);
    let reporter = FootprintReporter::new(broker.clone(), PUBLISH_TOPIC, average);
    (broker, reporter)
}

fn beef_and_pork() -> RawForm {
    RawForm::filled("0")
        .with(Category::Beef, "100")
        .with(Category::Pork, "200")
}

#[tokio::test]
async fn test_submit_publishes_formatted_message() -> Result<()> {
    let (broker, reporter) = setup();

    let submission = reporter.submit_at(&beef_and_pork(), 1700000000000).await?;

    assert_eq!(submission.total.grams(), 3072.0);
    assert!(submission.published);
    assert_eq!(submission.message.as_str(), "1700000000000_3072.0");
    assert_eq!(submission.verdict, Verdict::FirstToReport);
    assert_eq!(
        broker.published(),
        vec![(PUBLISH_TOPIC.to_string(), "1700000000000_3072.0".to_string())]
    );

    let parsed = OutboundMessage::parse(&broker.published()[0].1).unwrap();
    assert_eq!(parsed.timestamp_ms(), 1700000000000);
    assert_eq!(parsed.total(), 3072.0);
    Ok(())
}

#[tokio::test]
async fn test_average_received_then_compared() -> Result<()> {
    let (broker, mut reporter) = setup();

    broker.inject(AVERAGE_TOPIC, "250.5").await?;
    let average = tokio::time::timeout(Duration::from_secs(5), reporter.wait_for_average()).await?;
    assert_eq!(average.value(), Some(250.5));
    assert_eq!(average.display(), "250.50");

    // 3072 g is well above 250.5 g
    let above = reporter.submit_at(&beef_and_pork(), 1).await?;
    assert_eq!(above.verdict, Verdict::AboveAverage(250.5));
    assert!(above.verdict_text().contains("250.50"));

    let below = reporter.submit_at(&RawForm::filled("0"), 2).await?;
    assert_eq!(below.verdict, Verdict::BelowAverage(250.5));
    Ok(())
}

async fn wait_until_average<P: footprint_reporter::domain::ports::Publisher>(
    reporter: &FootprintReporter<P>,
    expected: f64,
) -> bool {
    for _ in 0..200 {
        if reporter.current_average().value() == Some(expected) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test]
async fn test_latest_average_wins() -> Result<()> {
    let (broker, reporter) = setup();

    broker.inject(AVERAGE_TOPIC, "10").await?;
    broker.inject(AVERAGE_TOPIC, "not-a-number").await?;
    broker.inject(AVERAGE_TOPIC, "3072.0").await?;

    assert!(wait_until_average(&reporter, 3072.0).await);

    let same = reporter.submit_at(&beef_and_pork(), 3).await?;
    assert_eq!(same.verdict, Verdict::MatchesAverage(3072.0));
    Ok(())
}

#[tokio::test]
async fn test_malformed_average_keeps_previous() -> Result<()> {
    let (broker, reporter) = setup();

    broker.inject(AVERAGE_TOPIC, "120.25").await?;
    assert!(wait_until_average(&reporter, 120.25).await);

    broker.inject(AVERAGE_TOPIC, "garbage").await?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(reporter.current_average().value(), Some(120.25));
    Ok(())
}

#[tokio::test]
async fn test_invalid_input_publishes_nothing() -> Result<()> {
    let (broker, reporter) = setup();
    broker.inject(AVERAGE_TOPIC, "99.0").await?;

    let form = RawForm::filled("0")
        .with(Category::Chicken, "abc")
        .with(Category::Plane, "-10");

    assert!(wait_until_average(&reporter, 99.0).await);

    match reporter.submit_at(&form, 4).await {
        Err(FootprintError::InvalidInput { fields }) => {
            let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
            assert_eq!(names, vec!["chicken", "plane"]);
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    assert!(broker.published().is_empty());
    assert_eq!(reporter.current_average().value(), Some(99.0));
    Ok(())
}

#[tokio::test]
async fn test_unavailable_channel_does_not_abort_submission() -> Result<()> {
    let (broker, reporter) = setup();
    broker.set_available(false);

    let submission = reporter.submit_at(&beef_and_pork(), 5).await?;
    assert!(!submission.published);
    assert_eq!(submission.total.grams(), 3072.0);
    assert_eq!(submission.verdict, Verdict::FirstToReport);
    assert!(broker.published().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_submission_serializes_to_json() -> Result<()> {
    let (_broker, reporter) = setup();
    let submission = reporter.submit_at(&beef_and_pork(), 1700000000000).await?;

    let json = serde_json::to_value(&submission)?;
    assert_eq!(json["message"], "1700000000000_3072.0");
    assert_eq!(json["total"], 3072.0);
    assert_eq!(json["published"], true);
    assert_eq!(json["verdict"]["verdict"], "first_to_report");
    assert!(json["average"].is_null());
    Ok(())
}
