use anyhow::Result;
use footprint_reporter::app::session::{render_submission, run_interactive, run_once};
use footprint_reporter::{AverageListener, Category, FootprintReporter, MemoryBroker, RawForm};
use std::time::Duration;
use tokio::sync::mpsc;

fn setup() -> (MemoryBroker, FootprintReporter<MemoryBroker>) {
    let (tx, rx) = mpsc::channel(16);
    let (listener, average) = AverageListener::new(rx);
    listener.spawn();
    let broker = MemoryBroker::new(tx);
    let reporter = FootprintReporter::new(broker.clone(), "footprint/userdata", average);
    (broker, reporter)
}

/// 十個欄位一行一個
fn form_lines(values: [&str; 10]) -> String {
    values.iter().map(|v| format!("{}\n", v)).collect()
}

#[tokio::test]
async fn test_run_once_waits_for_first_average() -> Result<()> {
    let (broker, mut reporter) = setup();

    let injector = broker.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        injector.inject("footprint/average", "5000").await
    });

    let form = RawForm::filled("0").with(Category::Beef, "1000");
    let submission = run_once(&mut reporter, &form, Duration::from_secs(5)).await?;

    assert_eq!(submission.total.grams(), 16880.0);
    assert_eq!(submission.average.value(), Some(5000.0));
    let text = render_submission(&submission);
    assert!(text.contains("Footprint: 16880 g CO2"));
    assert!(text.contains("Global average for today: 5000.00"));
    assert!(text.contains("above average"));
    Ok(())
}

#[tokio::test]
async fn test_run_once_gives_up_waiting() -> Result<()> {
    let (_broker, mut reporter) = setup();

    let submission = run_once(&mut reporter, &RawForm::filled("0"), Duration::from_millis(20)).await?;
    assert_eq!(submission.total.grams(), 0.0);
    assert!(!submission.average.is_present());
    assert!(render_submission(&submission).contains("first to report"));
    Ok(())
}

#[tokio::test]
async fn test_interactive_session_reprompts_after_invalid_form() -> Result<()> {
    let (broker, reporter) = setup();

    let mut script = form_lines(["abc", "0", "0", "0", "0", "0", "0", "0", "0", "0"]);
    script.push_str(&form_lines(["100", "200", "0", "0", "0", "0", "0", "0", "0", "0"]));
    script.push_str("q\n");

    let mut out = Vec::new();
    let submitted = run_interactive(&reporter, script.as_bytes(), &mut out).await?;
    let printed = String::from_utf8(out)?;

    assert_eq!(submitted, 1);
    assert!(printed.contains("Please enter whole, non-negative numbers for: beef"));
    assert!(printed.contains("Footprint: 3072 g CO2"));
    assert!(printed.contains("Beef (g): "));
    assert!(printed.contains("Appliance use (uses): "));

    let published = broker.published();
    assert_eq!(published.len(), 1);
    assert!(published[0].1.ends_with("_3072.0"));
    Ok(())
}

#[tokio::test]
async fn test_interactive_session_stops_on_eof_mid_form() -> Result<()> {
    let (broker, reporter) = setup();

    let mut out = Vec::new();
    let submitted = run_interactive(&reporter, "1\n2\n".as_bytes(), &mut out).await?;

    assert_eq!(submitted, 0);
    assert!(broker.published().is_empty());
    Ok(())
}
