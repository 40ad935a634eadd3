use clap::Parser;
use footprint_reporter::app::session;
use footprint_reporter::config::LogFormat;
use footprint_reporter::core::ConfigProvider;
use footprint_reporter::domain::ports::Publisher;
use footprint_reporter::utils::error::{ErrorSeverity, FootprintError};
use footprint_reporter::utils::{logger, validation::Validate};
use footprint_reporter::{
    AverageListener, CliConfig, FootprintReporter, MemoryBroker, MqttBroker, ResolvedConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const INBOUND_CAPACITY: usize = 32;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Text => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting footprint-reporter");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_CAPACITY);
    let (listener, average) = AverageListener::new(inbound_rx);
    let listener_handle = listener.spawn();

    let publisher: Arc<dyn Publisher> = if cli.offline {
        tracing::info!("Offline mode: messages are kept in memory, not sent");
        Arc::new(MemoryBroker::new(inbound_tx))
    } else {
        match MqttBroker::connect(&config, inbound_tx).await {
            Ok((broker, _eventloop)) => Arc::new(broker),
            Err(e) => exit_with(&e),
        }
    };

    let mut reporter = FootprintReporter::new(publisher, config.publish_topic(), average);

    let outcome = if cli.interactive {
        run_interactive(&reporter).await
    } else {
        run_once(&mut reporter, &cli, &config).await
    };

    drop(reporter);
    listener_handle.abort();

    if let Err(e) = outcome {
        exit_with(&e);
    }
    Ok(())
}

async fn run_once(
    reporter: &mut FootprintReporter<Arc<dyn Publisher>>,
    cli: &CliConfig,
    config: &ResolvedConfig,
) -> Result<(), FootprintError> {
    let wait = Duration::from_millis(config.average_wait_ms());
    let submission = session::run_once(reporter, &cli.raw_form(), wait).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&submission)?);
    } else {
        println!("{}", session::render_submission(&submission));
    }
    Ok(())
}

async fn run_interactive(
    reporter: &FootprintReporter<Arc<dyn Publisher>>,
) -> Result<(), FootprintError> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let submitted = session::run_interactive(reporter, stdin, &mut stdout).await?;
    tracing::info!("Session ended after {} submission(s)", submitted);
    Ok(())
}

fn exit_with(e: &FootprintError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
