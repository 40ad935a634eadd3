use crate::core::average::GlobalAverage;
use crate::core::reporter::{FootprintReporter, Submission};
use crate::domain::model::{Category, RawForm};
use crate::domain::ports::Publisher;
use crate::utils::error::{FootprintError, Result};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One submission from command-line values. Waits up to `wait` for the
/// first average so a freshly started process has something to compare to.
pub async fn run_once<P: Publisher>(
    reporter: &mut FootprintReporter<P>,
    form: &RawForm,
    wait: Duration,
) -> Result<Submission> {
    if !wait.is_zero() && !reporter.current_average().is_present() {
        match tokio::time::timeout(wait, reporter.wait_for_average()).await {
            Ok(avg) => tracing::debug!("Average available: {}", avg.display()),
            Err(_) => tracing::debug!("No average received within {:?}", wait),
        }
    }
    reporter.submit(form).await
}

pub fn render_average(average: &GlobalAverage) -> String {
    format!("Global average for today: {}", average.display())
}

pub fn render_submission(submission: &Submission) -> String {
    let mut lines = vec![format!("Footprint: {} g CO2", submission.total.grams())];
    if submission.published {
        lines.push(format!("Message sent: {}", submission.message));
    } else {
        lines.push(format!("Message not sent: {}", submission.message));
    }
    if submission.average.is_present() {
        lines.push(render_average(&submission.average));
    }
    lines.push(submission.verdict_text());
    lines.join("\n")
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "q" | "quit" | "exit")
}

/// Prompt loop standing in for the input form. Returns how many forms were
/// submitted successfully once the input ends or the user quits.
pub async fn run_interactive<P, R, W>(
    reporter: &FootprintReporter<P>,
    input: R,
    out: &mut W,
) -> Result<usize>
where
    P: Publisher,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut submitted = 0;

    'form: loop {
        writeln!(out, "\n{}", render_average(&reporter.current_average()))?;
        writeln!(out, "Enter your consumption for the day (q to quit):")?;

        let mut form = RawForm::new();
        for category in Category::ALL {
            write!(out, "  {} ({}): ", category.label(), category.unit().symbol())?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break 'form;
            };
            if is_quit(&line) {
                break 'form;
            }
            form.set(category, line);
        }

        match reporter.submit(&form).await {
            Ok(submission) => {
                submitted += 1;
                writeln!(out, "{}", render_submission(&submission))?;
            }
            Err(e @ FootprintError::InvalidInput { .. }) => {
                tracing::warn!("Submission rejected: {}", e);
                writeln!(out, "❌ {}", e.user_friendly_message())?;
                if let FootprintError::InvalidInput { fields } = &e {
                    for field in fields {
                        writeln!(out, "   {}", field)?;
                    }
                }
            }
            Err(e) => return Err(e),
        }
    }

    Ok(submitted)
}
