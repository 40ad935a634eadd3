use serde::Serialize;
use std::fmt;

/// How a submitted footprint relates to today's global average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", content = "average", rename_all = "snake_case")]
pub enum Verdict {
    FirstToReport,
    BelowAverage(f64),
    AboveAverage(f64),
    MatchesAverage(f64),
}

/// Exact float comparison: a total one ulp away from the average is not a match.
pub fn compare(total: f64, average: Option<f64>) -> Verdict {
    match average {
        None => Verdict::FirstToReport,
        Some(avg) if total < avg => Verdict::BelowAverage(avg),
        Some(avg) if total > avg => Verdict::AboveAverage(avg),
        Some(avg) => Verdict::MatchesAverage(avg),
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::FirstToReport => {
                write!(f, "You are the first to report your footprint today.")
            }
            Verdict::BelowAverage(avg) => write!(
                f,
                "The global average for today is {:.2} g CO2. Your consumption is below average, well done!",
                avg
            ),
            Verdict::AboveAverage(avg) => write!(
                f,
                "The global average for today is {:.2} g CO2. Your consumption is above average, try to reduce it tomorrow.",
                avg
            ),
            Verdict::MatchesAverage(avg) => write!(
                f,
                "Your consumption exactly matches today's global average of {:.2} g CO2.",
                avg
            ),
        }
    }
}
