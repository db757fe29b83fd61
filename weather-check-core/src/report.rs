use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::scenario::{Outcome, ScenarioResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

/// Outcome of one suite run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub summary: Summary,
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn new(started_at: DateTime<Utc>, base_url: impl Into<String>, results: Vec<ScenarioResult>) -> Self {
        let mut summary = Summary::default();
        for result in &results {
            match result.outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::Failed(_) => summary.failed += 1,
                Outcome::Skipped(_) => summary.skipped += 1,
            }
        }

        Self { started_at, base_url: base_url.into(), summary, results }
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One line per scenario plus a totals line.
    pub fn render_human(&self) -> String {
        let mut out = String::new();
        for result in &self.results {
            out.push_str(&format!(
                "{:<4} {:<34} {:>6} ms",
                result.outcome.label(),
                result.id.as_str(),
                result.duration.as_millis()
            ));
            match &result.outcome {
                Outcome::Failed(reason) | Outcome::Skipped(reason) => {
                    out.push_str("\n       ");
                    out.push_str(reason);
                }
                Outcome::Passed => {}
            }
            out.push('\n');
        }

        let s = &self.summary;
        out.push_str(&format!(
            "\n{} scenarios against {}: {} passed, {} failed, {} skipped\n",
            s.total(),
            self.base_url,
            s.passed,
            s.failed,
            s.skipped
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioId;
    use std::time::Duration;

    fn result(id: ScenarioId, outcome: Outcome) -> ScenarioResult {
        ScenarioResult { id, outcome, duration: Duration::from_millis(42) }
    }

    fn sample() -> SuiteReport {
        SuiteReport::new(
            Utc::now(),
            "https://api.openweathermap.org/data/2.5",
            vec![
                result(ScenarioId::AuthInvalidKey, Outcome::Passed),
                result(ScenarioId::WeatherUnknownCity, Outcome::Failed("Expected status 404, got 200".into())),
                result(ScenarioId::ForecastFiveDay, Outcome::Skipped("No API key available.".into())),
            ],
        )
    }

    #[test]
    fn summary_counts_outcomes() {
        let report = sample();
        assert_eq!(report.summary, Summary { passed: 1, failed: 1, skipped: 1 });
        assert_eq!(report.summary.total(), 3);
        assert!(report.has_failures());
    }

    #[test]
    fn empty_report_has_no_failures() {
        let report = SuiteReport::new(Utc::now(), "http://localhost", Vec::new());
        assert!(!report.has_failures());
        assert_eq!(report.summary.total(), 0);
    }

    #[test]
    fn human_output_lists_reasons() {
        let text = sample().render_human();
        assert!(text.contains("PASS auth_invalid_key"));
        assert!(text.contains("FAIL weather_unknown_city"));
        assert!(text.contains("Expected status 404, got 200"));
        assert!(text.contains("SKIP forecast_five_day"));
        assert!(text.contains("3 scenarios against https://api.openweathermap.org/data/2.5: 1 passed, 1 failed, 1 skipped"));
    }

    #[test]
    fn json_output() {
        let json: serde_json::Value =
            serde_json::from_str(&sample().to_json().expect("serialize")).expect("valid json");
        assert_eq!(json["summary"]["failed"], 1);
        assert_eq!(json["results"][0]["id"], "auth_invalid_key");
        assert_eq!(json["results"][0]["duration"], 42);
        assert_eq!(json["results"][1]["outcome"]["status"], "failed");
    }
}
