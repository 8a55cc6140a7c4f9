//! Output formatting and progress reporting

use crate::error::CliResult;
use console::{style, Style, Term};
use formprobe::{Scenario, ScenarioReport, ScenarioStatus, SuiteSummary};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output format for suite results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON summary on stdout
    Json,
}

/// One line per scenario: status marker, name, then detail if any
#[must_use]
pub fn format_report_line(report: &ScenarioReport, use_color: bool) -> String {
    let marker = match (report.status, use_color) {
        (ScenarioStatus::Passed, true) => style("✓").green().bold().to_string(),
        (ScenarioStatus::KnownBug, true) => style("⚠").yellow().bold().to_string(),
        (ScenarioStatus::Failed, true) => style("✗").red().bold().to_string(),
        (ScenarioStatus::Passed, false) => "PASS".to_string(),
        (ScenarioStatus::KnownBug, false) => "BUG ".to_string(),
        (ScenarioStatus::Failed, false) => "FAIL".to_string(),
    };
    let mut line = format!(
        "{marker} {} ({}ms)",
        report.scenario.name(),
        report.duration_ms
    );
    if let Some(detail) = &report.detail {
        line.push_str(": ");
        line.push_str(detail);
    }
    if let Some(shot) = &report.screenshot {
        line.push_str(&format!(" [screenshot: {}]", shot.display()));
    }
    line
}

/// Final tally line
#[must_use]
pub fn format_summary(summary: &SuiteSummary, use_color: bool) -> String {
    let passed = summary.count(ScenarioStatus::Passed);
    let bugs = summary.count(ScenarioStatus::KnownBug);
    let failed = summary.count(ScenarioStatus::Failed);
    let total = summary.total();
    let secs = Duration::from_millis(summary.duration_ms).as_secs_f64();

    if use_color {
        let passed_style = Style::new().green().bold();
        let failed_style = Style::new().red().bold();
        let bug_style = Style::new().yellow();
        let status = if failed > 0 {
            failed_style.apply_to("FAILED")
        } else {
            passed_style.apply_to("PASSED")
        };
        format!(
            "{status} {total} scenarios in {secs:.2}s ({} passed, {} known bugs, {} failed)",
            passed_style.apply_to(passed),
            bug_style.apply_to(bugs),
            if failed > 0 {
                failed_style.apply_to(failed).to_string()
            } else {
                failed.to_string()
            },
        )
    } else {
        let status = if failed > 0 { "FAILED" } else { "PASSED" };
        format!(
            "{status} {total} scenarios in {secs:.2}s ({passed} passed, {bugs} known bugs, {failed} failed)"
        )
    }
}

/// Pretty JSON for the whole run
pub fn render_json(summary: &SuiteSummary) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// `name  description` rows for `formprobe list`
#[must_use]
pub fn format_scenario_list(use_color: bool) -> Vec<String> {
    let width = Scenario::ALL
        .iter()
        .map(|s| s.name().len())
        .max()
        .unwrap_or_default();
    Scenario::ALL
        .iter()
        .map(|s| {
            let name = format!("{:<width$}", s.name());
            let name = if use_color {
                style(name).cyan().to_string()
            } else {
                name
            };
            format!("{name}  {}", s.description())
        })
        .collect()
}

/// Progress reporter for suite execution
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over `total` scenarios
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet || !self.term.is_term() {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Update progress message
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    /// Finish progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Print the outcome of one scenario and advance the bar
    pub fn report(&self, report: &ScenarioReport) {
        if self.quiet && !report.failed() {
            self.increment();
            return;
        }
        self.write_line(&format_report_line(report, self.use_color));
        self.increment();
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        self.write_line("");
        self.write_line(&styled);
    }

    /// Print the suite summary
    pub fn summary(&self, summary: &SuiteSummary) {
        if self.quiet && summary.all_passed() {
            return;
        }
        self.write_line("");
        self.write_line(&format_summary(summary, self.use_color));
    }

    fn increment(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
    }

    fn write_line(&self, line: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.suspend(|| {
                let _ = self.term.write_line(line);
            }),
            None => {
                let _ = self.term.write_line(line);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use formprobe::{ProbeError, ScenarioOutcome};

    fn report(
        scenario: Scenario,
        result: formprobe::ProbeResult<ScenarioOutcome>,
    ) -> ScenarioReport {
        ScenarioReport::from_result(scenario, &result, Duration::from_millis(12))
    }

    fn mixed_summary() -> SuiteSummary {
        let mut summary = SuiteSummary::default();
        summary.push(report(
            Scenario::PositiveSubmitValidData,
            Ok(ScenarioOutcome::Passed),
        ));
        summary.push(report(
            Scenario::NegativeNoAgreement,
            Ok(ScenarioOutcome::KnownBug("form submits without consent".into())),
        ));
        summary.push(report(
            Scenario::ResetForm,
            Err(ProbeError::assertion("name not cleared")),
        ));
        summary
    }

    mod format_tests {
        use super::*;

        #[test]
        fn test_default_format() {
            assert_eq!(OutputFormat::default(), OutputFormat::Text);
        }

        #[test]
        fn test_report_line_plain() {
            let summary = mixed_summary();
            assert_eq!(
                format_report_line(&summary.reports[0], false),
                "PASS positive_submit_valid_data (12ms)"
            );
            assert_eq!(
                format_report_line(&summary.reports[1], false),
                "BUG  negative_no_agreement (12ms): form submits without consent"
            );
            assert!(format_report_line(&summary.reports[2], false)
                .starts_with("FAIL reset_form (12ms): Assertion failed"));
        }

        #[test]
        fn test_summary_plain() {
            let line = format_summary(&mixed_summary(), false);
            assert!(line.starts_with("FAILED 3 scenarios"));
            assert!(line.contains("1 passed, 1 known bugs, 1 failed"));
        }

        #[test]
        fn test_render_json() {
            let json = render_json(&mixed_summary()).unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["reports"].as_array().unwrap().len(), 3);
            assert_eq!(value["reports"][1]["status"], "known_bug");
            assert_eq!(value["duration_ms"], 36);
        }

        #[test]
        fn test_scenario_list_is_aligned() {
            let rows = format_scenario_list(false);
            assert_eq!(rows.len(), 6);
            let column = rows[0].find("valid data").unwrap();
            assert!(rows.iter().all(|r| r.len() > column));
            assert!(rows[4].starts_with("message_counter "));
        }
    }

    mod progress_reporter_tests {
        use super::*;

        #[test]
        fn test_new_reporter() {
            let reporter = ProgressReporter::new(true, false);
            assert!(reporter.use_color);
            assert!(!reporter.quiet);
        }

        #[test]
        fn test_default_reporter() {
            let reporter = ProgressReporter::default();
            assert!(reporter.use_color);
        }

        #[test]
        fn test_reporting_with_progress() {
            let mut reporter = ProgressReporter::new(false, false);
            reporter.start_progress(3, "Running scenarios");
            reporter.header("contact form");
            for r in &mixed_summary().reports {
                reporter.set_message(r.scenario.name());
                reporter.report(r);
            }
            reporter.finish();
            reporter.summary(&mixed_summary());
        }

        #[test]
        fn test_quiet_mode() {
            let mut reporter = ProgressReporter::new(false, true);
            reporter.start_progress(3, "Running scenarios");
            assert!(reporter.progress_bar.is_none());
            for r in &mixed_summary().reports {
                reporter.report(r);
            }
            reporter.summary(&mixed_summary());
        }
    }
}
