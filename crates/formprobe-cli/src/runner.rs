//! Suite execution for `formprobe run`

use crate::commands::RunArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{render_json, OutputFormat, ProgressReporter};
use formprobe::{Backend, Scenario, SuiteConfig, SuiteRunner, SuiteSummary};
use tracing::debug;

/// Resolve the scenario list; empty means all, duplicates are dropped
pub fn select_scenarios(names: &[String]) -> CliResult<Vec<Scenario>> {
    if names.is_empty() {
        return Ok(Scenario::ALL.to_vec());
    }
    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let scenario: Scenario = name.parse().map_err(|_| {
            let known: Vec<&str> = Scenario::ALL.iter().map(|s| s.name()).collect();
            CliError::invalid_argument(format!(
                "unknown scenario '{name}' (expected one of: {})",
                known.join(", ")
            ))
        })?;
        if !selected.contains(&scenario) {
            selected.push(scenario);
        }
    }
    Ok(selected)
}

/// Build the suite configuration: YAML file, then environment, then flags
pub fn suite_config(args: &RunArgs) -> CliResult<SuiteConfig> {
    let mut config = match &args.config {
        Some(path) => SuiteConfig::from_yaml_file(path)?,
        None => SuiteConfig::default(),
    }
    .with_env_overrides();

    if let Some(form) = &args.form {
        config.form_path.clone_from(form);
    }
    if let Some(chromium) = &args.chromium {
        config.chromium_path = Some(chromium.clone());
    }
    if args.headed {
        config.headless = false;
    }
    if let Some(dir) = &args.screenshot_dir {
        config.screenshot_dir = Some(dir.clone());
    }
    if let Some(timeout) = args.timeout {
        config.timeout_ms = timeout;
        config.poll_interval_ms = config.poll_interval_ms.min(timeout.max(1));
    }
    if let Some(delay) = args.submit_delay {
        config.submit_delay_ms = delay;
    }
    config.validate()?;
    debug!(?config, "suite configuration");
    Ok(config)
}

/// Runs the selected scenarios and reports them
#[derive(Debug)]
pub struct SuiteCommand {
    config: CliConfig,
    reporter: ProgressReporter,
}

impl SuiteCommand {
    /// Create a command with a reporter matching `config`
    #[must_use]
    pub fn new(config: CliConfig) -> Self {
        let quiet = config.verbosity.is_quiet() || config.format == OutputFormat::Json;
        let reporter = ProgressReporter::new(config.color.should_color(), quiet);
        Self { config, reporter }
    }

    /// Execute `formprobe run`
    ///
    /// Returns the summary even when scenarios fail; the caller decides the
    /// exit status.
    pub fn execute(&mut self, args: &RunArgs) -> CliResult<SuiteSummary> {
        let scenarios = select_scenarios(&args.scenarios)?;
        let suite = suite_config(args)?;
        let backend = if args.mock {
            Backend::Mock
        } else {
            Backend::Chromium
        };
        let runner = SuiteRunner::new(suite)
            .with_backend(backend)
            .with_fail_fast(args.fail_fast);

        self.reporter.header(&format!(
            "Contact form: {}",
            runner.config().form_path
        ));
        self.reporter
            .start_progress(scenarios.len() as u64, "Running scenarios");

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let reporter = &self.reporter;
        let summary = rt.block_on(runner.run(&scenarios, |report| {
            reporter.set_message(report.scenario.name());
            reporter.report(report);
        }));

        self.reporter.finish();
        self.reporter.summary(&summary);
        if self.config.format == OutputFormat::Json {
            println!("{}", render_json(&summary)?);
        }
        Ok(summary)
    }
}

/// Turn a finished run into the process result
pub fn check_summary(summary: &SuiteSummary) -> CliResult<()> {
    if summary.all_passed() {
        Ok(())
    } else {
        Err(CliError::SuiteFailed {
            failed: summary.failures().len(),
            total: summary.total(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, Verbosity};
    use formprobe::ScenarioStatus;
    use std::io::Write;

    fn mock_args() -> RunArgs {
        RunArgs {
            form: Some("/srv/site/contact_form.html".to_string()),
            mock: true,
            timeout: Some(100),
            submit_delay: Some(0),
            ..RunArgs::default()
        }
    }

    fn quiet_command() -> SuiteCommand {
        SuiteCommand::new(
            CliConfig::new()
                .with_verbosity(Verbosity::Quiet)
                .with_color(ColorChoice::Never),
        )
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn test_empty_selects_all() {
            assert_eq!(select_scenarios(&[]).unwrap(), Scenario::ALL.to_vec());
        }

        #[test]
        fn test_selection_keeps_order_and_dedupes() {
            let names = vec![
                "reset_form".to_string(),
                "test_message_counter".to_string(),
                "reset_form".to_string(),
            ];
            assert_eq!(
                select_scenarios(&names).unwrap(),
                vec![Scenario::ResetForm, Scenario::MessageCounter]
            );
        }

        #[test]
        fn test_unknown_scenario_lists_known_names() {
            let err = select_scenarios(&["nope".to_string()]).unwrap_err();
            let message = err.to_string();
            assert!(message.contains("nope"));
            assert!(message.contains("positive_submit_valid_data"));
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_flags_override_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "form_path: from_file.html").unwrap();
            writeln!(file, "submit_delay_ms: 900").unwrap();
            writeln!(file, "poll_interval_ms: 250").unwrap();

            let args = RunArgs {
                config: Some(file.path().to_path_buf()),
                form: Some("from_flag.html".to_string()),
                headed: true,
                timeout: Some(200),
                ..RunArgs::default()
            };
            let config = suite_config(&args).unwrap();
            assert_eq!(config.form_path, "from_flag.html");
            assert_eq!(config.submit_delay_ms, 900);
            assert!(!config.headless);
            assert_eq!(config.timeout_ms, 200);
            assert_eq!(config.poll_interval_ms, 200);
        }

        #[test]
        fn test_invalid_timeout_rejected() {
            let args = RunArgs {
                timeout: Some(0),
                ..RunArgs::default()
            };
            assert!(suite_config(&args).is_err());
        }
    }

    mod execute_tests {
        use super::*;

        #[test]
        fn test_mock_run_passes() {
            let summary = quiet_command().execute(&mock_args()).unwrap();
            assert_eq!(summary.total(), 6);
            assert!(check_summary(&summary).is_ok());
        }

        #[test]
        fn test_selected_scenarios_only() {
            let args = RunArgs {
                scenarios: vec!["message_counter".to_string()],
                ..mock_args()
            };
            let summary = quiet_command().execute(&args).unwrap();
            assert_eq!(summary.total(), 1);
            assert_eq!(summary.count(ScenarioStatus::Passed), 1);
        }

        #[test]
        fn test_check_summary_reports_failures() {
            let mut summary = SuiteSummary::default();
            summary.push(formprobe::ScenarioReport::from_result(
                Scenario::ResetForm,
                &Err(formprobe::ProbeError::assertion("x")),
                std::time::Duration::ZERO,
            ));
            let err = check_summary(&summary).unwrap_err();
            assert!(matches!(err, CliError::SuiteFailed { failed: 1, total: 1 }));
        }
    }
}
