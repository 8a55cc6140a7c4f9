//! Per-scenario fixture and the suite runner.
//!
//! Every scenario gets its own [`FormSession`]: a new driver, the form
//! freshly opened, and a guaranteed close afterwards. Nothing is shared
//! between scenarios.

use crate::config::SuiteConfig;
use crate::contact_page::ContactPage;
use crate::driver::FormDriver;
use crate::mock;
use crate::result::ProbeResult;
use crate::scenario::{Scenario, ScenarioReport, SuiteSummary};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Which driver a session runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Chromium over CDP (requires the `browser` feature)
    #[default]
    Chromium,
    /// Simulated in-memory form
    Mock,
}

impl Backend {
    /// Start a driver for this backend
    ///
    /// # Errors
    ///
    /// Fails if Chromium cannot be launched, or if this build has no
    /// browser support.
    pub async fn launch(self, config: &SuiteConfig) -> ProbeResult<Box<dyn FormDriver>> {
        match self {
            Self::Mock => Ok(Box::new(mock::contact_form())),
            Self::Chromium => launch_chromium(config).await,
        }
    }
}

#[cfg(feature = "browser")]
async fn launch_chromium(config: &SuiteConfig) -> ProbeResult<Box<dyn FormDriver>> {
    let driver = crate::browser::ChromiumDriver::launch(config.browser_config()).await?;
    Ok(Box::new(driver))
}

#[cfg(not(feature = "browser"))]
async fn launch_chromium(_config: &SuiteConfig) -> ProbeResult<Box<dyn FormDriver>> {
    Err(crate::result::ProbeError::BrowserLaunchError {
        message: "built without the `browser` feature; use the mock backend".to_string(),
    })
}

/// An opened contact form owned by one scenario
#[derive(Debug)]
pub struct FormSession<D: FormDriver> {
    page: ContactPage<D>,
    screenshot_dir: Option<PathBuf>,
}

impl<D: FormDriver> FormSession<D> {
    /// Wrap `driver` and open the form from `config`
    ///
    /// The driver is closed again if opening fails.
    ///
    /// # Errors
    ///
    /// Returns the navigation or lookup error that stopped the form from
    /// loading.
    pub async fn open(driver: D, config: &SuiteConfig) -> ProbeResult<Self> {
        let page = ContactPage::with_wait(driver, config.wait_options())
            .with_submit_delay(config.submit_delay_ms);
        let mut page = match config.form_url() {
            Ok(url) => page.with_form_url(url),
            Err(e) => {
                discard(page).await;
                return Err(e);
            }
        };
        if let Err(e) = load(&mut page).await {
            discard(page).await;
            return Err(e);
        }
        Ok(Self {
            page,
            screenshot_dir: config.screenshot_dir.clone(),
        })
    }

    /// The page object
    pub fn page(&mut self) -> &mut ContactPage<D> {
        &mut self.page
    }

    /// Run `scenario`, saving a screenshot if it fails
    pub async fn run(&mut self, scenario: Scenario) -> ScenarioReport {
        let start = Instant::now();
        let result = scenario.run(&mut self.page).await;
        let mut report = ScenarioReport::from_result(scenario, &result, start.elapsed());
        if report.failed() {
            report.screenshot = self.capture_failure(scenario).await;
        }
        report
    }

    async fn capture_failure(&self, scenario: Scenario) -> Option<PathBuf> {
        let path = self
            .screenshot_dir
            .as_ref()?
            .join(format!("{}.png", scenario.name()));
        match self.page.take_screenshot(&path).await {
            Ok(()) => Some(path),
            Err(e) => {
                warn!(scenario = scenario.name(), error = %e, "failure screenshot not saved");
                None
            }
        }
    }

    /// Close the browser
    ///
    /// # Errors
    ///
    /// Returns the driver's shutdown error.
    pub async fn close(mut self) -> ProbeResult<()> {
        self.page.close().await
    }
}

async fn load<D: FormDriver>(page: &mut ContactPage<D>) -> ProbeResult<()> {
    page.open_contact_form().await?;
    page.verify_loaded().await
}

async fn discard<D: FormDriver>(mut page: ContactPage<D>) {
    if let Err(e) = page.close().await {
        warn!(error = %e, "failed to close driver after open error");
    }
}

/// Open a session on `driver`, run one scenario, always close
pub async fn run_scenario<D: FormDriver>(
    driver: D,
    config: &SuiteConfig,
    scenario: Scenario,
) -> ScenarioReport {
    let start = Instant::now();
    let mut session = match FormSession::open(driver, config).await {
        Ok(session) => session,
        Err(e) => {
            warn!(scenario = scenario.name(), error = %e, "form did not open");
            return ScenarioReport::from_result(scenario, &Err(e), start.elapsed());
        }
    };
    let report = session.run(scenario).await;
    if let Err(e) = session.close().await {
        warn!(scenario = scenario.name(), error = %e, "failed to close browser");
    }
    report
}

/// Runs scenarios one after another, each in its own session
#[derive(Debug, Clone)]
pub struct SuiteRunner {
    config: SuiteConfig,
    backend: Backend,
    fail_fast: bool,
}

impl SuiteRunner {
    /// Runner for `config` on the Chromium backend
    #[must_use]
    pub fn new(config: SuiteConfig) -> Self {
        Self {
            config,
            backend: Backend::default(),
            fail_fast: false,
        }
    }

    /// Select the backend
    #[must_use]
    pub const fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Stop after the first failure
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Run `scenarios`, calling `on_report` after each one
    pub async fn run(
        &self,
        scenarios: &[Scenario],
        mut on_report: impl FnMut(&ScenarioReport),
    ) -> SuiteSummary {
        let mut summary = SuiteSummary::default();
        for &scenario in scenarios {
            let report = self.run_one(scenario).await;
            on_report(&report);
            let failed = report.failed();
            summary.push(report);
            if failed && self.fail_fast {
                debug!(scenario = scenario.name(), "fail-fast: stopping suite");
                break;
            }
        }
        info!(
            total = summary.total(),
            failed = summary.failures().len(),
            "suite finished"
        );
        summary
    }

    async fn run_one(&self, scenario: Scenario) -> ScenarioReport {
        let start = Instant::now();
        match self.backend.launch(&self.config).await {
            Ok(driver) => run_scenario(driver, &self.config, scenario).await,
            Err(e) => {
                warn!(scenario = scenario.name(), error = %e, "driver did not start");
                ScenarioReport::from_result(scenario, &Err(e), start.elapsed())
            }
        }
    }
}
