//! The contact form scenarios.
//!
//! Each scenario expects a freshly opened form and drives it through one
//! [`ContactPage`]. Assertions fail with [`ProbeError::AssertionFailed`]
//! instead of panicking so runners can report them. Validation gaps of the
//! form itself are reported as [`ScenarioOutcome::KnownBug`].

use crate::contact_page::{ContactPage, FormField, MESSAGE_MAX_CHARS};
use crate::driver::FormDriver;
use crate::result::{ensure, ProbeError, ProbeResult};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Phrase the success message must contain
pub const SUCCESS_PHRASE: &str = "Форма успешно отправлена";

/// Error shown under an empty required field
pub const REQUIRED_FIELD_ERROR: &str = "Поле обязательно для заполнения";

/// Message typed by [`Scenario::MessageCounter`]
pub const COUNTER_MESSAGE: &str = "Тестовое сообщение";

/// One test case of the suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// All fields valid, submit succeeds
    PositiveSubmitValidData,
    /// Name left empty
    NegativeEmptyRequiredField,
    /// Email without `@` or domain
    NegativeInvalidEmail,
    /// Consent checkbox left unchecked
    NegativeNoAgreement,
    /// Character counter under the message field
    MessageCounter,
    /// Reset button clears the form
    ResetForm,
}

impl Scenario {
    /// Every scenario, in suite order
    pub const ALL: [Self; 6] = [
        Self::PositiveSubmitValidData,
        Self::NegativeEmptyRequiredField,
        Self::NegativeInvalidEmail,
        Self::NegativeNoAgreement,
        Self::MessageCounter,
        Self::ResetForm,
    ];

    /// Stable snake_case name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PositiveSubmitValidData => "positive_submit_valid_data",
            Self::NegativeEmptyRequiredField => "negative_empty_required_field",
            Self::NegativeInvalidEmail => "negative_invalid_email",
            Self::NegativeNoAgreement => "negative_no_agreement",
            Self::MessageCounter => "message_counter",
            Self::ResetForm => "reset_form",
        }
    }

    /// One-line description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::PositiveSubmitValidData => "valid data in every field is accepted",
            Self::NegativeEmptyRequiredField => "an empty name is rejected with a field error",
            Self::NegativeInvalidEmail => "a malformed email is rejected",
            Self::NegativeNoAgreement => "submitting without consent is rejected",
            Self::MessageCounter => "the counter shows typed characters out of 500",
            Self::ResetForm => "reset clears inputs and the consent checkbox",
        }
    }

    /// Run against an opened form
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] when the form misbehaves, or
    /// the driver error that interrupted the scenario.
    pub async fn run<D: FormDriver>(
        self,
        page: &mut ContactPage<D>,
    ) -> ProbeResult<ScenarioOutcome> {
        info!(scenario = self.name(), "running scenario");
        let outcome = match self {
            Self::PositiveSubmitValidData => positive_submit_valid_data(page).await,
            Self::NegativeEmptyRequiredField => negative_empty_required_field(page).await,
            Self::NegativeInvalidEmail => negative_invalid_email(page).await,
            Self::NegativeNoAgreement => negative_no_agreement(page).await,
            Self::MessageCounter => message_counter(page).await,
            Self::ResetForm => reset_form(page).await,
        }?;
        if let ScenarioOutcome::KnownBug(bug) = &outcome {
            warn!(scenario = self.name(), bug = %bug, "known bug");
        }
        Ok(outcome)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches("test_");
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == wanted)
            .ok_or_else(|| ProbeError::config(format!("unknown scenario: {s}")))
    }
}

/// What a scenario that did not fail found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// The form behaved as expected
    Passed,
    /// The form skipped a validation it should perform
    KnownBug(String),
}

impl ScenarioOutcome {
    /// Whether this is a known bug
    #[must_use]
    pub const fn is_known_bug(&self) -> bool {
        matches!(self, Self::KnownBug(_))
    }
}

/// Final status of a scenario run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Passed
    Passed,
    /// Passed, but the form has a known validation gap
    KnownBug,
    /// Assertion or driver failure
    Failed,
}

/// Result of one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Which scenario ran
    pub scenario: Scenario,
    /// How it ended
    pub status: ScenarioStatus,
    /// Bug description or failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Screenshot taken on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
    /// Wall time, in milliseconds
    pub duration_ms: u64,
}

impl ScenarioReport {
    /// Build a report from a scenario result
    #[must_use]
    pub fn from_result(
        scenario: Scenario,
        result: &ProbeResult<ScenarioOutcome>,
        duration: Duration,
    ) -> Self {
        let (status, detail) = match result {
            Ok(ScenarioOutcome::Passed) => (ScenarioStatus::Passed, None),
            Ok(ScenarioOutcome::KnownBug(bug)) => (ScenarioStatus::KnownBug, Some(bug.clone())),
            Err(e) => (ScenarioStatus::Failed, Some(e.to_string())),
        };
        Self {
            scenario,
            status,
            detail,
            screenshot: None,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Whether the scenario failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == ScenarioStatus::Failed
    }
}

/// Aggregate of a suite run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteSummary {
    /// Individual reports, in run order
    pub reports: Vec<ScenarioReport>,
    /// Total wall time, in milliseconds
    pub duration_ms: u64,
}

impl SuiteSummary {
    /// Add a report
    pub fn push(&mut self, report: ScenarioReport) {
        self.duration_ms = self.duration_ms.saturating_add(report.duration_ms);
        self.reports.push(report);
    }

    /// Count reports with `status`
    #[must_use]
    pub fn count(&self, status: ScenarioStatus) -> usize {
        self.reports.iter().filter(|r| r.status == status).count()
    }

    /// Number of scenarios run
    #[must_use]
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// True when nothing failed (known bugs do not count as failures)
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.reports.iter().any(ScenarioReport::failed)
    }

    /// Failed reports
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioReport> {
        self.reports.iter().filter(|r| r.failed()).collect()
    }
}

/// Fill valid data, submit, expect the success message
pub async fn positive_submit_valid_data<D: FormDriver>(
    page: &mut ContactPage<D>,
) -> ProbeResult<ScenarioOutcome> {
    page.fill_all_valid_data().await?.submit_form().await?;

    ensure(
        page.is_success_message_displayed().await,
        "success message is not displayed",
    )?;
    let text = page.get_success_message_text().await?;
    ensure(
        text.contains(SUCCESS_PHRASE),
        format!("unexpected success text: {text:?}"),
    )?;
    Ok(ScenarioOutcome::Passed)
}

/// Submit without a name, expect the required-field error and no success
pub async fn negative_empty_required_field<D: FormDriver>(
    page: &mut ContactPage<D>,
) -> ProbeResult<ScenarioOutcome> {
    page.fill_email("test@example.com")
        .await?
        .fill_message(COUNTER_MESSAGE)
        .await?
        .set_agreement(true)
        .await?
        .submit_form()
        .await?;

    let error = page.get_field_error_text(FormField::Name).await?;
    ensure(
        error == REQUIRED_FIELD_ERROR,
        format!("wrong error for empty name: {error:?}"),
    )?;
    ensure(
        !page.is_success_message_displayed().await,
        "success message shown despite a field error",
    )?;
    Ok(ScenarioOutcome::Passed)
}

/// Submit a malformed email; a missing error is a known bug
pub async fn negative_invalid_email<D: FormDriver>(
    page: &mut ContactPage<D>,
) -> ProbeResult<ScenarioOutcome> {
    page.fill_name("Тест")
        .await?
        .fill_email("invalid-email")
        .await?
        .fill_message(COUNTER_MESSAGE)
        .await?
        .set_agreement(true)
        .await?
        .submit_form()
        .await?;

    let error = page.get_field_error_text(FormField::Email).await?;
    if error.is_empty() {
        return Ok(ScenarioOutcome::KnownBug(
            "form accepts an invalid email".to_string(),
        ));
    }
    ensure(
        error.to_lowercase().contains("корректный email"),
        format!("wrong error for invalid email: {error:?}"),
    )?;
    Ok(ScenarioOutcome::Passed)
}

/// Submit without consent; a missing error is a known bug
pub async fn negative_no_agreement<D: FormDriver>(
    page: &mut ContactPage<D>,
) -> ProbeResult<ScenarioOutcome> {
    page.fill_name("Тест")
        .await?
        .fill_email("test@example.com")
        .await?
        .fill_message(COUNTER_MESSAGE)
        .await?
        .submit_form()
        .await?;

    let error = page.get_field_error_text(FormField::Agree).await?;
    if error.is_empty() {
        return Ok(ScenarioOutcome::KnownBug(
            "form submits without consent".to_string(),
        ));
    }
    let lower = error.to_lowercase();
    ensure(
        lower.contains("согласие") || lower.contains("необходимо"),
        format!("wrong error for missing consent: {error:?}"),
    )?;
    Ok(ScenarioOutcome::Passed)
}

/// Type a message, expect `{chars}/500`
pub async fn message_counter<D: FormDriver>(
    page: &mut ContactPage<D>,
) -> ProbeResult<ScenarioOutcome> {
    check_message_counter(page, COUNTER_MESSAGE).await?;
    Ok(ScenarioOutcome::Passed)
}

/// Type `message` and check the counter against its character count
///
/// # Errors
///
/// Fails when the counter text differs from `{chars}/500`.
pub async fn check_message_counter<D: FormDriver>(
    page: &mut ContactPage<D>,
    message: &str,
) -> ProbeResult<()> {
    page.fill_message(message).await?;
    let counter = page.get_message_counter_text().await?;
    let expected = format!("{}/{MESSAGE_MAX_CHARS}", message.chars().count());
    ensure(
        counter == expected,
        format!("counter shows {counter:?}, expected {expected:?}"),
    )
}

/// Fill some fields, reset, expect them cleared
pub async fn reset_form<D: FormDriver>(page: &mut ContactPage<D>) -> ProbeResult<ScenarioOutcome> {
    page.fill_name("Тест")
        .await?
        .fill_email("test@example.com")
        .await?
        .set_agreement(true)
        .await?
        .reset_form()
        .await?;

    let name = page.get_value(&ContactPage::<D>::NAME_INPUT).await?;
    let email = page.get_value(&ContactPage::<D>::EMAIL_INPUT).await?;
    let agreed = page.is_selected(&ContactPage::<D>::AGREE_CHECKBOX).await?;
    ensure(name.is_empty(), format!("name not cleared: {name:?}"))?;
    ensure(email.is_empty(), format!("email not cleared: {email:?}"))?;
    ensure(!agreed, "consent checkbox still checked")?;
    Ok(ScenarioOutcome::Passed)
}
