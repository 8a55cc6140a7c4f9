//! Contact form suite against the simulated form.
//!
//! Each test opens its own session, so no test depends on another. The
//! `live_browser` tests at the bottom drive real Chromium and are ignored by
//! default; run them with
//! `CONTACT_FORM_PATH=/path/to/contact_form.html cargo test -p formprobe --features browser -- --ignored`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use formprobe::mock::{self, FormBehavior, MockDriver};
use formprobe::scenario::{self, ScenarioOutcome};
use formprobe::{ContactPage, FormSession, Scenario, SuiteConfig};

fn config() -> SuiteConfig {
    SuiteConfig {
        form_path: "/srv/site/contact_form.html".to_string(),
        timeout_ms: 200,
        poll_interval_ms: 10,
        submit_delay_ms: 0,
        ..SuiteConfig::default()
    }
}

async fn session() -> FormSession<MockDriver> {
    session_with(FormBehavior::default()).await
}

/// Scenario logs, visible with `--nocapture`
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("formprobe=debug")
        .with_test_writer()
        .try_init();
}

async fn session_with(behavior: FormBehavior) -> FormSession<MockDriver> {
    init_tracing();
    FormSession::open(mock::contact_form_with(behavior), &config())
        .await
        .unwrap()
}

async fn run(session: &mut FormSession<MockDriver>, scenario: Scenario) -> ScenarioOutcome {
    scenario.run(session.page()).await.unwrap()
}

#[tokio::test]
async fn test_positive_submit_valid_data() {
    let mut session = session().await;
    assert_eq!(
        run(&mut session, Scenario::PositiveSubmitValidData).await,
        ScenarioOutcome::Passed
    );
    let page = session.page();
    assert!(page.is_success_message_displayed().await);
    assert!(page
        .get_success_message_text()
        .await
        .unwrap()
        .contains(scenario::SUCCESS_PHRASE));
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_negative_empty_required_field() {
    let mut session = session().await;
    assert_eq!(
        run(&mut session, Scenario::NegativeEmptyRequiredField).await,
        ScenarioOutcome::Passed
    );
    assert!(!session.page().is_success_message_displayed().await);
    assert!(session.page().is_error_message_displayed().await);
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_negative_invalid_email() {
    let mut session = session().await;
    assert_eq!(
        run(&mut session, Scenario::NegativeInvalidEmail).await,
        ScenarioOutcome::Passed
    );
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_negative_invalid_email_known_bug() {
    let mut session = session_with(FormBehavior {
        validate_email_format: false,
        ..FormBehavior::default()
    })
    .await;
    let outcome = run(&mut session, Scenario::NegativeInvalidEmail).await;
    assert_eq!(
        outcome,
        ScenarioOutcome::KnownBug("form accepts an invalid email".to_string())
    );
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_negative_no_agreement() {
    let mut session = session().await;
    assert_eq!(
        run(&mut session, Scenario::NegativeNoAgreement).await,
        ScenarioOutcome::Passed
    );
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_negative_no_agreement_known_bug() {
    let mut session = session_with(FormBehavior {
        require_agreement: false,
        ..FormBehavior::default()
    })
    .await;
    let outcome = run(&mut session, Scenario::NegativeNoAgreement).await;
    assert_eq!(
        outcome,
        ScenarioOutcome::KnownBug("form submits without consent".to_string())
    );
    assert!(session.page().is_success_message_displayed().await);
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_message_counter() {
    let mut session = session().await;
    assert_eq!(
        run(&mut session, Scenario::MessageCounter).await,
        ScenarioOutcome::Passed
    );
    assert_eq!(
        session.page().get_message_counter_text().await.unwrap(),
        "18/500"
    );
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_reset_form() {
    let mut session = session().await;
    assert_eq!(
        run(&mut session, Scenario::ResetForm).await,
        ScenarioOutcome::Passed
    );
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_set_agreement_is_idempotent() {
    let mut session = session().await;
    let page = session.page();
    for _ in 0..3 {
        page.set_agreement(true).await.unwrap();
    }
    assert!(page
        .is_selected(&ContactPage::<MockDriver>::AGREE_CHECKBOX)
        .await
        .unwrap());
    session.close().await.unwrap();
}

mod counter_properties {
    use super::*;
    use proptest::prelude::*;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_counter_counts_characters(message in "[a-zA-Zа-яА-Я0-9 .,!?]{0,500}") {
            let counter = block_on(async {
                let mut session = session().await;
                scenario::check_message_counter(session.page(), &message)
                    .await
                    .unwrap();
                let text = session.page().get_message_counter_text().await.unwrap();
                session.close().await.unwrap();
                text
            });
            prop_assert_eq!(counter, format!("{}/500", message.chars().count()));
        }
    }
}

#[cfg(feature = "browser")]
mod live_browser {
    use super::*;
    use formprobe::{run_scenario, ChromiumDriver, ScenarioStatus};

    fn live_config() -> SuiteConfig {
        SuiteConfig {
            submit_delay_ms: 2_000,
            timeout_ms: 10_000,
            poll_interval_ms: 100,
            ..SuiteConfig::default()
        }
        .with_env_overrides()
    }

    async fn check(scenario: Scenario) {
        let config = live_config();
        let driver = ChromiumDriver::launch(config.browser_config()).await.unwrap();
        let report = run_scenario(driver, &config, scenario).await;
        assert_ne!(
            report.status,
            ScenarioStatus::Failed,
            "{scenario}: {:?}",
            report.detail
        );
    }

    #[tokio::test]
    #[ignore = "requires Chromium and CONTACT_FORM_PATH"]
    async fn test_live_positive_submit_valid_data() {
        check(Scenario::PositiveSubmitValidData).await;
    }

    #[tokio::test]
    #[ignore = "requires Chromium and CONTACT_FORM_PATH"]
    async fn test_live_negative_empty_required_field() {
        check(Scenario::NegativeEmptyRequiredField).await;
    }

    #[tokio::test]
    #[ignore = "requires Chromium and CONTACT_FORM_PATH"]
    async fn test_live_negative_invalid_email() {
        check(Scenario::NegativeInvalidEmail).await;
    }

    #[tokio::test]
    #[ignore = "requires Chromium and CONTACT_FORM_PATH"]
    async fn test_live_negative_no_agreement() {
        check(Scenario::NegativeNoAgreement).await;
    }

    #[tokio::test]
    #[ignore = "requires Chromium and CONTACT_FORM_PATH"]
    async fn test_live_message_counter() {
        check(Scenario::MessageCounter).await;
    }

    #[tokio::test]
    #[ignore = "requires Chromium and CONTACT_FORM_PATH"]
    async fn test_live_reset_form() {
        check(Scenario::ResetForm).await;
    }
}
