//! formprobe: page-object browser tests for an HTML contact form
//!
//! A thin wait-and-locate layer ([`BasePage`]) over a browser driver, a page
//! object for the contact form ([`ContactPage`]) and six scenarios that check
//! the form's validation behavior.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     FORMPROBE Architecture                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Scenario   │    │ Contact    │    │ Base       │            │
//! │   │ (+Session) │───►│ Page       │───►│ Page       │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             │ FormDriver        │
//! │                              ┌──────────────┴──────────────┐    │
//! │                              ▼                             ▼    │
//! │                     ┌────────────────┐           ┌────────────┐ │
//! │                     │ ChromiumDriver │           │ MockDriver │ │
//! │                     │ (CDP, feature) │           │ (in-memory)│ │
//! │                     └────────────────┘           └────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use formprobe::{mock, ContactPage, Scenario, ScenarioOutcome, WaitOptions};
//!
//! let rt = tokio::runtime::Builder::new_current_thread()
//!     .enable_all()
//!     .build()?;
//! let outcome = rt.block_on(async {
//!     let mut page = ContactPage::with_wait(mock::contact_form(), WaitOptions::default())
//!         .with_submit_delay(0);
//!     Scenario::PositiveSubmitValidData.run(&mut page).await
//! })?;
//! assert_eq!(outcome, ScenarioOutcome::Passed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

mod base_page;
mod browser;
mod contact_page;
mod driver;
mod locator;
mod page_object;
mod result;

/// Suite configuration (YAML + environment)
pub mod config;

/// In-memory driver and the simulated contact form
pub mod mock;

/// The six contact form scenarios and their reports
pub mod scenario;

/// Per-scenario fixture and suite runner
pub mod session;

/// Element waits
pub mod wait;

pub use base_page::BasePage;
pub use browser::BrowserConfig;
#[cfg(feature = "browser")]
pub use browser::ChromiumDriver;
pub use config::SuiteConfig;
pub use contact_page::{
    ContactData, ContactPage, FormField, Subject, DEFAULT_SUBMIT_DELAY_MS, MESSAGE_MAX_CHARS,
};
pub use driver::{ElementState, FormDriver};
pub use locator::{By, Locator};
pub use mock::{FormBehavior, MockDriver};
pub use page_object::PageObject;
pub use result::{ensure, ProbeError, ProbeResult};
pub use scenario::{Scenario, ScenarioOutcome, ScenarioReport, ScenarioStatus, SuiteSummary};
pub use session::{run_scenario, Backend, FormSession, SuiteRunner};
pub use wait::{WaitOptions, Waiter};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::base_page::*;
    pub use super::browser::*;
    pub use super::config::*;
    pub use super::contact_page::*;
    pub use super::driver::*;
    pub use super::locator::*;
    pub use super::page_object::*;
    pub use super::result::*;
    pub use super::scenario::{Scenario, ScenarioOutcome, ScenarioReport, ScenarioStatus};
    pub use super::session::*;
    pub use super::wait::*;
}
