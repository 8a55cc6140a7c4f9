//! Page object for the contact form.
//!
//! Interactions return `&mut Self` so steps chain:
//!
//! ```no_run
//! # async fn demo() -> formprobe::ProbeResult<()> {
//! use formprobe::{mock, ContactPage, Subject};
//!
//! let mut page = ContactPage::new(mock::contact_form());
//! page.fill_name("Тест")
//!     .await?
//!     .fill_email("test@example.com")
//!     .await?
//!     .select_subject(Subject::Question)
//!     .await?
//!     .set_agreement(true)
//!     .await?
//!     .submit_form()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::base_page::BasePage;
use crate::driver::FormDriver;
use crate::locator::Locator;
use crate::page_object::PageObject;
use crate::result::ProbeResult;
use crate::wait::{settle, WaitOptions};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use tracing::debug;

/// Default pause after clicking submit, in milliseconds
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 2_000;

/// Character limit of the message field, shown as `{n}/500` by the counter
pub const MESSAGE_MAX_CHARS: usize = 500;

/// Topic radio buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    /// "Вопрос"
    Question,
    /// "Жалоба"
    Complaint,
    /// "Предложение"
    Suggestion,
}

impl Subject {
    /// Radio button for this subject
    #[must_use]
    pub const fn locator(self) -> Locator {
        match self {
            Self::Question => Locator::id("question"),
            Self::Complaint => Locator::id("complaint"),
            Self::Suggestion => Locator::id("suggestion"),
        }
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "question" => Ok(Self::Question),
            "complaint" => Ok(Self::Complaint),
            "suggestion" => Ok(Self::Suggestion),
            other => Err(format!("unknown subject: {other}")),
        }
    }
}

/// Form fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Name input
    Name,
    /// Email input
    Email,
    /// Phone input
    Phone,
    /// Subject radio group
    Subject,
    /// Message textarea
    Message,
    /// Consent checkbox
    Agree,
}

impl FormField {
    /// Every field, in form order
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Subject,
        Self::Message,
        Self::Agree,
    ];

    /// Field name as used by the form's ids
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::Agree => "agree",
        }
    }

    /// Element holding this field's error text
    #[must_use]
    pub const fn error_locator(self) -> Locator {
        match self {
            Self::Name => Locator::id("nameError"),
            Self::Email => Locator::id("emailError"),
            Self::Phone => Locator::id("phoneError"),
            Self::Subject => Locator::id("subjectError"),
            Self::Message => Locator::id("messageError"),
            Self::Agree => Locator::id("agreeError"),
        }
    }

    /// Field by its form name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values for every field of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactData {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Visible text of the age group option
    pub age_group: String,
    /// Topic
    pub subject: Subject,
    /// Message body
    pub message: String,
    /// Consent to data processing
    pub agree: bool,
    /// Newsletter subscription
    pub subscribe: bool,
}

impl ContactData {
    /// The canned valid dataset
    #[must_use]
    pub fn valid() -> Self {
        Self {
            name: "Иван Иванов".to_string(),
            email: "ivan@example.com".to_string(),
            phone: "+7 (999) 123-45-67".to_string(),
            age_group: "26-35 лет".to_string(),
            subject: Subject::Question,
            message: "Это тестовое сообщение для проверки работы формы.".to_string(),
            agree: true,
            subscribe: true,
        }
    }
}

/// Page object for the contact form
#[derive(Debug)]
pub struct ContactPage<D: FormDriver> {
    base: BasePage<D>,
    form_url: String,
    submit_delay_ms: u64,
}

impl<D: FormDriver> ContactPage<D> {
    // Inputs
    /// Name input
    pub const NAME_INPUT: Locator = Locator::id("name");
    /// Email input
    pub const EMAIL_INPUT: Locator = Locator::id("email");
    /// Phone input
    pub const PHONE_INPUT: Locator = Locator::id("phone");
    /// Age group select
    pub const AGE_SELECT: Locator = Locator::id("age");
    /// Message textarea
    pub const MESSAGE_TEXTAREA: Locator = Locator::id("message");

    // Subject radios
    /// "Question" radio
    pub const SUBJECT_QUESTION: Locator = Subject::Question.locator();
    /// "Complaint" radio
    pub const SUBJECT_COMPLAINT: Locator = Subject::Complaint.locator();
    /// "Suggestion" radio
    pub const SUBJECT_SUGGESTION: Locator = Subject::Suggestion.locator();

    // Checkboxes
    /// Consent checkbox
    pub const AGREE_CHECKBOX: Locator = Locator::id("agree");
    /// Subscription checkbox
    pub const SUBSCRIBE_CHECKBOX: Locator = Locator::id("subscribe");

    // Buttons
    /// Submit button
    pub const SUBMIT_BUTTON: Locator = Locator::id("submitBtn");
    /// Reset button
    pub const RESET_BUTTON: Locator = Locator::id("resetBtn");

    // Messages
    /// Form-level success message
    pub const SUCCESS_MESSAGE: Locator = Locator::id("successMessage");
    /// Form-level error message
    pub const ERROR_MESSAGE: Locator = Locator::id("errorMessage");
    /// Message character counter
    pub const MESSAGE_COUNTER: Locator = Locator::id("messageCounter");

    /// Wrap a driver with default waits and submit delay
    pub fn new(driver: D) -> Self {
        Self::from_base(BasePage::new(driver))
    }

    /// Wrap an existing [`BasePage`]
    pub fn from_base(base: BasePage<D>) -> Self {
        Self {
            base,
            form_url: "contact_form.html".to_string(),
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
        }
    }

    /// Wrap a driver with custom wait options
    pub fn with_wait(driver: D, options: WaitOptions) -> Self {
        Self::from_base(BasePage::with_wait(driver, options))
    }

    /// URL opened by [`ContactPage::open_contact_form`]
    #[must_use]
    pub fn with_form_url(mut self, url: impl Into<String>) -> Self {
        self.form_url = url.into();
        self
    }

    /// Pause after clicking submit
    #[must_use]
    pub fn with_submit_delay(mut self, delay_ms: u64) -> Self {
        self.submit_delay_ms = delay_ms;
        self
    }

    /// URL of the form
    pub fn form_url(&self) -> &str {
        &self.form_url
    }

    /// Give the driver back
    pub fn into_driver(self) -> D {
        self.base.into_driver()
    }

    /// Open the form at the configured URL
    pub async fn open_contact_form(&mut self) -> ProbeResult<&mut Self> {
        let url = self.form_url.clone();
        self.base.open(&url).await?;
        Ok(self)
    }

    /// Wait until the form has rendered
    ///
    /// The browser may percent-encode or redirect the URL, so a URL that
    /// does not match `form_url` is only logged.
    pub async fn verify_loaded(&self) -> ProbeResult<()> {
        let url = self.base.get_current_url().await?;
        if !self.matches_url(&url) {
            debug!(
                expected = %self.form_url,
                actual = %url,
                "browser reports a different URL"
            );
        }
        self.base.wait_for_element(&Self::SUBMIT_BUTTON).await?;
        Ok(())
    }

    /// Type into the name field
    pub async fn fill_name(&mut self, name: &str) -> ProbeResult<&mut Self> {
        self.base.type_text(&Self::NAME_INPUT, name).await?;
        Ok(self)
    }

    /// Type into the email field
    pub async fn fill_email(&mut self, email: &str) -> ProbeResult<&mut Self> {
        self.base.type_text(&Self::EMAIL_INPUT, email).await?;
        Ok(self)
    }

    /// Type into the phone field
    pub async fn fill_phone(&mut self, phone: &str) -> ProbeResult<&mut Self> {
        self.base.type_text(&Self::PHONE_INPUT, phone).await?;
        Ok(self)
    }

    /// Choose an age group by its visible text
    pub async fn select_age(&mut self, age_group: &str) -> ProbeResult<&mut Self> {
        self.base
            .select_by_visible_text(&Self::AGE_SELECT, age_group)
            .await?;
        Ok(self)
    }

    /// Type into the message field
    pub async fn fill_message(&mut self, message: &str) -> ProbeResult<&mut Self> {
        self.base.type_text(&Self::MESSAGE_TEXTAREA, message).await?;
        Ok(self)
    }

    /// Click the radio for `subject`
    pub async fn select_subject(&mut self, subject: Subject) -> ProbeResult<&mut Self> {
        self.base.click(&subject.locator()).await?;
        Ok(self)
    }

    /// Check or uncheck the consent box
    pub async fn set_agreement(&mut self, agree: bool) -> ProbeResult<&mut Self> {
        self.set_checkbox(&Self::AGREE_CHECKBOX, agree).await?;
        Ok(self)
    }

    /// Check or uncheck the subscription box
    pub async fn set_subscription(&mut self, subscribe: bool) -> ProbeResult<&mut Self> {
        self.set_checkbox(&Self::SUBSCRIBE_CHECKBOX, subscribe).await?;
        Ok(self)
    }

    async fn set_checkbox(&mut self, locator: &Locator, checked: bool) -> ProbeResult<()> {
        if self.base.is_selected(locator).await? != checked {
            self.base.click(locator).await?;
        }
        Ok(())
    }

    /// Click submit, then wait the configured settle delay
    pub async fn submit_form(&mut self) -> ProbeResult<&mut Self> {
        self.base.click(&Self::SUBMIT_BUTTON).await?;
        settle(self.submit_delay_ms).await;
        Ok(self)
    }

    /// Click reset
    pub async fn reset_form(&mut self) -> ProbeResult<&mut Self> {
        self.base.click(&Self::RESET_BUTTON).await?;
        Ok(self)
    }

    /// Whether the success message is visible
    pub async fn is_success_message_displayed(&self) -> bool {
        self.base.is_displayed(&Self::SUCCESS_MESSAGE).await
    }

    /// Whether the form-level error message is visible
    pub async fn is_error_message_displayed(&self) -> bool {
        self.base.is_displayed(&Self::ERROR_MESSAGE).await
    }

    /// Text of the success message
    pub async fn get_success_message_text(&self) -> ProbeResult<String> {
        self.base.get_text(&Self::SUCCESS_MESSAGE).await
    }

    /// Text of the form-level error message
    pub async fn get_error_message_text(&self) -> ProbeResult<String> {
        self.base.get_text(&Self::ERROR_MESSAGE).await
    }

    /// Error text shown under `field`, empty when none
    pub async fn get_field_error_text(&self, field: FormField) -> ProbeResult<String> {
        self.base.get_text(&field.error_locator()).await
    }

    /// Error text for a field given by name; unknown names yield `""`
    pub async fn get_field_error_text_by_name(&self, field_name: &str) -> ProbeResult<String> {
        match FormField::from_name(field_name) {
            Some(field) => self.get_field_error_text(field).await,
            None => Ok(String::new()),
        }
    }

    /// Text of the character counter, e.g. `18/500`
    pub async fn get_message_counter_text(&self) -> ProbeResult<String> {
        self.base.get_text(&Self::MESSAGE_COUNTER).await
    }

    /// Fill every field with [`ContactData::valid`]
    pub async fn fill_all_valid_data(&mut self) -> ProbeResult<&mut Self> {
        self.fill_with(&ContactData::valid()).await
    }

    /// Fill every field from `data`
    pub async fn fill_with(&mut self, data: &ContactData) -> ProbeResult<&mut Self> {
        self.fill_name(&data.name)
            .await?
            .fill_email(&data.email)
            .await?
            .fill_phone(&data.phone)
            .await?
            .select_age(&data.age_group)
            .await?
            .select_subject(data.subject)
            .await?
            .fill_message(&data.message)
            .await?
            .set_agreement(data.agree)
            .await?
            .set_subscription(data.subscribe)
            .await
    }

    /// Whether name, email and message are non-empty and consent is given
    pub async fn is_form_valid(&self) -> ProbeResult<bool> {
        let name = self.base.get_value(&Self::NAME_INPUT).await?;
        let email = self.base.get_value(&Self::EMAIL_INPUT).await?;
        let message = self.base.get_value(&Self::MESSAGE_TEXTAREA).await?;
        let agree = self.base.is_selected(&Self::AGREE_CHECKBOX).await?;
        Ok(!name.is_empty() && !email.is_empty() && !message.is_empty() && agree)
    }
}

impl<D: FormDriver> PageObject for ContactPage<D> {
    fn url_pattern(&self) -> &str {
        self.form_url
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.form_url)
    }

    fn page_name(&self) -> &str {
        "ContactPage"
    }

    fn load_timeout_ms(&self) -> u64 {
        self.base.wait_options().timeout_ms
    }
}

impl<D: FormDriver> Deref for ContactPage<D> {
    type Target = BasePage<D>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl<D: FormDriver> DerefMut for ContactPage<D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
