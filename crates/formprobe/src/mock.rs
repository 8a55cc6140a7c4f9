//! In-memory driver for running page objects without a browser.
//!
//! [`MockDriver`] keeps a flat DOM of [`MockElement`]s keyed by id. Clicks
//! toggle checkboxes and radios natively; anything else a page does in
//! script is modeled with click/input handlers registered per element id.
//! [`contact_form`] assembles a simulated contact form with the markup and
//! validation behavior the scenarios exercise.

use crate::contact_page::MESSAGE_MAX_CHARS;
use crate::driver::{ElementState, FormDriver};
use crate::locator::{By, Locator};
use crate::result::{ProbeError, ProbeResult};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Kind of mock element; decides native click behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Text-like `<input>` or `<textarea>`
    TextInput,
    /// `<input type="checkbox">`
    Checkbox,
    /// `<input type="radio">` in the named group
    Radio(String),
    /// `<select>` with the listed option texts
    Select(Vec<String>),
    /// `<button>`
    Button,
    /// Any other element (messages, counters)
    Static,
}

/// One element of the mock DOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    /// `id` attribute
    pub id: String,
    /// `name` attribute
    pub name: Option<String>,
    /// Lower-case tag name
    pub tag_name: String,
    /// Element kind
    pub kind: ElementKind,
    /// Current value (form controls only)
    pub value: Option<String>,
    /// Rendered text
    pub text: String,
    /// Whether the element is visible
    pub displayed: bool,
    /// Checked/selected state
    pub selected: bool,
    /// `maxlength` attribute, in characters
    pub max_length: Option<usize>,
}

impl MockElement {
    fn base(id: &str, tag_name: &str, kind: ElementKind) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            tag_name: tag_name.to_string(),
            kind,
            value: None,
            text: String::new(),
            displayed: true,
            selected: false,
            max_length: None,
        }
    }

    /// `<input>` holding text
    #[must_use]
    pub fn input(id: &str) -> Self {
        Self {
            value: Some(String::new()),
            name: Some(id.to_string()),
            ..Self::base(id, "input", ElementKind::TextInput)
        }
    }

    /// `<textarea>` with an optional character limit
    #[must_use]
    pub fn textarea(id: &str, max_length: Option<usize>) -> Self {
        Self {
            value: Some(String::new()),
            name: Some(id.to_string()),
            max_length,
            ..Self::base(id, "textarea", ElementKind::TextInput)
        }
    }

    /// Checkbox
    #[must_use]
    pub fn checkbox(id: &str) -> Self {
        Self {
            value: Some("on".to_string()),
            name: Some(id.to_string()),
            ..Self::base(id, "input", ElementKind::Checkbox)
        }
    }

    /// Radio button in `group`
    #[must_use]
    pub fn radio(id: &str, group: &str) -> Self {
        Self {
            value: Some(id.to_string()),
            name: Some(group.to_string()),
            ..Self::base(id, "input", ElementKind::Radio(group.to_string()))
        }
    }

    /// `<select>`; the first option is selected initially
    #[must_use]
    pub fn select(id: &str, options: &[&str]) -> Self {
        let options: Vec<String> = options.iter().map(|o| (*o).to_string()).collect();
        Self {
            value: Some(String::new()),
            name: Some(id.to_string()),
            text: options.first().cloned().unwrap_or_default(),
            ..Self::base(id, "select", ElementKind::Select(options))
        }
    }

    /// `<button>` with a label
    #[must_use]
    pub fn button(id: &str, label: &str) -> Self {
        Self {
            text: label.to_string(),
            ..Self::base(id, "button", ElementKind::Button)
        }
    }

    /// Static element with text and visibility
    #[must_use]
    pub fn text(id: &str, tag_name: &str, text: &str, displayed: bool) -> Self {
        Self {
            text: text.to_string(),
            displayed,
            ..Self::base(id, tag_name, ElementKind::Static)
        }
    }

    /// Driver-facing snapshot; hidden elements have no rendered text
    #[must_use]
    pub fn state(&self) -> ElementState {
        ElementState {
            tag_name: self.tag_name.clone(),
            value: self.value.clone(),
            text: if self.displayed {
                self.text.clone()
            } else {
                String::new()
            },
            displayed: self.displayed,
            selected: self.selected,
        }
    }

    /// Current value, empty when the element has none
    #[must_use]
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    fn matches(&self, locator: &Locator) -> bool {
        match locator.by {
            By::Id => self.id == locator.value,
            By::Name => self.name.as_deref() == Some(locator.value),
            By::TagName => self.tag_name == locator.value,
            By::Css => match locator.value.strip_prefix('#') {
                Some(id) => self.id == id,
                None => self.tag_name == locator.value,
            },
            By::XPath | By::ClassName => false,
        }
    }
}

/// The mock document
#[derive(Debug, Clone, Default)]
pub struct MockDom {
    elements: BTreeMap<String, MockElement>,
    order: Vec<String>,
}

impl MockDom {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an element
    pub fn insert(&mut self, element: MockElement) {
        if !self.elements.contains_key(&element.id) {
            self.order.push(element.id.clone());
        }
        let _ = self.elements.insert(element.id.clone(), element);
    }

    /// Element by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MockElement> {
        self.elements.get(id)
    }

    /// Mutable element by id
    pub fn get_mut(&mut self, id: &str) -> Option<&mut MockElement> {
        self.elements.get_mut(id)
    }

    /// Value of the element, empty when missing
    #[must_use]
    pub fn value(&self, id: &str) -> &str {
        self.get(id).map(MockElement::value_or_empty).unwrap_or_default()
    }

    /// Whether the element exists and is checked
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.get(id).is_some_and(|e| e.selected)
    }

    /// Set the element's rendered text
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.text = text.into();
        }
    }

    /// Set the element's visibility
    pub fn set_displayed(&mut self, id: &str, displayed: bool) {
        if let Some(el) = self.get_mut(id) {
            el.displayed = displayed;
        }
    }

    /// Ids of all elements matching the locator, in insertion order.
    ///
    /// Supports `Id`, `Name`, `TagName` and CSS selectors of the form
    /// `#id` or a bare tag name; other strategies match nothing.
    #[must_use]
    pub fn matching(&self, locator: &Locator) -> Vec<&str> {
        self.order
            .iter()
            .filter_map(|id| self.elements.get(id))
            .filter(|e| e.matches(locator))
            .map(|e| e.id.as_str())
            .collect()
    }
}

/// Script attached to an element event
pub type Handler = Arc<dyn Fn(&mut MockDom) + Send + Sync>;

/// Driver over a [`MockDom`]
#[derive(Default)]
pub struct MockDriver {
    dom: MockDom,
    on_click: HashMap<String, Vec<Handler>>,
    on_input: HashMap<String, Vec<Handler>>,
    url: String,
    screenshot: Vec<u8>,
    call_history: Vec<String>,
    closed: bool,
}

impl fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDriver")
            .field("url", &self.url)
            .field("elements", &self.dom.order.len())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl MockDriver {
    /// Create a driver over an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver over an existing document
    #[must_use]
    pub fn with_dom(dom: MockDom) -> Self {
        Self {
            dom,
            ..Self::default()
        }
    }

    /// Add an element
    pub fn add_element(&mut self, element: MockElement) {
        self.dom.insert(element);
    }

    /// Run `handler` after every click on element `id`
    pub fn on_click(&mut self, id: &str, handler: Handler) {
        self.on_click.entry(id.to_string()).or_default().push(handler);
    }

    /// Run `handler` after every value change of element `id`
    pub fn on_input(&mut self, id: &str, handler: Handler) {
        self.on_input.entry(id.to_string()).or_default().push(handler);
    }

    /// Bytes returned by [`FormDriver::screenshot`]
    pub fn set_screenshot(&mut self, png: Vec<u8>) {
        self.screenshot = png;
    }

    /// Current document
    #[must_use]
    pub const fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Mutable document
    pub fn dom_mut(&mut self) -> &mut MockDom {
        &mut self.dom
    }

    /// Whether a call starting with `method` was made
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    /// Whether [`FormDriver::close`] was called
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    fn first_id(&self, locator: &Locator) -> ProbeResult<String> {
        self.dom
            .matching(locator)
            .first()
            .map(|id| (*id).to_string())
            .ok_or_else(|| ProbeError::ElementNotFound {
                locator: locator.to_string(),
                timeout_ms: 0,
            })
    }

    fn fire(&mut self, handlers: Option<Vec<Handler>>) {
        for handler in handlers.unwrap_or_default() {
            handler(&mut self.dom);
        }
    }

    fn fire_input(&mut self, id: &str) {
        let handlers = self.on_input.get(id).cloned();
        self.fire(handlers);
    }
}

#[async_trait]
impl FormDriver for MockDriver {
    async fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        self.call_history.push(format!("navigate:{url}"));
        self.url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> ProbeResult<String> {
        Ok(self.url.clone())
    }

    async fn query(&self, locator: &Locator) -> ProbeResult<Option<ElementState>> {
        Ok(self
            .dom
            .matching(locator)
            .first()
            .and_then(|id| self.dom.get(id))
            .map(MockElement::state))
    }

    async fn query_all(&self, locator: &Locator) -> ProbeResult<Vec<ElementState>> {
        Ok(self
            .dom
            .matching(locator)
            .into_iter()
            .filter_map(|id| self.dom.get(id))
            .map(MockElement::state)
            .collect())
    }

    async fn click(&mut self, locator: &Locator) -> ProbeResult<()> {
        self.call_history.push(format!("click:{locator}"));
        let id = self.first_id(locator)?;

        let kind = self.dom.get(&id).map(|e| e.kind.clone());
        match kind {
            Some(ElementKind::Checkbox) => {
                if let Some(el) = self.dom.get_mut(&id) {
                    el.selected = !el.selected;
                }
            }
            Some(ElementKind::Radio(group)) => {
                for el in self.dom.elements.values_mut() {
                    if el.kind == ElementKind::Radio(group.clone()) {
                        el.selected = el.id == id;
                    }
                }
            }
            _ => {}
        }

        let handlers = self.on_click.get(&id).cloned();
        self.fire(handlers);
        Ok(())
    }

    async fn clear(&mut self, locator: &Locator) -> ProbeResult<()> {
        self.call_history.push(format!("clear:{locator}"));
        let id = self.first_id(locator)?;
        if let Some(el) = self.dom.get_mut(&id) {
            if el.kind != ElementKind::TextInput {
                return Err(ProbeError::InputError {
                    message: format!("{locator} is not editable"),
                });
            }
            el.value = Some(String::new());
        }
        self.fire_input(&id);
        Ok(())
    }

    async fn send_keys(&mut self, locator: &Locator, text: &str) -> ProbeResult<()> {
        self.call_history.push(format!("send_keys:{locator}"));
        let id = self.first_id(locator)?;
        if let Some(el) = self.dom.get_mut(&id) {
            if el.kind != ElementKind::TextInput {
                return Err(ProbeError::InputError {
                    message: format!("{locator} is not editable"),
                });
            }
            let mut value = el.value.take().unwrap_or_default();
            value.push_str(text);
            if let Some(max) = el.max_length {
                value = value.chars().take(max).collect();
            }
            el.value = Some(value);
        }
        self.fire_input(&id);
        Ok(())
    }

    async fn select_by_visible_text(&mut self, locator: &Locator, text: &str) -> ProbeResult<()> {
        self.call_history.push(format!("select:{locator}"));
        let id = self.first_id(locator)?;
        let el = self
            .dom
            .get_mut(&id)
            .ok_or_else(|| ProbeError::ElementNotFound {
                locator: locator.to_string(),
                timeout_ms: 0,
            })?;
        let ElementKind::Select(options) = &el.kind else {
            return Err(ProbeError::InputError {
                message: format!("{locator} is not a <select>"),
            });
        };
        if !options.iter().any(|o| o.trim() == text) {
            return Err(ProbeError::OptionNotFound {
                locator: locator.to_string(),
                text: text.to_string(),
            });
        }
        el.value = Some(text.to_string());
        el.text = text.to_string();
        self.fire_input(&id);
        Ok(())
    }

    async fn screenshot(&self) -> ProbeResult<Vec<u8>> {
        Ok(self.screenshot.clone())
    }

    async fn close(&mut self) -> ProbeResult<()> {
        self.call_history.push("close".to_string());
        self.closed = true;
        Ok(())
    }
}

// =============================================================================
// SIMULATED CONTACT FORM
// =============================================================================

/// Text shown in `#successMessage` after a valid submission
pub const SUCCESS_TEXT: &str =
    "Форма успешно отправлена! Мы свяжемся с вами в ближайшее время.";
/// Text shown in `#errorMessage` after an invalid submission
pub const ERROR_TEXT: &str = "Пожалуйста, исправьте ошибки в форме.";
/// Field error for an empty required field
pub const REQUIRED_TEXT: &str = "Поле обязательно для заполнения";
/// Field error for a malformed email
pub const INVALID_EMAIL_TEXT: &str = "Введите корректный email";
/// Field error for a malformed phone number
pub const INVALID_PHONE_TEXT: &str = "Введите корректный номер телефона";
/// Field error for missing consent
pub const AGREEMENT_TEXT: &str = "Необходимо согласие на обработку данных";
/// Age group option texts
pub const AGE_OPTIONS: [&str; 5] = [
    "Выберите возраст",
    "18-25 лет",
    "26-35 лет",
    "36-45 лет",
    "46+ лет",
];

/// Validation switches of the simulated form.
///
/// The real form under test is known to skip some checks; turning a switch
/// off reproduces that gap so the suite's known-bug reporting can be
/// exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormBehavior {
    /// Reject emails without `@` and a dotted domain
    pub validate_email_format: bool,
    /// Reject submissions with the agreement unchecked
    pub require_agreement: bool,
}

impl Default for FormBehavior {
    fn default() -> Self {
        Self {
            validate_email_format: true,
            require_agreement: true,
        }
    }
}

const TEXT_FIELDS: [&str; 4] = ["name", "email", "phone", "message"];
const CHECKBOXES: [&str; 2] = ["agree", "subscribe"];
const RADIOS: [&str; 3] = ["question", "complaint", "suggestion"];
const ERROR_IDS: [&str; 6] = [
    "nameError",
    "emailError",
    "phoneError",
    "subjectError",
    "messageError",
    "agreeError",
];

/// Simulated contact form with default (strict) validation
#[must_use]
pub fn contact_form() -> MockDriver {
    contact_form_with(FormBehavior::default())
}

/// Simulated contact form with the given validation behavior
#[must_use]
pub fn contact_form_with(behavior: FormBehavior) -> MockDriver {
    let mut dom = MockDom::new();
    for id in ["name", "email", "phone"] {
        dom.insert(MockElement::input(id));
    }
    dom.insert(MockElement::select("age", &AGE_OPTIONS));
    dom.insert(MockElement::textarea("message", Some(MESSAGE_MAX_CHARS)));
    for id in RADIOS {
        dom.insert(MockElement::radio(id, "subject"));
    }
    for id in CHECKBOXES {
        dom.insert(MockElement::checkbox(id));
    }
    dom.insert(MockElement::button("submitBtn", "Отправить"));
    dom.insert(MockElement::button("resetBtn", "Очистить"));
    dom.insert(MockElement::text("successMessage", "div", SUCCESS_TEXT, false));
    dom.insert(MockElement::text("errorMessage", "div", ERROR_TEXT, false));
    for id in ERROR_IDS {
        dom.insert(MockElement::text(id, "span", "", true));
    }
    dom.insert(MockElement::text(
        "messageCounter",
        "span",
        &counter_text(""),
        true,
    ));

    let mut driver = MockDriver::with_dom(dom);
    driver.on_input(
        "message",
        Arc::new(|dom: &mut MockDom| {
            let text = counter_text(dom.value("message"));
            dom.set_text("messageCounter", text);
        }),
    );
    driver.on_click(
        "submitBtn",
        Arc::new(move |dom: &mut MockDom| submit(dom, behavior)),
    );
    driver.on_click("resetBtn", Arc::new(reset));
    driver
}

fn counter_text(message: &str) -> String {
    format!("{}/{MESSAGE_MAX_CHARS}", message.chars().count())
}

fn looks_like_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}

fn submit(dom: &mut MockDom, behavior: FormBehavior) {
    let mut errors: Vec<(&str, &str)> = Vec::new();

    if dom.value("name").trim().is_empty() {
        errors.push(("nameError", REQUIRED_TEXT));
    }

    let email = dom.value("email").trim().to_string();
    if email.is_empty() {
        errors.push(("emailError", REQUIRED_TEXT));
    } else if behavior.validate_email_format && !looks_like_email(&email) {
        errors.push(("emailError", INVALID_EMAIL_TEXT));
    }

    let phone_digits = dom
        .value("phone")
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    if !dom.value("phone").trim().is_empty() && phone_digits < 10 {
        errors.push(("phoneError", INVALID_PHONE_TEXT));
    }

    if dom.value("message").trim().is_empty() {
        errors.push(("messageError", REQUIRED_TEXT));
    }

    if behavior.require_agreement && !dom.is_selected("agree") {
        errors.push(("agreeError", AGREEMENT_TEXT));
    }

    for id in ERROR_IDS {
        dom.set_text(id, "");
    }
    for (id, text) in &errors {
        dom.set_text(id, *text);
    }

    let ok = errors.is_empty();
    dom.set_displayed("successMessage", ok);
    dom.set_displayed("errorMessage", !ok);
}

fn reset(dom: &mut MockDom) {
    for id in TEXT_FIELDS {
        if let Some(el) = dom.get_mut(id) {
            el.value = Some(String::new());
        }
    }
    if let Some(el) = dom.get_mut("age") {
        el.value = Some(String::new());
        el.text = AGE_OPTIONS[0].to_string();
    }
    for id in CHECKBOXES.iter().chain(RADIOS.iter()) {
        if let Some(el) = dom.get_mut(id) {
            el.selected = false;
        }
    }
    for id in ERROR_IDS {
        dom.set_text(id, "");
    }
    dom.set_text("messageCounter", counter_text(""));
    dom.set_displayed("successMessage", false);
    dom.set_displayed("errorMessage", false);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod dom_tests {
        use super::*;

        #[test]
        fn test_matching_strategies() {
            let driver = contact_form();
            let dom = driver.dom();
            assert_eq!(dom.matching(&Locator::id("email")), vec!["email"]);
            assert_eq!(dom.matching(&Locator::css("#email")), vec!["email"]);
            assert_eq!(
                dom.matching(&Locator::name("subject")),
                vec!["question", "complaint", "suggestion"]
            );
            assert_eq!(
                dom.matching(&Locator::new(By::TagName, "button")),
                vec!["submitBtn", "resetBtn"]
            );
            assert!(dom.matching(&Locator::xpath("//input")).is_empty());
        }

        #[test]
        fn test_insert_replaces_without_reordering() {
            let mut dom = MockDom::new();
            dom.insert(MockElement::input("a"));
            dom.insert(MockElement::input("b"));
            dom.insert(MockElement::text("a", "span", "x", true));
            assert_eq!(dom.matching(&Locator::new(By::TagName, "span")), vec!["a"]);
            assert_eq!(dom.order, vec!["a", "b"]);
        }
    }

    mod driver_tests {
        use super::*;

        #[tokio::test]
        async fn test_checkbox_toggles() {
            let mut driver = contact_form();
            let agree = Locator::id("agree");
            driver.click(&agree).await.unwrap();
            assert!(driver.dom().is_selected("agree"));
            driver.click(&agree).await.unwrap();
            assert!(!driver.dom().is_selected("agree"));
        }

        #[tokio::test]
        async fn test_radio_group_is_exclusive() {
            let mut driver = contact_form();
            driver.click(&Locator::id("question")).await.unwrap();
            driver.click(&Locator::id("complaint")).await.unwrap();
            assert!(!driver.dom().is_selected("question"));
            assert!(driver.dom().is_selected("complaint"));
            assert!(!driver.dom().is_selected("suggestion"));
        }

        #[tokio::test]
        async fn test_send_keys_appends_and_truncates() {
            let mut driver = contact_form();
            let message = Locator::id("message");
            driver.send_keys(&message, "ab").await.unwrap();
            driver.send_keys(&message, "cd").await.unwrap();
            assert_eq!(driver.dom().value("message"), "abcd");

            driver.clear(&message).await.unwrap();
            driver.send_keys(&message, &"я".repeat(600)).await.unwrap();
            assert_eq!(driver.dom().value("message").chars().count(), 500);
            assert_eq!(driver.dom().get("messageCounter").unwrap().text, "500/500");
        }

        #[tokio::test]
        async fn test_send_keys_rejects_non_editable() {
            let mut driver = contact_form();
            let err = driver
                .send_keys(&Locator::id("submitBtn"), "x")
                .await
                .unwrap_err();
            assert!(matches!(err, ProbeError::InputError { .. }));
        }

        #[tokio::test]
        async fn test_click_missing_element() {
            let mut driver = MockDriver::new();
            let err = driver.click(&Locator::id("nope")).await.unwrap_err();
            assert!(matches!(err, ProbeError::ElementNotFound { .. }));
        }

        #[tokio::test]
        async fn test_select_by_visible_text() {
            let mut driver = contact_form();
            let age = Locator::id("age");
            driver.select_by_visible_text(&age, "26-35 лет").await.unwrap();
            assert_eq!(driver.dom().value("age"), "26-35 лет");

            let err = driver
                .select_by_visible_text(&age, "100+ лет")
                .await
                .unwrap_err();
            assert!(matches!(err, ProbeError::OptionNotFound { .. }));
        }

        #[tokio::test]
        async fn test_hidden_element_reports_no_text() {
            let mut driver = MockDriver::new();
            driver.add_element(MockElement::text("agreeError", "span", "Нужно согласие", false));
            let state = driver.query(&Locator::id("agreeError")).await.unwrap().unwrap();
            assert!(!state.displayed);
            assert_eq!(state.text, "");

            driver.dom_mut().set_displayed("agreeError", true);
            let state = driver.query(&Locator::id("agreeError")).await.unwrap().unwrap();
            assert_eq!(state.text, "Нужно согласие");
        }

        #[tokio::test]
        async fn test_history_and_close() {
            let mut driver = MockDriver::new();
            driver.navigate("file:///tmp/contact_form.html").await.unwrap();
            driver.close().await.unwrap();
            assert!(driver.was_called("navigate"));
            assert!(driver.was_called("close"));
            assert!(driver.is_closed());
            assert_eq!(
                driver.current_url().await.unwrap(),
                "file:///tmp/contact_form.html"
            );
        }
    }

    mod form_behavior_tests {
        use super::*;

        async fn fill(driver: &mut MockDriver, id: &'static str, text: &str) {
            driver.send_keys(&Locator::id(id), text).await.unwrap();
        }

        #[tokio::test]
        async fn test_valid_submission_shows_success() {
            let mut driver = contact_form();
            fill(&mut driver, "name", "Тест").await;
            fill(&mut driver, "email", "test@example.com").await;
            fill(&mut driver, "message", "Привет").await;
            driver.click(&Locator::id("agree")).await.unwrap();
            driver.click(&Locator::id("submitBtn")).await.unwrap();

            let dom = driver.dom();
            assert!(dom.get("successMessage").unwrap().displayed);
            assert!(!dom.get("errorMessage").unwrap().displayed);
        }

        #[tokio::test]
        async fn test_lax_form_accepts_bad_email_and_no_consent() {
            let mut driver = contact_form_with(FormBehavior {
                validate_email_format: false,
                require_agreement: false,
            });
            fill(&mut driver, "name", "Тест").await;
            fill(&mut driver, "email", "invalid-email").await;
            fill(&mut driver, "message", "Привет").await;
            driver.click(&Locator::id("submitBtn")).await.unwrap();

            let dom = driver.dom();
            assert_eq!(dom.get("emailError").unwrap().text, "");
            assert_eq!(dom.get("agreeError").unwrap().text, "");
            assert!(dom.get("successMessage").unwrap().displayed);
        }

        #[tokio::test]
        async fn test_short_phone_is_rejected() {
            let mut driver = contact_form();
            fill(&mut driver, "phone", "12-34").await;
            driver.click(&Locator::id("submitBtn")).await.unwrap();
            assert_eq!(
                driver.dom().get("phoneError").unwrap().text,
                INVALID_PHONE_TEXT
            );
        }

        #[test]
        fn test_looks_like_email() {
            assert!(looks_like_email("ivan@example.com"));
            assert!(!looks_like_email("invalid-email"));
            assert!(!looks_like_email("@example.com"));
            assert!(!looks_like_email("ivan@localhost"));
        }
    }
}
