//! Locators: (strategy, value) pairs identifying DOM elements.
//!
//! A [`Locator`] never touches the browser itself. Drivers turn it into a
//! DOM query expression with [`Locator::to_query`] / [`Locator::to_all_query`]
//! and evaluate that in the page.

use std::fmt;

/// Strategy used to locate an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum By {
    /// `id` attribute
    Id,
    /// CSS selector
    Css,
    /// `name` attribute
    Name,
    /// XPath expression
    XPath,
    /// Single class name
    ClassName,
    /// Tag name
    TagName,
}

impl By {
    /// Strategy name as shown in error messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Css => "css selector",
            Self::Name => "name",
            Self::XPath => "xpath",
            Self::ClassName => "class name",
            Self::TagName => "tag name",
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (strategy, value) pair identifying one or more DOM elements.
///
/// Locators are `const`-constructible so page objects can declare them as
/// associated constants:
///
/// ```
/// use formprobe::{By, Locator};
///
/// const NAME_INPUT: Locator = Locator::id("name");
/// assert_eq!(NAME_INPUT.by, By::Id);
/// assert_eq!(NAME_INPUT.to_string(), "(id, name)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locator {
    /// Location strategy
    pub by: By,
    /// Strategy-specific value
    pub value: &'static str,
}

impl Locator {
    /// Create a locator from a strategy and value
    #[must_use]
    pub const fn new(by: By, value: &'static str) -> Self {
        Self { by, value }
    }

    /// Locate by `id`
    #[must_use]
    pub const fn id(value: &'static str) -> Self {
        Self::new(By::Id, value)
    }

    /// Locate by CSS selector
    #[must_use]
    pub const fn css(value: &'static str) -> Self {
        Self::new(By::Css, value)
    }

    /// Locate by `name` attribute
    #[must_use]
    pub const fn name(value: &'static str) -> Self {
        Self::new(By::Name, value)
    }

    /// Locate by XPath
    #[must_use]
    pub const fn xpath(value: &'static str) -> Self {
        Self::new(By::XPath, value)
    }

    /// JavaScript expression evaluating to the first match or `null`
    #[must_use]
    pub fn to_query(&self) -> String {
        let v = js_string(self.value);
        match self.by {
            By::Id => format!("document.getElementById({v})"),
            By::Css => format!("document.querySelector({v})"),
            By::Name => format!("(document.getElementsByName({v})[0] || null)"),
            By::XPath => format!(
                "document.evaluate({v}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            ),
            By::ClassName => format!("(document.getElementsByClassName({v})[0] || null)"),
            By::TagName => format!("(document.getElementsByTagName({v})[0] || null)"),
        }
    }

    /// JavaScript expression evaluating to an array of all matches
    #[must_use]
    pub fn to_all_query(&self) -> String {
        let v = js_string(self.value);
        match self.by {
            By::Id => format!("[document.getElementById({v})].filter(Boolean)"),
            By::Css => format!("Array.from(document.querySelectorAll({v}))"),
            By::Name => format!("Array.from(document.getElementsByName({v}))"),
            By::XPath => format!(
                "(function() {{ const r = document.evaluate({v}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 const out = []; for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); return out; }})()"
            ),
            By::ClassName => format!("Array.from(document.getElementsByClassName({v}))"),
            By::TagName => format!("Array.from(document.getElementsByTagName({v}))"),
        }
    }
}

/// Quote `s` as a JavaScript string literal
#[must_use]
pub fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.by, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod query_tests {
        use super::*;

        #[test]
        fn test_id_query() {
            assert_eq!(
                Locator::id("email").to_query(),
                "document.getElementById(\"email\")"
            );
        }

        #[test]
        fn test_css_query_escapes_quotes() {
            let q = Locator::css("input[name=\"agree\"]").to_query();
            assert_eq!(q, r#"document.querySelector("input[name=\"agree\"]")"#);
        }

        #[test]
        fn test_xpath_query() {
            let q = Locator::xpath("//button").to_query();
            assert!(q.starts_with("document.evaluate(\"//button\""));
            assert!(q.ends_with("singleNodeValue"));
        }

        #[test]
        fn test_all_queries_return_arrays() {
            for by in [By::Id, By::Css, By::Name, By::ClassName, By::TagName] {
                let q = Locator::new(by, "x").to_all_query();
                assert!(
                    q.starts_with("Array.from") || q.starts_with('['),
                    "{by}: {q}"
                );
            }
            assert!(Locator::xpath("//x").to_all_query().contains("snapshotItem"));
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_display() {
            assert_eq!(Locator::id("submitBtn").to_string(), "(id, submitBtn)");
            assert_eq!(Locator::css(".error").to_string(), "(css selector, .error)");
        }

        #[test]
        fn test_const_construction() {
            const AGREE: Locator = Locator::name("agree");
            assert_eq!(AGREE.by, By::Name);
            assert_eq!(AGREE.value, "agree");
        }
    }
}
