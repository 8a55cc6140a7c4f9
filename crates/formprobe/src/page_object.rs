//! Page Object Model support.
//!
//! A page object encapsulates the locators and interactions of one UI page.
//! This trait carries the page-level metadata shared by all of them.

/// Trait for page objects representing a page or form in the UI.
///
/// # Example
///
/// ```
/// use formprobe::PageObject;
///
/// struct LoginPage;
///
/// impl PageObject for LoginPage {
///     fn url_pattern(&self) -> &str {
///         "/login"
///     }
/// }
///
/// assert!(LoginPage.matches_url("https://example.com/login?next=/"));
/// assert!(!LoginPage.matches_url("https://example.com/register"));
/// ```
pub trait PageObject {
    /// Suffix of the URL path this page lives at (e.g. `/login`, `form.html`)
    fn url_pattern(&self) -> &str;

    /// Page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Wait time for the page to become ready (in milliseconds)
    fn load_timeout_ms(&self) -> u64 {
        10_000
    }

    /// Whether `url` (ignoring query and fragment) points at this page
    fn matches_url(&self, url: &str) -> bool {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        path.ends_with(self.url_pattern())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestPage {
        url: String,
    }

    impl PageObject for TestPage {
        fn url_pattern(&self) -> &str {
            &self.url
        }

        fn load_timeout_ms(&self) -> u64 {
            5000
        }
    }

    #[test]
    fn test_custom_page_object() {
        let page = TestPage {
            url: "contact_form.html".to_string(),
        };
        assert_eq!(PageObject::load_timeout_ms(&page), 5000);
        assert!(page.page_name().contains("TestPage"));
    }

    #[test]
    fn test_matches_url_ignores_query_and_fragment() {
        let page = TestPage {
            url: "contact_form.html".to_string(),
        };
        assert!(page.matches_url("file:///srv/site/contact_form.html"));
        assert!(page.matches_url("file:///srv/site/contact_form.html#top"));
        assert!(page.matches_url("http://localhost/contact_form.html?lang=ru"));
        assert!(!page.matches_url("file:///srv/site/index.html"));
    }
}
