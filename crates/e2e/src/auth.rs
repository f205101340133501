//! Page object for the login / logout round trip
//!
//! Anonymous pages show a `login` link in the top bar. After a
//! successful login the top bar shows the username (`a#me`), the karma
//! score in parentheses, and a logout link (`a#logout`).

use chromiumoxide::Page;
use regex::Regex;
use tracing::info;

use crate::browser::BrowserSession;
use crate::config::{Credentials, E2eConfig};
use crate::error::{E2eError, E2eResult};
use crate::wait::{self, WaitConfig};

/// Anonymous login affordance in the top bar.
pub const LOGIN_LINK: &str = "span.pagetop a[href^=\"login\"]";

/// Identifier field on the login form.
pub const ACCT_FIELD: &str = "input[name=\"acct\"]";

/// Secret field on the login form.
pub const PW_FIELD: &str = "input[name=\"pw\"]";

/// Submit control of the login form.
pub const LOGIN_SUBMIT: &str = "input[type=\"submit\"][value=\"login\"]";

/// Authenticated username link in the top bar.
pub const ME_LINK: &str = "a#me";

/// Logout affordance in the top bar.
pub const LOGOUT_LINK: &str = "a#logout";

/// Top bar containing the whole `user (karma) | logout` banner.
pub const TOP_BAR: &str = "span.pagetop";

/// The site's front page, open in a live browser page, with login
/// and logout helpers.
pub struct AuthFlow {
    page: Page,
    wait: WaitConfig,
}

impl AuthFlow {
    /// Navigate to the front page and wait for the top bar.
    pub async fn open(session: &BrowserSession, config: &E2eConfig) -> E2eResult<Self> {
        let page = session.new_page().await?;
        info!(base_url = %config.base_url, "opening front page");
        page.goto(config.base_url.as_str()).await?;
        wait::for_selector(&page, TOP_BAR, &config.wait).await?;
        Ok(Self {
            page,
            wait: config.wait,
        })
    }

    /// Click the login affordance, fill the form, and submit. Waits
    /// until the authenticated top bar is rendered.
    pub async fn login(&self, credentials: &Credentials) -> E2eResult<()> {
        info!(username = %credentials.username, "logging in");
        self.page.find_element(LOGIN_LINK).await?.click().await?;
        self.page.wait_for_navigation().await?;
        wait::for_selector(&self.page, ACCT_FIELD, &self.wait).await?;

        // The login form is the first form on the page; find_element
        // returns the first match.
        self.page
            .find_element(ACCT_FIELD)
            .await?
            .click()
            .await?
            .type_str(&credentials.username)
            .await?;
        self.page
            .find_element(PW_FIELD)
            .await?
            .click()
            .await?
            .type_str(&credentials.password)
            .await?;
        self.page.find_element(LOGIN_SUBMIT).await?.click().await?;
        self.page.wait_for_navigation().await?;

        wait::for_selector(&self.page, LOGOUT_LINK, &self.wait).await
    }

    /// Assert the authenticated banner: `a#me` carries the expected
    /// username, the karma value is a parenthesized integer next to
    /// it, and the logout affordance is present. Returns the karma.
    pub async fn expect_authenticated(&self, username: &str) -> E2eResult<u64> {
        let me = self.page.find_element(ME_LINK).await?;
        let shown = me.inner_text().await?.unwrap_or_default();
        if shown.trim() != username {
            return Err(E2eError::Banner(format!(
                "expected username {username:?} in top bar, saw {shown:?}"
            )));
        }

        let banner = self
            .page
            .find_element(TOP_BAR)
            .await?
            .inner_text()
            .await?
            .unwrap_or_default();
        let karma = parse_karma(&banner, username)?;

        // Presence check; find_element errors if the link is missing.
        self.page.find_element(LOGOUT_LINK).await?;

        info!(username, karma, "authenticated banner verified");
        Ok(karma)
    }

    /// Click logout and wait for the anonymous top bar.
    pub async fn logout(&self) -> E2eResult<()> {
        info!("logging out");
        self.page.find_element(LOGOUT_LINK).await?.click().await?;
        self.page.wait_for_navigation().await?;
        wait::for_selector(&self.page, LOGIN_LINK, &self.wait).await
    }

    /// Assert the anonymous state: login link back, authenticated
    /// elements gone.
    pub async fn expect_anonymous(&self) -> E2eResult<()> {
        wait::for_selector(&self.page, LOGIN_LINK, &self.wait).await?;
        wait::for_selector_gone(&self.page, ME_LINK, &self.wait).await?;
        wait::for_selector_gone(&self.page, LOGOUT_LINK, &self.wait).await
    }
}

/// Extract the parenthesized karma integer that follows `username`
/// in the top bar text, e.g. `"alice (123) | logout"`.
///
/// The banner starts with static navigation text, so a bare substring
/// search for a short username can land inside a nav word. Matching
/// requires the username as a whitespace-delimited token immediately
/// followed by the parenthesized integer.
pub fn parse_karma(banner: &str, username: &str) -> E2eResult<u64> {
    let pattern = format!(r"(?:^|\s){}\s*\((\d+)\)", regex::escape(username));
    let re = Regex::new(&pattern)
        .map_err(|e| E2eError::Banner(format!("unusable banner pattern for {username:?}: {e}")))?;
    let captures = re.captures(banner).ok_or_else(|| {
        E2eError::Banner(format!(
            "no parenthesized karma after {username:?} in banner {banner:?}"
        ))
    })?;
    captures[1]
        .parse::<u64>()
        .map_err(|_| E2eError::Banner(format!("karma overflow in banner {banner:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn karma_is_extracted_from_banner() {
        let karma = parse_karma("alice (123) | logout", "alice").unwrap();
        assert_eq!(karma, 123);
    }

    #[test]
    fn karma_allows_surrounding_navigation_text() {
        let banner = "Hacker News new | past | comments  alice (7) | logout";
        assert_eq!(parse_karma(banner, "alice").unwrap(), 7);
    }

    #[test]
    fn missing_username_is_rejected() {
        let err = parse_karma("login", "alice").unwrap_err();
        assert!(matches!(err, E2eError::Banner(_)), "got {err}");
    }

    #[test]
    fn short_username_is_not_matched_inside_nav_text() {
        // "s" occurs inside "News" and "ask"/"show"; only the
        // whitespace-delimited token before the parentheses counts.
        let banner =
            "Hacker News new | past | comments | ask | show | jobs | submit  s (42) | logout";
        assert_eq!(parse_karma(banner, "s").unwrap(), 42);
    }

    #[test]
    fn username_as_suffix_of_another_word_is_rejected() {
        assert!(parse_karma("ads (42) | logout", "s").is_err());
    }

    #[test]
    fn missing_parenthesized_integer_is_rejected() {
        assert!(parse_karma("alice | logout", "alice").is_err());
        assert!(parse_karma("alice (lots) | logout", "alice").is_err());
    }

    #[test]
    fn username_with_regex_metacharacters_is_handled() {
        assert_eq!(parse_karma("a.b+c (42) | logout", "a.b+c").unwrap(), 42);
    }
}
