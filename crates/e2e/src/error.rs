//! Error types for the E2E checks

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Browser command failed: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("Element {selector} has no {attribute} attribute")]
    MissingAttribute { selector: String, attribute: String },

    #[error("Unparseable timestamp title {raw:?}: {source}")]
    ParseTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Unexpected top bar state: {0}")]
    Banner(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Site unavailable: {0}")]
    SiteUnavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
