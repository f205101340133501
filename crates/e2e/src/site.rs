//! Reachability probe for the site under test
//!
//! The site is remote and externally owned, so before spending a
//! browser launch on it the tests make one plain HTTP request. An
//! unreachable site is a skip condition, not a failure.

use std::time::Duration;

use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};

/// Probe `base_url` with a single GET request.
pub async fn ensure_reachable(base_url: &str) -> E2eResult<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let response = client.get(base_url).send().await?;
    let status = response.status();
    if status.is_success() {
        info!(%base_url, "site reachable");
        Ok(())
    } else {
        warn!(%base_url, %status, "site returned non-success status");
        Err(E2eError::SiteUnavailable(format!(
            "{base_url} answered with status {status}"
        )))
    }
}
