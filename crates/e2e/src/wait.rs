//! Polling waits against the live page
//!
//! The CDP binding has no Playwright-style network-idle primitive, so
//! settling after a click is expressed as "poll the DOM until the
//! selector (dis)appears, give up after a deadline". A driver error
//! during a poll aborts the wait immediately so failures surface at
//! their cause instead of degrading into a timeout.

use std::future::Future;
use std::time::{Duration, Instant};

use chromiumoxide::Page;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{E2eError, E2eResult};

/// How long to poll and how often.
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(250),
        }
    }
}

impl WaitConfig {
    /// Wait configuration with a caller-supplied overall timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

/// Wait until at least one element matches `selector`.
pub async fn for_selector(page: &Page, selector: &str, config: &WaitConfig) -> E2eResult<()> {
    for_min_count(page, selector, 1, config).await
}

/// Wait until at least `min` elements match `selector`.
pub async fn for_min_count(
    page: &Page,
    selector: &str,
    min: usize,
    config: &WaitConfig,
) -> E2eResult<()> {
    let description = format!("{selector} to match at least {min} element(s)");
    let count = poll_count(
        &description,
        config,
        move || async move { Ok(page.find_elements(selector).await?.len()) },
        move |count| count >= min,
    )
    .await?;
    debug!(selector, count, "selector settled");
    Ok(())
}

/// Wait until no element matches `selector`.
pub async fn for_selector_gone(
    page: &Page,
    selector: &str,
    config: &WaitConfig,
) -> E2eResult<()> {
    let description = format!("{selector} to disappear");
    poll_count(
        &description,
        config,
        move || async move { Ok(page.find_elements(selector).await?.len()) },
        |count| count == 0,
    )
    .await?;
    Ok(())
}

/// Poll `probe` until `accept` is satisfied or the deadline passes.
///
/// A probe error ends the wait immediately; only a stale-but-healthy
/// DOM turns into [`E2eError::Timeout`].
async fn poll_count<F, Fut, A>(
    description: &str,
    config: &WaitConfig,
    mut probe: F,
    accept: A,
) -> E2eResult<usize>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<usize>>,
    A: Fn(usize) -> bool,
{
    let start = Instant::now();
    loop {
        let count = probe().await?;
        if accept(count) {
            return Ok(count);
        }
        if start.elapsed() >= config.timeout {
            return Err(E2eError::Timeout(format!("{description}, saw {count}")));
        }
        sleep(config.poll_interval).await;
    }
}
