//! Chronological-order check for the `/newest` listing
//!
//! Collects exactly 100 item timestamps across paginated loads and
//! asserts the sequence is non-increasing (newest first, ties
//! permitted).

mod common;

use chrono::NaiveDateTime;
use hn_e2e::newest::{first_order_violation, NewestPage};
use hn_e2e::{BrowserSession, E2eConfig, E2eResult};

/// Number of timestamps to collect before evaluating order.
const TARGET: usize = 100;

#[tokio::test]
async fn newest_listing_is_newest_first_across_pagination() {
    hn_e2e::init_logging();
    let config = E2eConfig::from_env().expect("e2e configuration");

    if !common::site_reachable(&config).await {
        return;
    }
    let Some(session) = common::launch_browser(&config).await else {
        return;
    };

    // Collect before asserting so the browser closes on every path.
    let collected = collect(&session, &config).await;
    session.close().await.expect("browser shutdown");

    let stamps = collected.expect("collect listing timestamps");
    assert_eq!(
        stamps.len(),
        TARGET,
        "expected exactly {TARGET} timestamps, collected {}",
        stamps.len()
    );

    if let Some(i) = first_order_violation(&stamps) {
        panic!(
            "listing out of order at item {i}: {} is newer than the preceding {}",
            stamps[i],
            stamps[i - 1]
        );
    }
}

async fn collect(session: &BrowserSession, config: &E2eConfig) -> E2eResult<Vec<NaiveDateTime>> {
    let listing = NewestPage::open(session, config).await?;
    listing.collect_timestamps(TARGET).await
}
