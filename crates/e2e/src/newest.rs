//! Page object for the `/newest` listing
//!
//! Every item on the listing carries a `span.age` element whose
//! `title` attribute encodes `"ISO-8601-timestamp UNIX-seconds"`, e.g.
//! `"2025-05-26T22:19:17 1748297957"`. Only the ISO component is
//! parsed; the trailing epoch integer is redundant and ignored.

use chromiumoxide::Page;
use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::browser::BrowserSession;
use crate::config::E2eConfig;
use crate::error::{E2eError, E2eResult};
use crate::wait::{self, WaitConfig};

/// Timestamp-bearing element on each listing item.
pub const AGE_SELECTOR: &str = "span.age";

/// Attribute holding the machine-readable timestamp.
pub const AGE_TITLE_ATTR: &str = "title";

/// Pagination affordance at the bottom of the listing.
pub const MORE_SELECTOR: &str = "a.morelink";

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The `/newest` listing, open in a live browser page.
pub struct NewestPage {
    page: Page,
    wait: WaitConfig,
}

impl NewestPage {
    /// Navigate to `{base}/newest` and wait for the first batch of
    /// items to render.
    pub async fn open(session: &BrowserSession, config: &E2eConfig) -> E2eResult<Self> {
        let page = session.new_page().await?;
        let url = format!("{}/newest", config.base_url);
        info!(%url, "opening newest listing");
        page.goto(url.as_str()).await?;
        wait::for_selector(&page, AGE_SELECTOR, &config.wait).await?;
        Ok(Self {
            page,
            wait: config.wait,
        })
    }

    /// Read and parse every timestamp currently in the DOM, in
    /// document order. A missing `title` attribute aborts the check.
    pub async fn visible_timestamps(&self) -> E2eResult<Vec<NaiveDateTime>> {
        let elements = self.page.find_elements(AGE_SELECTOR).await?;
        let mut stamps = Vec::with_capacity(elements.len());
        for element in &elements {
            let title = element.attribute(AGE_TITLE_ATTR).await?;
            stamps.push(timestamp_from_title(title)?);
        }
        debug!(count = stamps.len(), "read timestamp batch");
        Ok(stamps)
    }

    /// Follow the "More" affordance and wait for the next batch to
    /// render.
    pub async fn load_more(&self) -> E2eResult<()> {
        self.page.find_element(MORE_SELECTOR).await?.click().await?;
        self.page.wait_for_navigation().await?;
        wait::for_selector(&self.page, AGE_SELECTOR, &self.wait).await
    }

    /// Accumulate exactly `target` timestamps across paginated loads.
    ///
    /// Each iteration appends at most the remaining need, so the
    /// result never overshoots even though the site pages in fixed
    /// batches.
    pub async fn collect_timestamps(&self, target: usize) -> E2eResult<Vec<NaiveDateTime>> {
        let mut collected = Vec::with_capacity(target);
        loop {
            let batch = self.visible_timestamps().await?;
            let need = target - collected.len();
            collected.extend(batch.into_iter().take(need));
            info!(collected = collected.len(), target, "pagination progress");
            if collected.len() >= target {
                return Ok(collected);
            }
            self.load_more().await?;
        }
    }
}

/// Convert a scraped `title` attribute into a timestamp.
///
/// An absent attribute is a hard error that aborts the whole check;
/// items are never silently skipped.
pub fn timestamp_from_title(title: Option<String>) -> E2eResult<NaiveDateTime> {
    let title = title.ok_or_else(|| E2eError::MissingAttribute {
        selector: AGE_SELECTOR.to_string(),
        attribute: AGE_TITLE_ATTR.to_string(),
    })?;
    parse_age_title(&title)
}

/// Parse a `span.age` title attribute into its ISO-8601 component.
pub fn parse_age_title(title: &str) -> E2eResult<NaiveDateTime> {
    let iso = title.split_whitespace().next().unwrap_or("");
    NaiveDateTime::parse_from_str(iso, ISO_FORMAT).map_err(|source| E2eError::ParseTimestamp {
        raw: title.to_string(),
        source,
    })
}

/// Index of the first out-of-order entry, if any.
///
/// Newest first: every adjacent pair must satisfy `t[i-1] >= t[i]`;
/// ties are allowed.
pub fn first_order_violation(stamps: &[NaiveDateTime]) -> Option<usize> {
    stamps.windows(2).position(|pair| pair[0] < pair[1]).map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, ISO_FORMAT).unwrap()
    }

    #[test]
    fn parses_iso_component_and_ignores_epoch() {
        let parsed = parse_age_title("2025-05-26T22:19:17 1748297957").unwrap();
        assert_eq!(parsed, ts("2025-05-26T22:19:17"));
    }

    #[test]
    fn parses_title_without_epoch_suffix() {
        let parsed = parse_age_title("2025-05-26T22:19:17").unwrap();
        assert_eq!(parsed, ts("2025-05-26T22:19:17"));
    }

    #[test]
    fn rejects_empty_title() {
        let err = parse_age_title("").unwrap_err();
        assert!(matches!(err, E2eError::ParseTimestamp { .. }), "got {err}");
    }

    #[test]
    fn rejects_garbage_title() {
        assert!(parse_age_title("5 minutes ago").is_err());
    }

    #[test]
    fn absent_title_attribute_is_a_hard_error() {
        let err = timestamp_from_title(None).unwrap_err();
        assert!(
            matches!(
                &err,
                E2eError::MissingAttribute { selector, attribute }
                    if selector == AGE_SELECTOR && attribute == AGE_TITLE_ATTR
            ),
            "got {err}"
        );
    }

    #[test]
    fn present_title_attribute_is_parsed() {
        let parsed = timestamp_from_title(Some("2025-05-26T22:19:17 1748297957".into())).unwrap();
        assert_eq!(parsed, ts("2025-05-26T22:19:17"));
    }

    #[test]
    fn descending_sequence_has_no_violation() {
        let stamps = vec![
            ts("2025-05-26T22:19:17"),
            ts("2025-05-26T22:18:00"),
            ts("2025-05-26T21:00:00"),
        ];
        assert_eq!(first_order_violation(&stamps), None);
    }

    #[test]
    fn ties_are_permitted() {
        let stamps = vec![
            ts("2025-05-26T22:19:17"),
            ts("2025-05-26T22:19:17"),
            ts("2025-05-26T22:00:00"),
        ];
        assert_eq!(first_order_violation(&stamps), None);
    }

    #[test]
    fn ascending_pair_is_flagged_at_the_newer_entry() {
        let stamps = vec![
            ts("2025-05-26T22:00:00"),
            ts("2025-05-26T21:00:00"),
            ts("2025-05-26T23:00:00"),
        ];
        assert_eq!(first_order_violation(&stamps), Some(2));
    }

    #[test]
    fn short_sequences_are_trivially_ordered() {
        assert_eq!(first_order_violation(&[]), None);
        assert_eq!(first_order_violation(&[ts("2025-05-26T22:19:17")]), None);
    }
}
