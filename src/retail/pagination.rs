use tracing::{info, warn};

use crate::app::{Result, VitrinaError};
use crate::browser::PageHandle;
use crate::retail::pacing::Pacing;
use crate::retail::site::SiteProfile;

/// Move to the next result page.
///
/// Returns `false` when the site has no pagination, when there is no next
/// button (end of results) and when turning the page fails for any reason.
pub async fn advance(page: &dyn PageHandle, site: &SiteProfile, pacing: &dyn Pacing) -> bool {
    let Some(ref next_selector) = site.selectors.next_page else {
        warn!(site = %site.name, "Pagination unsupported: no next-page selector");
        return false;
    };

    match try_advance(page, site, next_selector, pacing).await {
        Ok(true) => {
            info!(site = %site.name, "Moved to next page");
            true
        }
        Ok(false) => {
            info!(site = %site.name, "No next-page button, end of results");
            false
        }
        Err(e) => {
            warn!(site = %site.name, error = %e, "Pagination failed");
            false
        }
    }
}

async fn try_advance(
    page: &dyn PageHandle,
    site: &SiteProfile,
    next_selector: &str,
    pacing: &dyn Pacing,
) -> Result<bool> {
    let timing = &site.timing;

    let Some(next) = page.query_selector_all(next_selector).await?.into_iter().next() else {
        return Ok(false);
    };

    next.hover().await?;
    pacing.pause(timing.hover_delay).await;

    tokio::time::timeout(timing.click_timeout, next.force_click())
        .await
        .map_err(|_| VitrinaError::SelectorTimeout {
            selector: next_selector.to_string(),
            timeout: timing.click_timeout,
        })??;

    pacing.pause(timing.page_turn_delay).await;
    page.wait_for_selector(&site.selectors.product_container, timing.next_page_timeout)
        .await?;

    Ok(true)
}
