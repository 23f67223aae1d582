use tracing::{debug, info};

use crate::app::Result;
use crate::browser::PageHandle;
use crate::retail::pacing::{DelayRange, Pacing};
use crate::retail::site::SiteProfile;

/// Type `term` into the site's search box and wait for the result list.
///
/// Any bounded wait that runs out is returned as an error; the caller decides
/// whether the run survives it.
pub async fn execute(
    page: &dyn PageHandle,
    site: &SiteProfile,
    term: &str,
    pacing: &dyn Pacing,
) -> Result<()> {
    let selectors = &site.selectors;
    let timing = &site.timing;

    let input = page
        .wait_for_selector(&selectors.search_input, timing.search_input_timeout)
        .await?;
    input.fill(term).await?;

    match selectors.search_button {
        Some(ref button) => {
            let button = page
                .wait_for_selector(button, timing.search_button_timeout)
                .await?;
            button.click().await?;
        }
        None => input.press_enter().await?,
    }
    debug!(site = %site.name, term, "search submitted");

    info!(
        site = %site.name,
        wait_secs = timing.post_search_wait.as_secs_f32(),
        "Waiting for results to render"
    );
    pacing.pause(DelayRange::fixed(timing.post_search_wait)).await;

    page.wait_for_selector(&selectors.product_container, timing.results_timeout)
        .await?;
    pacing.pause(timing.results_delay).await;

    Ok(())
}
