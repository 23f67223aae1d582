use chrono::Local;
use tracing::warn;
use url::Url;

use crate::app::Result;
use crate::browser::ElementHandle;
use crate::domain::{Price, ProductRecord};
use crate::retail::price::{compute_discount, normalize_price};
use crate::retail::site::SiteProfile;

pub const UNNAMED_PRODUCT: &str = "Unnamed product";
pub const MISSING_LINK: &str = "#";

/// Read one result card into a record.
///
/// Missing fields fall back to defaults; a driver error while reading the
/// card drops just this card.
pub async fn extract(item: &dyn ElementHandle, site: &SiteProfile) -> Option<ProductRecord> {
    match try_extract(item, site).await {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(site = %site.name, error = %e, "Failed to extract product");
            None
        }
    }
}

async fn try_extract(item: &dyn ElementHandle, site: &SiteProfile) -> Result<ProductRecord> {
    let selectors = &site.selectors;

    let name = text_of(item, Some(&selectors.product_name))
        .await?
        .unwrap_or_else(|| UNNAMED_PRODUCT.to_string());

    let current = normalize_price(
        &text_of(item, Some(&selectors.product_price))
            .await?
            .unwrap_or_else(|| "0".to_string()),
    );

    let original = match text_of(item, selectors.product_original_price.as_deref()).await? {
        Some(text) => normalize_price(&text),
        None => current.clone(),
    };

    let link = match item.query_selector(&selectors.product_link).await? {
        Some(anchor) => match anchor.attribute("href").await? {
            Some(href) => resolve_link(&site.base_url, &href),
            None => MISSING_LINK.to_string(),
        },
        None => MISSING_LINK.to_string(),
    };

    let discount = match text_of(item, selectors.product_discount.as_deref()).await? {
        Some(badge) => badge,
        None => compute_discount(&original, &current),
    };

    let original_price = (original != current).then(|| Price::new(original, &site.currency));

    Ok(ProductRecord {
        name,
        current_price: Price::new(current, &site.currency),
        original_price,
        discount,
        link,
        site: site.name.clone(),
        captured_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
        seller: None,
    })
}

/// Trimmed inner text of the first match, `None` when there is no selector or no match
async fn text_of(item: &dyn ElementHandle, selector: Option<&str>) -> Result<Option<String>> {
    let Some(selector) = selector else {
        return Ok(None);
    };
    match item.query_selector(selector).await? {
        Some(element) => Ok(Some(element.inner_text().await?.trim().to_string())),
        None => Ok(None),
    }
}

/// Make `href` absolute against `base_url`; absolute hrefs are returned unchanged
pub fn resolve_link(base_url: &str, href: &str) -> String {
    let href = href.trim();
    if Url::parse(href).is_ok() {
        return href.to_string();
    }
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}{}", base_url, href),
    }
}
