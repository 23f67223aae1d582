use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;
use crate::browser::ElementHandle;
use crate::domain::ProductRecord;
use crate::retail::site::{ItemEnricher, RetailSite, SiteProfile, SiteSelectorSet, SiteTiming};

pub const KEY: &str = "exito";

const BRAND_SELECTOR: &str = r#"h3[class*="styles_brand__"]"#;
const SELLER_SELECTOR: &str = r#"span[data-fs-product-details-seller__name="true"]"#;
const SELLER_PREFIX: &str = "Vendido por:";
const DEFAULT_SELLER: &str = "Éxito";

/// Éxito Colombia; results render slowly, so the post-search wait is longer
pub fn site() -> RetailSite {
    RetailSite::new(profile(), Box::new(ExitoEnricher))
}

pub fn profile() -> SiteProfile {
    SiteProfile {
        key: KEY.to_string(),
        name: "Exito".to_string(),
        base_url: "https://www.exito.com".to_string(),
        currency: "COP".to_string(),
        selectors: SiteSelectorSet {
            search_input: r#"input[data-fs-search-input="true"]"#.to_string(),
            search_button: Some(
                r#"button[type="submit"][aria-label="Submit Search"]"#.to_string(),
            ),
            product_container: r#"article[class*="productCard_productCard"]"#.to_string(),
            product_name: r#"h3[class*="styles_name__"]"#.to_string(),
            product_price: r#"p[class*="ProductPrice_container__price__"]"#.to_string(),
            product_original_price: Some(r#"p[class*="price-dashed"]"#.to_string()),
            product_link: r#"a[data-testid="product-link"]"#.to_string(),
            product_discount: Some(
                r#"[class*="priceSection_container-promotion_discount__"] span[data-percentage="true"]"#
                    .to_string(),
            ),
            next_page: Some(
                r#"button:has-text("Siguiente"), button[aria-label="Próxima Pagina"]"#.to_string(),
            ),
            cookie_accept: Some(
                r#"button:has-text("Aceptar cookies"), button#cookie-banner-lgpd-accept"#
                    .to_string(),
            ),
        },
        timing: SiteTiming {
            post_search_wait: Duration::from_secs(10),
            ..SiteTiming::default()
        },
    }
}

/// Prefixes the brand onto the product name and records the marketplace seller
pub struct ExitoEnricher;

#[async_trait]
impl ItemEnricher for ExitoEnricher {
    async fn enrich(&self, item: &dyn ElementHandle, record: &mut ProductRecord) -> Result<()> {
        if let Some(brand) = item.query_selector(BRAND_SELECTOR).await? {
            let brand = brand.inner_text().await?;
            record.name = format!("{} {}", brand.trim(), record.name);
        }

        let seller = match item.query_selector(SELLER_SELECTOR).await? {
            Some(seller) => seller
                .inner_text()
                .await?
                .replace(SELLER_PREFIX, "")
                .trim()
                .to_string(),
            None => DEFAULT_SELLER.to_string(),
        };
        record.seller = Some(seller);

        Ok(())
    }
}
