use crate::retail::site::{NoEnrichment, RetailSite, SiteProfile, SiteSelectorSet, SiteTiming};

pub const KEY: &str = "mercadolibre";

/// Mercado Libre Colombia
pub fn site() -> RetailSite {
    RetailSite::new(profile(), Box::new(NoEnrichment))
}

pub fn profile() -> SiteProfile {
    SiteProfile {
        key: KEY.to_string(),
        name: "MercadoLibre".to_string(),
        base_url: "https://www.mercadolibre.com.co".to_string(),
        currency: "COP".to_string(),
        selectors: SiteSelectorSet {
            search_input: "input.nav-search-input".to_string(),
            search_button: None,
            product_container: "div.poly-card__content".to_string(),
            product_name: "a.poly-component__title".to_string(),
            product_price: ".poly-price__current .andes-money-amount__fraction".to_string(),
            product_original_price: Some("s .andes-money-amount__fraction".to_string()),
            product_link: "a.poly-component__title".to_string(),
            product_discount: Some(".andes-money-amount__discount".to_string()),
            next_page: Some("li.andes-pagination__button--next a".to_string()),
            cookie_accept: Some("button:has-text('Aceptar cookies')".to_string()),
        },
        timing: SiteTiming::default(),
    }
}
