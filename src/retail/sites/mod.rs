//! Registered retail sites.

pub mod exito;
pub mod mercadolibre;

use crate::retail::site::RetailSite;

/// All supported sites, in the order they are offered to users
pub fn default_sites() -> Vec<RetailSite> {
    vec![mercadolibre::site(), exito::site()]
}
