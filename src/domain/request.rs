use std::ops::RangeInclusive;

use crate::app::{Result, VitrinaError};

/// Number of result pages a single request may walk
pub const PAGE_COUNT_RANGE: RangeInclusive<u32> = 1..=5;

/// A search on one retail site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    search_term: String,
    site_key: String,
    page_count: u32,
}

impl ScrapeRequest {
    pub fn new(
        search_term: impl Into<String>,
        site_key: impl Into<String>,
        page_count: u32,
    ) -> Result<Self> {
        let search_term = search_term.into();
        if search_term.trim().is_empty() {
            return Err(VitrinaError::InvalidRequest(
                "search term must not be empty".into(),
            ));
        }

        if !PAGE_COUNT_RANGE.contains(&page_count) {
            return Err(VitrinaError::InvalidRequest(format!(
                "page count must be between {} and {}, got {}",
                PAGE_COUNT_RANGE.start(),
                PAGE_COUNT_RANGE.end(),
                page_count
            )));
        }

        Ok(Self {
            search_term: search_term.trim().to_string(),
            site_key: site_key.into(),
            page_count,
        })
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn site_key(&self) -> &str {
        &self.site_key
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = ScrapeRequest::new(" laptop ", "mercadolibre", 2).unwrap();
        assert_eq!(request.search_term(), "laptop");
        assert_eq!(request.site_key(), "mercadolibre");
        assert_eq!(request.page_count(), 2);
    }

    #[test]
    fn test_page_count_bounds() {
        assert!(ScrapeRequest::new("laptop", "exito", 1).is_ok());
        assert!(ScrapeRequest::new("laptop", "exito", 5).is_ok());
        assert!(matches!(
            ScrapeRequest::new("laptop", "exito", 0),
            Err(VitrinaError::InvalidRequest(_))
        ));
        assert!(matches!(
            ScrapeRequest::new("laptop", "exito", 6),
            Err(VitrinaError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_blank_term_rejected() {
        assert!(ScrapeRequest::new("   ", "exito", 1).is_err());
    }
}
