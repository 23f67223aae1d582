use std::fmt;

use serde::{Serialize, Serializer};

/// Column names, in serialization order
pub const RECORD_FIELDS: [&str; 7] = [
    "name",
    "current_price",
    "original_price",
    "discount",
    "link",
    "site",
    "captured_at",
];

/// Column appended for sites that report a seller
pub const SELLER_FIELD: &str = "seller";

/// A normalized price amount in a site's currency.
///
/// The amount holds digits only; it renders as `$<amount> <currency>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    amount: String,
    currency: String,
}

impl Price {
    pub fn new(amount: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${} {}", self.amount, self.currency)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One product listing as read from a search result page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub name: String,
    pub current_price: Price,
    /// Only set when it differs from the current price
    #[serde(serialize_with = "serialize_optional_price")]
    pub original_price: Option<Price>,
    pub discount: String,
    pub link: String,
    pub site: String,
    pub captured_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
}

impl ProductRecord {
    /// Field values in [`RECORD_FIELDS`] order, plus the seller when requested
    pub fn csv_row(&self, with_seller: bool) -> Vec<String> {
        let mut row = vec![
            self.name.clone(),
            self.current_price.to_string(),
            self.original_price
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            self.discount.clone(),
            self.link.clone(),
            self.site.clone(),
            self.captured_at.clone(),
        ];
        if with_seller {
            row.push(self.seller.clone().unwrap_or_default());
        }
        row
    }
}

fn serialize_optional_price<S: Serializer>(
    price: &Option<Price>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match price {
        Some(price) => serializer.collect_str(price),
        None => serializer.serialize_str(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProductRecord {
        ProductRecord {
            name: "Portátil Lenovo".into(),
            current_price: Price::new("1299900", "COP"),
            original_price: Some(Price::new("1599900", "COP")),
            discount: "19%".into(),
            link: "https://www.mercadolibre.com.co/p/MCO1".into(),
            site: "MercadoLibre".into(),
            captured_at: "2026-10-15 10:30".into(),
            seller: None,
        }
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new("80", "COP").to_string(), "$80 COP");
    }

    #[test]
    fn test_json_field_order_and_format() {
        let json = serde_json::to_string(&record()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Portátil Lenovo","current_price":"$1299900 COP","original_price":"$1599900 COP","discount":"19%","link":"https://www.mercadolibre.com.co/p/MCO1","site":"MercadoLibre","captured_at":"2026-10-15 10:30"}"#
        );
    }

    #[test]
    fn test_missing_original_price_serializes_empty() {
        let mut record = record();
        record.original_price = None;
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["original_price"], "");
    }

    #[test]
    fn test_seller_only_serialized_when_present() {
        let mut record = record();
        assert!(serde_json::to_value(&record).unwrap().get("seller").is_none());

        record.seller = Some("Éxito".into());
        assert_eq!(serde_json::to_value(&record).unwrap()["seller"], "Éxito");
    }

    #[test]
    fn test_csv_row_matches_fields() {
        let record = record();
        assert_eq!(record.csv_row(false).len(), RECORD_FIELDS.len());

        let row = record.csv_row(true);
        assert_eq!(row.len(), RECORD_FIELDS.len() + 1);
        assert_eq!(row[1], "$1299900 COP");
        assert_eq!(row[7], "");
    }
}
