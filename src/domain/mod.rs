pub mod product;
pub mod request;

pub use product::{Price, ProductRecord, RECORD_FIELDS, SELLER_FIELD};
pub use request::{ScrapeRequest, PAGE_COUNT_RANGE};
