//! Files written by the scrapers.
//!
//! - [`RecordWriter`]: timestamped CSV/JSON reports of product records
//! - [`TextExporter`]: the latest extracted or summarized text

pub mod records;
pub mod text;

pub use records::{RecordWriter, SavedReport};
pub use text::{process_text, TextExporter, TextMode};
