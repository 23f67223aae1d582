use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::app::Result;
use crate::domain::{ProductRecord, RECORD_FIELDS, SELLER_FIELD};

/// Paths of one saved scrape report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    pub csv: PathBuf,
    pub json: PathBuf,
}

/// Writes scrape results as a CSV/JSON pair under one report directory
#[derive(Debug, Clone)]
pub struct RecordWriter {
    dir: PathBuf,
}

impl RecordWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(
        &self,
        site_key: &str,
        term: &str,
        records: &[ProductRecord],
    ) -> Result<SavedReport> {
        self.write_at(site_key, term, records, Local::now())
    }

    /// Write both files stamped with `at`; an empty slice still produces files
    pub fn write_at(
        &self,
        site_key: &str,
        term: &str,
        records: &[ProductRecord],
        at: DateTime<Local>,
    ) -> Result<SavedReport> {
        fs::create_dir_all(&self.dir)?;

        let stem = report_stem(site_key, term, at);
        let report = SavedReport {
            csv: self.dir.join(format!("{}.csv", stem)),
            json: self.dir.join(format!("{}.json", stem)),
        };

        write_csv(&report.csv, records)?;
        write_json(&report.json, records)?;
        debug!(csv = %report.csv.display(), json = %report.json.display(), "report written");

        Ok(report)
    }

    /// Where a failed run's page capture goes; creates the report directory
    pub fn error_screenshot_path(&self, site_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        Ok(self
            .dir
            .join(format!("error_{}.png", site_name.to_lowercase())))
    }
}

fn write_csv(path: &Path, records: &[ProductRecord]) -> Result<()> {
    let with_seller = records.iter().any(|r| r.seller.is_some());

    let mut writer = csv::Writer::from_path(path)?;
    let mut header: Vec<&str> = RECORD_FIELDS.to_vec();
    if with_seller {
        header.push(SELLER_FIELD);
    }
    writer.write_record(&header)?;

    for record in records {
        writer.write_record(record.csv_row(with_seller))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(path: &Path, records: &[ProductRecord]) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}

/// `{site_key}_{term}_{YYYYMMDD_HHMMSS}`, with the term made safe for file names
pub fn report_stem(site_key: &str, term: &str, at: DateTime<Local>) -> String {
    format!(
        "{}_{}_{}",
        site_key,
        sanitize_term(term),
        at.format("%Y%m%d_%H%M%S")
    )
}

fn sanitize_term(term: &str) -> String {
    term.trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\') {
                '_'
            } else {
                c
            }
        })
        .collect()
}
