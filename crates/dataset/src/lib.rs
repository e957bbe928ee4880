use std::{collections::HashSet, io::Read, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::domain::{LaunchRecord, Outcome, PayloadRange};
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_DATASET_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBM-DS0321EN-SkillsNetwork/datasets/spacex_launch_dash.csv";

const LAUNCH_SITE_COLUMN: &str = "Launch Site";
const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
const BOOSTER_COLUMN: &str = "Booster Version";
const CLASS_COLUMN: &str = "class";

const REQUIRED_COLUMNS: [&str; 4] = [
    LAUNCH_SITE_COLUMN,
    PAYLOAD_COLUMN,
    BOOSTER_COLUMN,
    CLASS_COLUMN,
];

#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "class")]
    class: u8,
}

impl TryFrom<RawLaunchRow> for LaunchRecord {
    type Error = anyhow::Error;

    fn try_from(row: RawLaunchRow) -> Result<Self> {
        Ok(LaunchRecord {
            launch_site: row.launch_site,
            payload_mass_kg: row.payload_mass_kg,
            booster_version: row.booster_version,
            outcome: Outcome::try_from(row.class)?,
        })
    }
}

/// Immutable in-memory launch table. Record order is file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
}

impl LaunchTable {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        Self { records }
    }

    /// Parses CSV text. Rows that fail to deserialize are skipped; the number
    /// skipped is returned alongside the table. A missing required column is
    /// an error.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<(Self, usize)> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().context("failed to read csv header")?;
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                bail!("dataset is missing required column '{column}'");
            }
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (index, row) in reader.deserialize::<RawLaunchRow>().enumerate() {
            let parsed = row
                .map_err(anyhow::Error::from)
                .and_then(LaunchRecord::try_from);
            match parsed {
                Ok(record) => records.push(record),
                Err(error) => {
                    debug!(
                        row = index + 1,
                        error = %format!("{error:#}"),
                        "skipping malformed dataset row"
                    );
                    skipped += 1;
                }
            }
        }

        Ok((Self { records }, skipped))
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct launch sites in order of first appearance.
    pub fn distinct_sites(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|record| seen.insert(record.launch_site.as_str()))
            .map(|record| record.launch_site.clone())
            .collect()
    }

    pub fn payload_bounds(&self) -> Option<PayloadRange> {
        let mut payloads = self.records.iter().map(|record| record.payload_mass_kg);
        let first = payloads.next()?;
        let (low, high) = payloads.fold((first, first), |(low, high), payload| {
            (low.min(payload), high.max(payload))
        });
        Some(PayloadRange::new(low, high))
    }
}

#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;
    fn describe(&self) -> String;
}

pub struct HttpSource {
    url: Url,
    http: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .with_context(|| format!("failed to reach dataset at {}", self.url))?
            .error_for_status()
            .with_context(|| format!("dataset request to {} failed", self.url))?;
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read dataset file '{}'", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Picks a source for a configured dataset location: `http(s)://` and
/// `file://` URLs are honored, anything else is a filesystem path.
pub fn source_from_str(raw: &str) -> Arc<dyn DatasetSource> {
    let raw = raw.trim();
    if let Ok(url) = Url::parse(raw) {
        match url.scheme() {
            "http" | "https" => return Arc::new(HttpSource::new(url)),
            "file" => {
                if let Ok(path) = url.to_file_path() {
                    return Arc::new(FileSource::new(path));
                }
            }
            _ => {}
        }
    }
    Arc::new(FileSource::new(raw))
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub table: LaunchTable,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub skipped_rows: usize,
}

pub async fn load(source: &dyn DatasetSource) -> Result<LoadedDataset> {
    let description = source.describe();
    let body = source.fetch().await?;
    let (table, skipped_rows) = LaunchTable::from_csv_reader(body.as_bytes())
        .with_context(|| format!("failed to parse dataset from {description}"))?;

    if skipped_rows > 0 {
        warn!(source = %description, skipped_rows, "skipped malformed dataset rows");
    }
    info!(
        source = %description,
        records = table.len(),
        sites = table.distinct_sites().len(),
        "dataset loaded"
    );

    Ok(LoadedDataset {
        table,
        source: description,
        loaded_at: Utc::now(),
        skipped_rows,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
