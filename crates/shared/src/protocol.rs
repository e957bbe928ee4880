use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Outcome, PayloadRange, SiteSelector};

pub const SITE_DROPDOWN: &str = "site-dropdown";
pub const PAYLOAD_SLIDER: &str = "payload-slider";
pub const SUCCESS_PIE_CHART: &str = "success-pie-chart";
pub const PAYLOAD_SCATTER_CHART: &str = "success-payload-scatter-chart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|slice| slice.value).sum()
    }

    pub fn value_of(&self, label: &str) -> Option<u64> {
        self.slices
            .iter()
            .find(|slice| slice.label == label)
            .map(|slice| slice.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub booster_version: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub title: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|series| series.points.len()).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> {
        self.series.iter().flat_map(|series| series.points.iter())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: SiteSelector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropdownControl {
    pub id: String,
    pub options: Vec<DropdownOption>,
    pub value: SiteSelector,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeSliderControl {
    pub id: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
    pub value: PayloadRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardLayout {
    pub title: String,
    pub site_dropdown: DropdownControl,
    pub pie_chart_id: String,
    pub payload_slider: RangeSliderControl,
    pub scatter_chart_id: String,
}

/// One control change as posted by the page. An empty `changed` list asks
/// for every chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub changed: Vec<String>,
    pub site: SiteSelector,
    pub payload: PayloadRange,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub figures: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub source: String,
    pub records: usize,
    pub skipped_rows: usize,
    pub sites: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_bounds: Option<PayloadRange>,
    pub loaded_at: DateTime<Utc>,
}
