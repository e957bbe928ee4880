use std::{collections::HashMap, sync::Arc};

use dataset::LaunchTable;
use shared::{
    domain::{LaunchRecord, PayloadRange, SiteSelector},
    protocol::{PieChart, PieSlice, ScatterChart, ScatterPoint, ScatterSeries},
};
use tracing::debug;

pub const ALL_SITES_PIE_TITLE: &str = "Total Success Launches";
pub const SCATTER_TITLE: &str = "Correlation between Payload and Success for Selected Site";

/// Read-only view over the loaded launch table, built once at startup and
/// shared by every aggregation call.
#[derive(Debug, Clone)]
pub struct AnalyticsContext {
    pub table: Arc<LaunchTable>,
}

impl AnalyticsContext {
    pub fn new(table: LaunchTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        self.table.records()
    }
}

pub fn site_pie_title(site: &str) -> String {
    format!("Success vs. Failure for {site}")
}

/// Records passing both the site and payload filters, in table order.
pub fn filter_records<'a>(
    ctx: &'a AnalyticsContext,
    site: &'a SiteSelector,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    ctx.records()
        .iter()
        .filter(move |record| range.contains(record.payload_mass_kg))
        .filter(move |record| site.matches(&record.launch_site))
}

/// Pie data for the site dropdown.
///
/// For `ALL` there is one slice per launch site holding its success count.
/// For a single site the slices count each outcome value present for that
/// site. An unknown site yields no slices.
pub fn success_distribution(ctx: &AnalyticsContext, site: &SiteSelector) -> PieChart {
    let chart = match site {
        SiteSelector::All => PieChart {
            title: ALL_SITES_PIE_TITLE.to_string(),
            slices: count_in_order(ctx.records().iter().map(|record| {
                (
                    record.launch_site.as_str(),
                    u64::from(record.outcome.class()),
                )
            })),
        },
        SiteSelector::Site(name) => PieChart {
            title: site_pie_title(name),
            slices: count_in_order(
                ctx.records()
                    .iter()
                    .filter(|record| &record.launch_site == name)
                    .map(|record| (record.outcome.label(), 1)),
            ),
        },
    };

    debug!(site = %site, slices = chart.slices.len(), "success distribution computed");
    chart
}

/// Scatter data for the payload slider: one point per record inside `range`
/// (and at `site` unless `ALL`), grouped by booster version.
pub fn payload_outcome(
    ctx: &AnalyticsContext,
    site: &SiteSelector,
    range: PayloadRange,
) -> ScatterChart {
    let mut series: Vec<ScatterSeries> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in filter_records(ctx, site, range) {
        let slot = *index
            .entry(record.booster_version.as_str())
            .or_insert_with(|| {
                series.push(ScatterSeries {
                    booster_version: record.booster_version.clone(),
                    points: Vec::new(),
                });
                series.len() - 1
            });
        series[slot].points.push(ScatterPoint {
            payload_mass_kg: record.payload_mass_kg,
            outcome: record.outcome,
        });
    }

    let chart = ScatterChart {
        title: SCATTER_TITLE.to_string(),
        series,
    };
    debug!(
        site = %site,
        low = range.low,
        high = range.high,
        points = chart.point_count(),
        "payload outcome computed"
    );
    chart
}

fn count_in_order<'a>(items: impl Iterator<Item = (&'a str, u64)>) -> Vec<PieSlice> {
    let mut slices: Vec<PieSlice> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (label, value) in items {
        match index.get(label) {
            Some(&slot) => slices[slot].value += value,
            None => {
                index.insert(label, slices.len());
                slices.push(PieSlice {
                    label: label.to_string(),
                    value,
                });
            }
        }
    }
    slices
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
