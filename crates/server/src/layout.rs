use analytics::AnalyticsContext;
use shared::{
    domain::{PayloadRange, SiteSelector},
    protocol::{
        DashboardLayout, DropdownControl, DropdownOption, RangeSliderControl, PAYLOAD_SCATTER_CHART,
        PAYLOAD_SLIDER, SITE_DROPDOWN, SUCCESS_PIE_CHART,
    },
};

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Dashboard";

pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 10000.0;
pub const SLIDER_STEP: f64 = 1000.0;
const SLIDER_MARKS: [f64; 5] = [0.0, 2500.0, 5000.0, 7500.0, 10000.0];

/// Controls and chart slots for the page. The slider starts at the payload
/// bounds of the loaded table.
pub fn dashboard_layout(ctx: &AnalyticsContext) -> DashboardLayout {
    let options = std::iter::once(DropdownOption {
        label: "All Sites".to_string(),
        value: SiteSelector::All,
    })
    .chain(ctx.table.distinct_sites().into_iter().map(|site| DropdownOption {
        label: site.clone(),
        value: SiteSelector::Site(site),
    }))
    .collect();

    let initial_range = ctx
        .table
        .payload_bounds()
        .unwrap_or(PayloadRange::new(SLIDER_MIN, SLIDER_MAX));

    DashboardLayout {
        title: DASHBOARD_TITLE.to_string(),
        site_dropdown: DropdownControl {
            id: SITE_DROPDOWN.to_string(),
            options,
            value: SiteSelector::All,
            placeholder: "Select a Launch Site here".to_string(),
            searchable: true,
        },
        pie_chart_id: SUCCESS_PIE_CHART.to_string(),
        payload_slider: RangeSliderControl {
            id: PAYLOAD_SLIDER.to_string(),
            min: SLIDER_MIN,
            max: SLIDER_MAX,
            step: SLIDER_STEP,
            marks: SLIDER_MARKS.to_vec(),
            value: initial_range,
        },
        scatter_chart_id: PAYLOAD_SCATTER_CHART.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::LaunchTable;
    use shared::domain::{LaunchRecord, Outcome};

    fn record(site: &str, payload: f64) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            booster_version: "v1".to_string(),
            outcome: Outcome::Success,
        }
    }

    #[test]
    fn dropdown_lists_all_then_distinct_sites() {
        let ctx = AnalyticsContext::new(LaunchTable::from_records(vec![
            record("B", 100.0),
            record("A", 7000.0),
            record("B", 2500.0),
        ]));
        let layout = dashboard_layout(&ctx);

        let values: Vec<String> = layout
            .site_dropdown
            .options
            .iter()
            .map(|option| option.value.to_string())
            .collect();
        assert_eq!(values, vec!["ALL", "B", "A"]);
        assert_eq!(layout.site_dropdown.options[0].label, "All Sites");
        assert_eq!(layout.site_dropdown.value, SiteSelector::All);
        assert_eq!(layout.payload_slider.value, PayloadRange::new(100.0, 7000.0));
        assert_eq!(layout.payload_slider.step, SLIDER_STEP);
    }

    #[test]
    fn empty_table_uses_full_slider_range() {
        let layout = dashboard_layout(&AnalyticsContext::new(LaunchTable::default()));
        assert_eq!(layout.site_dropdown.options.len(), 1);
        assert_eq!(layout.payload_slider.value, PayloadRange::new(SLIDER_MIN, SLIDER_MAX));
    }
}
