use super::*;
use shared::domain::Outcome;

fn record(site: &str, payload: f64, booster: &str, class: u8) -> LaunchRecord {
    LaunchRecord {
        launch_site: site.to_string(),
        payload_mass_kg: payload,
        booster_version: booster.to_string(),
        outcome: Outcome::try_from(class).expect("class"),
    }
}

fn scenario() -> AnalyticsContext {
    AnalyticsContext::new(LaunchTable::from_records(vec![
        record("A", 500.0, "v1", 1),
        record("A", 1500.0, "v1", 0),
        record("B", 3000.0, "v2", 1),
    ]))
}

fn wider() -> AnalyticsContext {
    AnalyticsContext::new(LaunchTable::from_records(vec![
        record("CCAFS LC-40", 0.0, "F9 v1.0 B0003", 0),
        record("CCAFS LC-40", 525.0, "F9 v1.0 B0005", 0),
        record("VAFB SLC-4E", 500.0, "F9 v1.1 B1003", 0),
        record("KSC LC-39A", 2490.0, "F9 FT B1031.1", 1),
        record("CCAFS LC-40", 4600.0, "F9 B4 B1043.1", 1),
        record("KSC LC-39A", 9600.0, "F9 FT B1029.1", 1),
        record("CCAFS SLC-40", 15600.0, "F9 B5 B1048.4", 1),
        record("VAFB SLC-4E", 9600.0, "F9 FT B1036.1", 1),
        record("CCAFS LC-40", 3170.0, "F9 FT B1029.1", 0),
    ]))
}

#[test]
fn all_sites_pie_sums_successes_per_site() {
    let pie = success_distribution(&scenario(), &SiteSelector::All);
    assert_eq!(pie.title, ALL_SITES_PIE_TITLE);
    assert_eq!(
        pie.slices,
        vec![
            PieSlice {
                label: "A".into(),
                value: 1
            },
            PieSlice {
                label: "B".into(),
                value: 1
            },
        ]
    );
}

#[test]
fn single_site_pie_counts_success_and_failure() {
    let pie = success_distribution(&scenario(), &SiteSelector::from("A"));
    assert_eq!(pie.title, "Success vs. Failure for A");
    assert_eq!(pie.value_of("Success"), Some(1));
    assert_eq!(pie.value_of("Failure"), Some(1));
}

#[test]
fn site_with_only_successes_has_a_single_slice() {
    let pie = success_distribution(&scenario(), &SiteSelector::from("B"));
    assert_eq!(pie.slices.len(), 1);
    assert_eq!(pie.value_of("Success"), Some(1));
    assert_eq!(pie.value_of("Failure"), None);
}

#[test]
fn unknown_site_yields_empty_charts() {
    let ctx = scenario();
    let unknown = SiteSelector::from("Boca Chica");

    let pie = success_distribution(&ctx, &unknown);
    assert!(pie.slices.is_empty());
    assert_eq!(pie.total(), 0);

    let scatter = payload_outcome(&ctx, &unknown, PayloadRange::new(0.0, 10000.0));
    assert!(scatter.series.is_empty());
}

#[test]
fn all_sites_pie_keeps_sites_without_successes() {
    let ctx = AnalyticsContext::new(LaunchTable::from_records(vec![
        record("A", 100.0, "v1", 0),
        record("B", 200.0, "v2", 1),
    ]));
    let pie = success_distribution(&ctx, &SiteSelector::All);
    assert_eq!(pie.value_of("A"), Some(0));
    assert_eq!(pie.value_of("B"), Some(1));
}

#[test]
fn all_sites_total_matches_table_successes() {
    let ctx = wider();
    let expected: u64 = ctx
        .records()
        .iter()
        .map(|record| u64::from(record.outcome.class()))
        .sum();
    assert_eq!(success_distribution(&ctx, &SiteSelector::All).total(), expected);
}

#[test]
fn single_site_total_matches_site_record_count() {
    let ctx = wider();
    for site in ctx.table.distinct_sites() {
        let expected = ctx
            .records()
            .iter()
            .filter(|record| record.launch_site == site)
            .count() as u64;
        let pie = success_distribution(&ctx, &SiteSelector::from(site.as_str()));
        assert_eq!(pie.total(), expected, "site {site}");
    }
}

#[test]
fn scatter_scenario_returns_points_in_range() {
    let scatter = payload_outcome(&scenario(), &SiteSelector::All, PayloadRange::new(0.0, 2000.0));
    assert_eq!(scatter.title, SCATTER_TITLE);
    let points: Vec<(f64, u8)> = scatter
        .points()
        .map(|point| (point.payload_mass_kg, point.outcome.class()))
        .collect();
    assert_eq!(points, vec![(500.0, 1), (1500.0, 0)]);
    assert_eq!(scatter.series.len(), 1);
    assert_eq!(scatter.series[0].booster_version, "v1");
}

#[test]
fn scatter_points_respect_range_bounds() {
    let ctx = wider();
    let ranges = [
        PayloadRange::new(0.0, 10000.0),
        PayloadRange::new(500.0, 500.0),
        PayloadRange::new(1000.0, 5000.0),
        PayloadRange::new(9600.0, 10000.0),
    ];
    for range in ranges {
        for site in [SiteSelector::All, SiteSelector::from("KSC LC-39A")] {
            let scatter = payload_outcome(&ctx, &site, range);
            for point in scatter.points() {
                assert!(range.low <= point.payload_mass_kg);
                assert!(point.payload_mass_kg <= range.high);
            }
        }
    }
}

#[test]
fn all_sites_full_slider_range_excludes_records_above_bound() {
    let ctx = wider();
    let scatter = payload_outcome(&ctx, &SiteSelector::All, PayloadRange::new(0.0, 10000.0));
    let inside = ctx
        .records()
        .iter()
        .filter(|record| record.payload_mass_kg <= 10000.0)
        .count();
    assert_eq!(scatter.point_count(), inside);
    assert_eq!(scatter.point_count(), ctx.table.len() - 1);
}

#[test]
fn scatter_groups_points_by_booster_version() {
    let ctx = wider();
    let scatter = payload_outcome(&ctx, &SiteSelector::All, PayloadRange::new(0.0, 10000.0));
    let shared_booster = scatter
        .series
        .iter()
        .find(|series| series.booster_version == "F9 FT B1029.1")
        .expect("series");
    assert_eq!(shared_booster.points.len(), 2);
}

#[test]
fn site_filter_applies_on_top_of_range() {
    let ctx = wider();
    let scatter = payload_outcome(
        &ctx,
        &SiteSelector::from("VAFB SLC-4E"),
        PayloadRange::new(0.0, 10000.0),
    );
    assert_eq!(scatter.point_count(), 2);
}

#[test]
fn inverted_range_yields_empty_scatter() {
    let scatter = payload_outcome(&scenario(), &SiteSelector::All, PayloadRange::new(2000.0, 0.0));
    assert_eq!(scatter.point_count(), 0);
}

#[test]
fn aggregations_are_idempotent() {
    let ctx = wider();
    let site = SiteSelector::from("CCAFS LC-40");
    let range = PayloadRange::new(0.0, 5000.0);

    assert_eq!(success_distribution(&ctx, &site), success_distribution(&ctx, &site));
    assert_eq!(payload_outcome(&ctx, &site, range), payload_outcome(&ctx, &site, range));
}
