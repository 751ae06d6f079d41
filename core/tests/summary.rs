//! Summary statistics tests.

use benefits_core::{
    config::{resolve, TerritoryProfile},
    field::Field,
    generator::generate,
    rng::RngBank,
    series::{YearRecord, YearlySeries},
    summary::{growth_pct, mean, recommendations, share_pct, SeriesSummary},
};

fn two_year_series() -> YearlySeries {
    YearlySeries::from_records(vec![
        YearRecord::new(2002)
            .with(Field::TotalRevenue, 100.0)
            .with(Field::SocialContributions, 60.0)
            .with(Field::StateContributions, 30.0)
            .with(Field::TotalExpenses, 80.0)
            .with(Field::BenefitsPaid, 64.0)
            .with(Field::CoverageRate, 0.90)
            .with(Field::ManagementRatio, 0.05)
            .with(Field::AccountBalance, 4.0)
            .with(Field::AllocataireCount, 1_000.0),
        YearRecord::new(2003)
            .with(Field::TotalRevenue, 110.0)
            .with(Field::SocialContributions, 72.0)
            .with(Field::StateContributions, 33.0)
            .with(Field::TotalExpenses, 120.0)
            .with(Field::BenefitsPaid, 96.0)
            .with(Field::CoverageRate, 0.94)
            .with(Field::ManagementRatio, 0.07)
            .with(Field::AccountBalance, 6.5)
            .with(Field::AllocataireCount, 1_250.0),
    ])
    .expect("contiguous")
}

#[test]
fn revenue_growth_of_two_year_series_is_exactly_ten_percent() {
    assert_eq!(growth_pct(&[100.0, 110.0]), Some(10.0));

    let summary = SeriesSummary::compute(&TerritoryProfile::default_bundle(), &two_year_series());
    assert_eq!(summary.revenue_growth_pct, Some(10.0));
    assert_eq!(summary.allocataire_growth_pct, Some(25.0));
}

#[test]
fn means_and_shares() {
    let summary = SeriesSummary::compute(&TerritoryProfile::default_bundle(), &two_year_series());

    assert_eq!(summary.mean_of(Field::TotalRevenue), Some(105.0));
    assert_eq!(summary.mean_of(Field::TotalExpenses), Some(100.0));
    assert_eq!(summary.mean_of(Field::HousingAid), Some(0.0));
    assert_eq!(summary.means.len(), Field::COUNT);

    // 66 / 105, 31.5 / 105, 80 / 100
    let social = summary.social_contribution_share_pct.unwrap();
    assert!((social - 66.0 / 105.0 * 100.0).abs() < 1e-9);
    let state = summary.state_contribution_share_pct.unwrap();
    assert!((state - 30.0).abs() < 1e-9);
    assert_eq!(summary.benefits_share_pct, Some(80.0));
}

#[test]
fn performance_indicators() {
    let summary = SeriesSummary::compute(&TerritoryProfile::default_bundle(), &two_year_series());

    assert!((summary.coverage_rate_pct.unwrap() - 92.0).abs() < 1e-9);
    assert!((summary.management_ratio_pct.unwrap() - 6.0).abs() < 1e-9);
    assert_eq!(summary.final_balance, Some(6.5));
    assert_eq!((summary.start_year, summary.end_year), (Some(2002), Some(2003)));
}

#[test]
fn empty_series_summarises_to_nothing() {
    let empty = YearlySeries::from_records(vec![]).unwrap();
    let summary = SeriesSummary::compute(&TerritoryProfile::default_bundle(), &empty);

    assert!(summary.means.is_empty());
    assert_eq!(summary.revenue_growth_pct, None);
    assert_eq!(summary.benefits_share_pct, None);
    assert_eq!(summary.final_balance, None);
}

#[test]
fn helpers_match_their_formulas() {
    assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    assert_eq!(share_pct(25.0, 200.0), Some(12.5));
    assert_eq!(growth_pct(&[200.0, 150.0]), Some(-25.0));
}

#[test]
fn recommendations_follow_tags() {
    // Guyane: youth, large_families, precarity.
    let guyane = recommendations(&resolve("Guyane"));
    assert_eq!(guyane.len(), 9);
    assert_eq!(guyane[0], "Strengthen programmes against precarity");
    assert_eq!(guyane[2], "Adapt benefits to the needs of large families");
    assert_eq!(guyane[4], "Reinforce education and training aid");

    // Wallis-et-Futuna: youth and isolation.
    let wallis = recommendations(&resolve("Wallis-et-Futuna"));
    assert_eq!(wallis.len(), 7);
    assert!(wallis.contains(&"Develop remote and paperless services"));

    // Default bundle: generic advice only.
    let default = recommendations(&TerritoryProfile::default_bundle());
    assert_eq!(default.len(), 3);
    assert_eq!(default[0], "Improve the digitalisation of services");
}

#[test]
fn summary_is_pure() {
    let profile = resolve("Martinique");
    let series = generate(&profile, 2002, 2025, &RngBank::new(11)).unwrap();
    let before = series.clone();

    let a = SeriesSummary::compute(&profile, &series);
    let b = SeriesSummary::compute(&profile, &series);

    assert_eq!(series, before);
    assert_eq!(a.means, b.means);
    assert_eq!(a.territory, "Martinique");
}

#[test]
fn summary_serializes_with_column_names() {
    let summary = SeriesSummary::compute(&TerritoryProfile::default_bundle(), &two_year_series());
    let json = serde_json::to_value(&summary).expect("serialize");

    assert_eq!(json["territory"], "default");
    assert_eq!(json["means"]["total_revenue"], 105.0);
    assert_eq!(json["tags"][0], "family_benefits");
}
