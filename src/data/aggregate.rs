use std::collections::HashMap;

use serde::Serialize;

use super::model::{LaunchTable, Outcome, PayloadRange, Rgb, SiteSelector};

// ---------------------------------------------------------------------------
// Proportion (pie) chart
// ---------------------------------------------------------------------------

/// One named pie slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: u64,
    /// Fixed slice colour. `None` leaves the choice to the renderer's palette.
    pub color: Option<Rgb>,
}

/// Chart-ready table for the success pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl ProportionChart {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// Success proportions for the pie chart.
///
/// * `All` – one slice per site (first-appearance order) sized by its
///   success count. Sites without a single success keep a zero slice.
/// * `Site(name)` – rows of that site counted by outcome, largest first.
///   Only outcomes that actually occur get a slice, so a site with no
///   failures yields a lone `Success` slice. An unknown site yields no slices.
pub fn proportion_chart(table: &LaunchTable, site: &SiteSelector) -> ProportionChart {
    match site.site() {
        None => ProportionChart {
            title: "Total Success Launches By Site".to_string(),
            slices: success_by_site(table),
        },
        Some(name) => ProportionChart {
            title: format!("Total Success Launches for {name}"),
            slices: outcome_counts(table, name),
        },
    }
}

fn success_by_site(table: &LaunchTable) -> Vec<Slice> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut slices: Vec<Slice> = Vec::new();

    for record in table.records() {
        let slot = *index.entry(record.launch_site.as_str()).or_insert_with(|| {
            slices.push(Slice {
                label: record.launch_site.clone(),
                value: 0,
                color: None,
            });
            slices.len() - 1
        });
        slices[slot].value += u64::from(record.outcome.class());
    }

    slices
}

fn outcome_counts(table: &LaunchTable, site: &str) -> Vec<Slice> {
    let mut counts: Vec<(Outcome, u64)> = Vec::with_capacity(2);

    for record in table.records().iter().filter(|r| r.launch_site == site) {
        match counts.iter_mut().find(|(o, _)| *o == record.outcome) {
            Some((_, n)) => *n += 1,
            None => counts.push((record.outcome, 1)),
        }
    }

    // Stable sort keeps first-appearance order between equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(outcome, count)| Slice {
            label: outcome.label().to_string(),
            value: count,
            color: Some(Rgb::for_outcome(outcome)),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation (scatter) chart
// ---------------------------------------------------------------------------

/// One scatter point: payload on x, class on y, coloured by booster category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub class: u8,
    pub booster_category: String,
}

/// Chart-ready table for the payload/success scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationChart {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

impl CorrelationChart {
    /// Distinct booster categories among the points, in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for point in &self.points {
            if !seen.contains(&point.booster_category.as_str()) {
                seen.push(&point.booster_category);
            }
        }
        seen
    }
}

/// Rows whose payload lies in `range` (inclusive), restricted to `site`
/// unless it is the ALL sentinel. An empty result is a valid, empty chart.
pub fn correlation_chart(
    table: &LaunchTable,
    site: &SiteSelector,
    range: PayloadRange,
) -> CorrelationChart {
    let points = table
        .records()
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .filter(|r| site.site().map_or(true, |name| r.launch_site == name))
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            class: r.outcome.class(),
            booster_category: r.booster_category.clone(),
        })
        .collect();

    let title = match site.site() {
        Some(name) => format!("Correlation between Payload and Success for {name}"),
        None => "Correlation between Payload and Success for all Sites".to_string(),
    };

    CorrelationChart { title, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn record(site: &str, mass: f64, class: i64, booster: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: mass,
            outcome: Outcome::from_class(class).unwrap(),
            booster_category: booster.to_string(),
        }
    }

    fn fixture() -> LaunchTable {
        LaunchTable::new(vec![
            record("CCAFS LC-40", 0.0, 0, "v1.0"),
            record("CCAFS LC-40", 525.0, 0, "v1.0"),
            record("VAFB SLC-4E", 500.0, 0, "v1.1"),
            record("CCAFS LC-40", 2296.0, 1, "v1.1"),
            record("KSC LC-39A", 2490.0, 1, "FT"),
            record("KSC LC-39A", 5300.0, 1, "FT"),
            record("VAFB SLC-4E", 9600.0, 1, "FT"),
            record("CCAFS SLC-40", 3600.0, 1, "B4"),
            record("KSC LC-39A", 6070.0, 0, "B4"),
            record("CCAFS SLC-40", 4400.0, 1, "B5"),
        ])
    }

    fn site(name: &str) -> SiteSelector {
        SiteSelector::Site(name.to_string())
    }

    #[test]
    fn single_site_slices_sum_to_row_count() {
        let table = fixture();
        for name in table.distinct_sites() {
            let chart = proportion_chart(&table, &site(name));
            assert!(chart
                .slices
                .iter()
                .all(|s| s.label == "Success" || s.label == "Failure"));
            let rows = table.records().iter().filter(|r| r.launch_site == name).count();
            assert_eq!(chart.total(), rows as u64, "site {name}");
        }
    }

    #[test]
    fn single_site_orders_by_count_and_fixes_colours() {
        let chart = proportion_chart(&fixture(), &site("KSC LC-39A"));
        assert_eq!(chart.title, "Total Success Launches for KSC LC-39A");
        assert_eq!(
            chart.slices,
            vec![
                Slice {
                    label: "Success".into(),
                    value: 2,
                    color: Some(Rgb::SUCCESS_GREEN)
                },
                Slice {
                    label: "Failure".into(),
                    value: 1,
                    color: Some(Rgb::FAILURE_RED)
                },
            ]
        );
    }

    #[test]
    fn tied_counts_keep_first_appearance() {
        let chart = proportion_chart(&fixture(), &site("VAFB SLC-4E"));
        let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Failure", "Success"]);
    }

    #[test]
    fn all_sites_has_one_slice_per_site_summing_successes() {
        let table = fixture();
        let chart = proportion_chart(&table, &SiteSelector::All);

        assert_eq!(chart.title, "Total Success Launches By Site");
        assert_eq!(chart.slices.len(), table.distinct_sites().len());
        assert_eq!(chart.total(), table.success_count() as u64);

        let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
        assert!(chart.slices.iter().all(|s| s.color.is_none()));
    }

    #[test]
    fn site_without_successes_keeps_zero_slice_under_all() {
        let table = LaunchTable::new(vec![
            record("A", 100.0, 0, "FT"),
            record("B", 200.0, 1, "FT"),
        ]);
        let chart = proportion_chart(&table, &SiteSelector::All);
        assert_eq!(chart.slices[0].label, "A");
        assert_eq!(chart.slices[0].value, 0);
        assert_eq!(chart.slices[1].value, 1);
    }

    #[test]
    fn unknown_site_is_an_empty_chart() {
        let chart = proportion_chart(&fixture(), &site("Boca Chica"));
        assert!(chart.slices.is_empty());
        let scatter = correlation_chart(
            &fixture(),
            &site("Boca Chica"),
            PayloadRange::new(0.0, 10000.0),
        );
        assert!(scatter.points.is_empty());
    }

    #[test]
    fn full_range_keeps_every_row() {
        let table = fixture();
        let (lo, hi) = table.payload_bounds().unwrap();
        let chart = correlation_chart(&table, &SiteSelector::All, PayloadRange::new(lo, hi));
        assert_eq!(chart.points.len(), table.len());
        assert_eq!(
            chart.title,
            "Correlation between Payload and Success for all Sites"
        );
    }

    #[test]
    fn range_above_max_is_empty() {
        let table = fixture();
        let (_, hi) = table.payload_bounds().unwrap();
        let chart = correlation_chart(
            &table,
            &SiteSelector::All,
            PayloadRange::new(hi + 1.0, hi + 5000.0),
        );
        assert!(chart.points.is_empty());
    }

    #[test]
    fn range_bounds_are_inclusive_and_site_restricts() {
        let chart = correlation_chart(
            &fixture(),
            &site("KSC LC-39A"),
            PayloadRange::new(2490.0, 5300.0),
        );
        assert_eq!(
            chart.title,
            "Correlation between Payload and Success for KSC LC-39A"
        );
        let masses: Vec<f64> = chart.points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(masses, [2490.0, 5300.0]);
        assert!(chart.points.iter().all(|p| p.class == 1));
    }

    #[test]
    fn categories_follow_first_appearance() {
        let chart = correlation_chart(
            &fixture(),
            &SiteSelector::All,
            PayloadRange::new(0.0, 10000.0),
        );
        assert_eq!(chart.categories(), ["v1.0", "v1.1", "FT", "B4", "B5"]);
    }

    // Each outcome occurs once, so both slices appear; only outcomes with no rows are dropped.
    #[test]
    fn two_row_scenario() {
        let table = LaunchTable::new(vec![
            record("CCAFS", 500.0, 1, "v1.0"),
            record("CCAFS", 9000.0, 0, "v1.1"),
        ]);
        let pie = proportion_chart(&table, &site("CCAFS"));
        let counts: Vec<(&str, u64)> = pie
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect();
        assert_eq!(counts, [("Success", 1u64), ("Failure", 1u64)]);

        let scatter = correlation_chart(&table, &site("CCAFS"), PayloadRange::new(0.0, 10000.0));
        assert_eq!(scatter.points.len(), 2);
        assert_eq!(scatter.points[1].booster_category, "v1.1");
        assert_eq!(scatter.points[1].class, 0);
    }

    #[test]
    fn absent_outcome_has_no_slice() {
        let table = LaunchTable::new(vec![
            record("CCAFS", 500.0, 1, "v1.0"),
            record("CCAFS", 9000.0, 1, "v1.1"),
        ]);
        let pie = proportion_chart(&table, &site("CCAFS"));
        assert_eq!(pie.slices.len(), 1);
        assert_eq!(pie.slices[0].label, "Success");
        assert_eq!(pie.slices[0].value, 2);
    }
}
