//! Group-by and melt operations behind each dashboard chart.

use crate::{
    filter::YearRange,
    models::{
        CountryIntensity, RegionSourceValue, RegionSources, RegionalOutcome, YearSourceValue,
        YearlySources,
    },
};
use co2_core::{config::MIN_TOTAL_EMISSIONS, EmissionRecord, RegionMap, Source, SourceValues};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

/// Emissions of each source summed over every country in `focus_year`.
///
/// Empty when no record has that year.
pub fn global_breakdown(records: &[EmissionRecord], focus_year: i32) -> BTreeMap<Source, f64> {
    let mut totals: Option<SourceValues> = None;
    for record in records.iter().filter(|r| r.year == focus_year) {
        totals
            .get_or_insert_with(SourceValues::default)
            .accumulate(&record.sources);
    }
    totals.map(|t| t.iter().collect()).unwrap_or_default()
}

/// Per-year source sums for every year in `range` that has data, ascending.
pub fn yearly_source_totals(records: &[EmissionRecord], range: YearRange) -> Vec<YearlySources> {
    let mut by_year: BTreeMap<i32, SourceValues> = BTreeMap::new();
    for record in records.iter().filter(|r| range.contains(r.year)) {
        by_year.entry(record.year).or_default().accumulate(&record.sources);
    }
    by_year
        .into_iter()
        .map(|(year, sources)| YearlySources { year, sources })
        .collect()
}

/// Melt yearly sums into (year, source, emissions) rows.
pub fn melt_absolute(yearly: &[YearlySources]) -> Vec<YearSourceValue> {
    yearly
        .iter()
        .flat_map(|y| {
            y.sources.iter().map(move |(source, value)| YearSourceValue {
                year: y.year,
                source,
                value,
            })
        })
        .collect()
}

/// Melt yearly sums into (year, source, share %) rows.
///
/// Each source is divided by the year's six-source sum, so the six rows of a
/// year add up to 100. Years whose sum is zero have no defined share and are
/// left out.
pub fn melt_percentages(yearly: &[YearlySources]) -> Vec<YearSourceValue> {
    yearly
        .iter()
        .filter_map(|y| {
            let year_total = y.sources.sum();
            if year_total == 0.0 {
                debug!("Skipping share for {}: no source emissions", y.year);
                return None;
            }
            Some(y.sources.iter().map(move |(source, value)| YearSourceValue {
                year: y.year,
                source,
                value: value / year_total * 100.0,
            }))
        })
        .flatten()
        .collect()
}

/// Share of each source in the yearly global sum, for each year in `range`.
pub fn percentage_over_time(records: &[EmissionRecord], range: YearRange) -> Vec<YearSourceValue> {
    melt_percentages(&yearly_source_totals(records, range))
}

/// Absolute emissions of each source per year, for each year in `range`.
pub fn absolute_over_time(records: &[EmissionRecord], range: YearRange) -> Vec<YearSourceValue> {
    melt_absolute(&yearly_source_totals(records, range))
}

/// Source sums per selected region in `focus_year`.
///
/// A country listed under several selected regions is counted once, under
/// the last of them in selection order. Unknown region names are ignored.
pub fn regional_breakdown(
    records: &[EmissionRecord],
    focus_year: i32,
    regions: &[String],
    region_map: &RegionMap,
) -> RegionalOutcome {
    if regions.is_empty() {
        return RegionalOutcome::Skipped;
    }

    let mut region_of: HashMap<&str, &str> = HashMap::new();
    for region in regions {
        if !region_map.contains_region(region) {
            warn!("Ignoring unknown region: {}", region);
            continue;
        }
        for code in region_map.countries(region).into_iter().flatten() {
            region_of.insert(code.as_str(), region.as_str());
        }
    }

    let mut by_region: BTreeMap<&str, SourceValues> = BTreeMap::new();
    for record in records.iter().filter(|r| r.year == focus_year) {
        if let Some(&region) = region_of.get(record.iso_code.as_str()) {
            by_region.entry(region).or_default().accumulate(&record.sources);
        }
    }

    if by_region.is_empty() {
        debug!("No records for regions {:?} in {}", regions, focus_year);
        return RegionalOutcome::Empty;
    }

    RegionalOutcome::Breakdown(
        by_region
            .into_iter()
            .map(|(region, sources)| RegionSources {
                region: region.to_string(),
                sources,
            })
            .collect(),
    )
}

/// Melt regional sums into (region, source, emissions) bars.
pub fn melt_regional(regions: &[RegionSources]) -> Vec<RegionSourceValue> {
    regions
        .iter()
        .flat_map(|r| {
            r.sources.iter().map(move |(source, value)| RegionSourceValue {
                region: r.region.clone(),
                source,
                value,
            })
        })
        .collect()
}

/// Countries with the highest share of `source` in their `focus_year` total.
///
/// Countries whose total is below [`MIN_TOTAL_EMISSIONS`] are skipped, as are
/// countries whose intensity is not a finite number.
/// Results are sorted by intensity, highest first, ties keeping input order,
/// and cut to `top_n`. The published total is trusted; an intensity above
/// 100 % means the total undercounts its sources, and is clamped to 100.
pub fn intensity_ranking(
    records: &[EmissionRecord],
    focus_year: i32,
    source: Source,
    top_n: usize,
) -> Vec<CountryIntensity> {
    let mut ranked: Vec<CountryIntensity> = records
        .iter()
        .filter(|r| r.year == focus_year && r.total >= MIN_TOTAL_EMISSIONS)
        .filter_map(|r| {
            let emissions = r.source(source);
            let mut intensity = emissions / r.total * 100.0;
            if !intensity.is_finite() {
                warn!(
                    "{} {} intensity for {} is not a number; leaving it out",
                    focus_year, source, r.country
                );
                return None;
            }
            if intensity > 100.0 {
                warn!(
                    "{} {} intensity for {} is {:.1}% of its total; clamping to 100%",
                    focus_year, source, r.country, intensity
                );
                intensity = 100.0;
            }
            Some(CountryIntensity {
                country: r.country.clone(),
                iso_code: r.iso_code.clone(),
                source,
                emissions,
                total: r.total,
                intensity,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn record(iso_code: &str, year: i32, sources: [f64; 6], total: f64) -> EmissionRecord {
        EmissionRecord::new(iso_code, iso_code, year, sources, total)
    }

    fn scenario_records() -> Vec<EmissionRecord> {
        vec![
            record("USA", 2020, [100.0, 50.0, 30.0, 10.0, 5.0, 5.0], 200.0),
            record("CHN", 2020, [300.0, 100.0, 50.0, 40.0, 5.0, 5.0], 500.0),
            record("DEU", 2020, [40.0, 30.0, 20.0, 5.0, 0.0, 5.0], 100.0),
            record("ISL", 2020, [0.0, 1.5, 0.0, 0.1, 0.0, 1.4], 3.0),
            record("USA", 2019, [120.0, 55.0, 25.0, 10.0, 5.0, 5.0], 220.0),
            record("CHN", 2019, [290.0, 95.0, 45.0, 45.0, 5.0, 5.0], 485.0),
            record("QAT", 2019, [0.0, 20.0, 75.0, 3.0, 8.0, 0.0], 106.0),
        ]
    }

    fn region_map() -> RegionMap {
        let csv_data = "\
region,iso_code
North America,USA
Asia,CHN
Europe,DEU
Europe,ISL
Middle East,QAT
Asia,QAT
";
        RegionMap::parse_region_csv(csv_data).unwrap()
    }

    #[test]
    fn test_global_breakdown_scenario() {
        let breakdown = global_breakdown(&scenario_records()[..2], 2020);
        assert_eq!(breakdown[&Source::Coal], 400.0);
        assert_eq!(breakdown[&Source::Oil], 150.0);
        assert_eq!(breakdown.len(), 6);
    }

    #[test]
    fn test_global_breakdown_matches_country_sums() {
        let records = scenario_records();
        let breakdown = global_breakdown(&records, 2020);
        for source in Source::ALL {
            let expected: f64 = records
                .iter()
                .filter(|r| r.year == 2020)
                .map(|r| r.source(source))
                .sum();
            assert!((breakdown[&source] - expected).abs() < EPSILON);
        }
    }

    #[test]
    fn test_missing_focus_year_is_empty() {
        let records = scenario_records();
        assert!(global_breakdown(&records, 1990).is_empty());
        assert!(intensity_ranking(&records, 1990, Source::Coal, 10).is_empty());
    }

    #[test]
    fn test_yearly_totals_restricted_to_range() {
        let records = scenario_records();
        let yearly = yearly_source_totals(&records, YearRange::new(2019, 2019));
        assert_eq!(yearly.len(), 1);
        assert_eq!(yearly[0].year, 2019);
        assert_eq!(yearly[0].sources[Source::Coal], 410.0);
        assert_eq!(yearly[0].sources[Source::Gas], 145.0);

        let both = yearly_source_totals(&records, YearRange::new(1990, 2021));
        assert_eq!(both.iter().map(|y| y.year).collect::<Vec<_>>(), vec![2019, 2020]);
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let series = percentage_over_time(&scenario_records(), YearRange::new(2019, 2020));
        assert_eq!(series.len(), 12);
        for year in [2019, 2020] {
            let total: f64 = series.iter().filter(|p| p.year == year).map(|p| p.value).sum();
            assert!((total - 100.0).abs() < 1e-6, "{} shares sum to {}", year, total);
        }
    }

    #[test]
    fn test_percentage_value() {
        let records = vec![record("XXX", 2000, [30.0, 10.0, 10.0, 0.0, 0.0, 0.0], 50.0)];
        let series = percentage_over_time(&records, YearRange::new(2000, 2000));
        let coal = series.iter().find(|p| p.source == Source::Coal).unwrap();
        assert!((coal.value - 60.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_year_has_no_share() {
        let records = vec![
            record("XXX", 1900, [0.0; 6], 0.0),
            record("XXX", 1901, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0], 1.0),
        ];
        let range = YearRange::new(1900, 1901);
        let shares = percentage_over_time(&records, range);
        assert!(shares.iter().all(|p| p.year == 1901));
        assert_eq!(absolute_over_time(&records, range).len(), 12);
    }

    #[test]
    fn test_absolute_over_time_is_melted_sums() {
        let series = absolute_over_time(&scenario_records(), YearRange::new(2020, 2020));
        assert_eq!(series.len(), 6);
        assert_eq!(series[0], YearSourceValue { year: 2020, source: Source::Coal, value: 440.0 });
        assert_eq!(series[5].source, Source::Other);
    }

    #[test]
    fn test_regional_skipped_without_selection() {
        let outcome = regional_breakdown(&scenario_records(), 2020, &[], &region_map());
        assert_eq!(outcome, RegionalOutcome::Skipped);
    }

    #[test]
    fn test_regional_empty_when_nothing_matches() {
        let regions = vec!["Middle East".to_string()];
        let outcome = regional_breakdown(&scenario_records(), 2020, &regions, &region_map());
        assert_eq!(outcome, RegionalOutcome::Empty);

        let unknown = vec!["Atlantis".to_string()];
        let outcome = regional_breakdown(&scenario_records(), 2020, &unknown, &region_map());
        assert_eq!(outcome, RegionalOutcome::Empty);
    }

    #[test]
    fn test_regional_breakdown_by_region() {
        let regions = vec!["North America".to_string(), "Europe".to_string()];
        let outcome = regional_breakdown(&scenario_records(), 2020, &regions, &region_map());
        let RegionalOutcome::Breakdown(rows) = outcome else {
            panic!("expected a breakdown");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].region, "Europe");
        assert_eq!(rows[0].sources[Source::Coal], 40.0);
        assert_eq!(rows[0].sources[Source::Oil], 31.5);
        assert_eq!(rows[1].region, "North America");
        assert_eq!(rows[1].sources[Source::Coal], 100.0);
    }

    #[test]
    fn test_regional_sum_matches_restricted_global() {
        let records = scenario_records();
        let map = region_map();
        let regions = vec!["Asia".to_string(), "Europe".to_string()];
        let RegionalOutcome::Breakdown(rows) = regional_breakdown(&records, 2020, &regions, &map)
        else {
            panic!("expected a breakdown");
        };
        let mut regional = SourceValues::default();
        rows.iter().for_each(|r| regional.accumulate(&r.sources));

        let members: Vec<EmissionRecord> = records
            .iter()
            .filter(|r| ["CHN", "DEU", "ISL", "QAT"].contains(&r.iso_code.as_str()))
            .cloned()
            .collect();
        let restricted = global_breakdown(&members, 2020);
        for source in Source::ALL {
            assert!((regional[source] - restricted[&source]).abs() < EPSILON);
        }
    }

    #[test]
    fn test_overlapping_regions_count_country_once() {
        let regions = vec!["Middle East".to_string(), "Asia".to_string()];
        let RegionalOutcome::Breakdown(rows) =
            regional_breakdown(&scenario_records(), 2019, &regions, &region_map())
        else {
            panic!("expected a breakdown");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].region, "Asia");
        assert_eq!(rows[0].sources[Source::Gas], 120.0);
    }

    #[test]
    fn test_melt_regional() {
        let rows = vec![RegionSources {
            region: "Europe".to_string(),
            sources: SourceValues([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        }];
        let bars = melt_regional(&rows);
        assert_eq!(bars.len(), 6);
        assert_eq!(bars[2].source, Source::Gas);
        assert_eq!(bars[2].value, 3.0);
        assert_eq!(bars[2].region, "Europe");
    }

    #[test]
    fn test_intensity_excludes_small_emitters() {
        let ranking = intensity_ranking(&scenario_records(), 2020, Source::Oil, 10);
        assert_eq!(ranking.len(), 3);
        assert!(ranking.iter().all(|c| c.total >= MIN_TOTAL_EMISSIONS));
        assert!(ranking.iter().all(|c| c.iso_code != "ISL"));
    }

    #[test]
    fn test_intensity_sorted_descending() {
        let ranking = intensity_ranking(&scenario_records(), 2020, Source::Coal, 10);
        let order: Vec<&str> = ranking.iter().map(|c| c.iso_code.as_str()).collect();
        assert_eq!(order, vec!["CHN", "USA", "DEU"]);
        assert!((ranking[0].intensity - 60.0).abs() < EPSILON);
        assert!(ranking.windows(2).all(|w| w[0].intensity >= w[1].intensity));
    }

    #[test]
    fn test_intensity_top_n() {
        let records = scenario_records();
        assert_eq!(intensity_ranking(&records, 2020, Source::Gas, 2).len(), 2);
        assert_eq!(intensity_ranking(&records, 2020, Source::Gas, 0).len(), 0);
        assert_eq!(intensity_ranking(&records, 2020, Source::Gas, 50).len(), 3);
    }

    #[test]
    fn test_intensity_ties_keep_input_order() {
        let records = vec![
            record("BBB", 2020, [10.0, 10.0, 0.0, 0.0, 0.0, 0.0], 20.0),
            record("AAA", 2020, [20.0, 20.0, 0.0, 0.0, 0.0, 0.0], 40.0),
        ];
        let ranking = intensity_ranking(&records, 2020, Source::Coal, 10);
        assert_eq!(ranking[0].iso_code, "BBB");
        assert_eq!(ranking[1].iso_code, "AAA");
    }

    #[test]
    fn test_intensity_clamped_when_total_undercounts() {
        let records = vec![record("XXX", 2020, [30.0, 0.0, 0.0, 0.0, 0.0, 0.0], 20.0)];
        let ranking = intensity_ranking(&records, 2020, Source::Coal, 10);
        assert_eq!(ranking[0].intensity, 100.0);
        assert_eq!(ranking[0].emissions, 30.0);
    }

    #[test]
    fn test_intensity_threshold_is_inclusive() {
        let records = vec![
            record("AAA", 2020, [5.0, 5.0, 0.0, 0.0, 0.0, 0.0], MIN_TOTAL_EMISSIONS),
            record("BBB", 2020, [5.0, 4.999, 0.0, 0.0, 0.0, 0.0], 9.999),
        ];
        let ranking = intensity_ranking(&records, 2020, Source::Coal, 10);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].iso_code, "AAA");
        assert_eq!(ranking[0].total, 10.0);
    }

    #[test]
    fn test_intensity_skips_non_finite_values() {
        let records = vec![
            record("AAA", 2020, [f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0], 100.0),
            record("BBB", 2020, [40.0, 60.0, 0.0, 0.0, 0.0, 0.0], 100.0),
        ];
        let ranking = intensity_ranking(&records, 2020, Source::Coal, 1);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].iso_code, "BBB");
        assert!((ranking[0].intensity - 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_unknown_region_alongside_known_one() {
        let regions = vec!["Atlantis".to_string(), "Europe".to_string()];
        let RegionalOutcome::Breakdown(rows) =
            regional_breakdown(&scenario_records(), 2020, &regions, &region_map())
        else {
            panic!("expected a breakdown");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].region, "Europe");
    }
}
