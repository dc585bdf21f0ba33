use std::collections::HashSet;

use log::debug;

use super::model::{Catalog, StarRecord};

/// Hottest effective temperature (Kelvin) kept in the catalog.
pub const MAX_EFFECTIVE_TEMPERATURE: f64 = 12_000.0;

/// Filtered table plus how many rows each predicate removed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub catalog: Catalog,
    /// Rows above [`MAX_EFFECTIVE_TEMPERATURE`] or without a temperature.
    pub removed_temperature: usize,
    /// Later rows repeating an already kept `star_id`.
    pub removed_duplicate: usize,
}

/// Whether a record passes the temperature cut. Missing temperatures fail.
pub fn within_temperature_limit(record: &StarRecord) -> bool {
    record
        .effective_temperature
        .is_some_and(|t| t <= MAX_EFFECTIVE_TEMPERATURE)
}

/// Keep rows at or below the temperature cut, then keep only the first row
/// for each `star_id` (source order).
///
/// The temperature cut runs first, so a hot row never shadows a later
/// acceptable row with the same identifier.
pub fn filter_catalog(catalog: Catalog) -> FilterOutcome {
    let total = catalog.len();
    let Catalog {
        records,
        extra_columns,
    } = catalog;

    let cool: Vec<StarRecord> = records
        .into_iter()
        .filter(within_temperature_limit)
        .collect();
    let removed_temperature = total - cool.len();

    let mut seen: HashSet<String> = HashSet::with_capacity(cool.len());
    let unique: Vec<StarRecord> = cool
        .into_iter()
        .filter(|r| seen.insert(r.star_id.clone()))
        .collect();
    let removed_duplicate = total - removed_temperature - unique.len();

    debug!(
        "filter: {total} rows in, {removed_temperature} over temperature limit, \
         {removed_duplicate} duplicates, {} kept",
        unique.len()
    );

    FilterOutcome {
        catalog: Catalog {
            records: unique,
            extra_columns,
        },
        removed_temperature,
        removed_duplicate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(id: &str, teff: Option<f64>) -> StarRecord {
        let mut r = StarRecord::new(id);
        r.effective_temperature = teff;
        r
    }

    fn ids(catalog: &Catalog) -> Vec<&str> {
        catalog.records.iter().map(|r| r.star_id.as_str()).collect()
    }

    #[test]
    fn drops_hot_and_missing_temperatures() {
        let catalog = Catalog::from_records(vec![
            star("a", Some(5778.0)),
            star("b", Some(12_000.0)),
            star("c", Some(12_000.5)),
            star("d", None),
            star("e", Some(f64::NAN)),
        ]);
        let out = filter_catalog(catalog);

        assert_eq!(ids(&out.catalog), vec!["a", "b"]);
        assert_eq!(out.removed_temperature, 3);
        assert_eq!(out.removed_duplicate, 0);
    }

    #[test]
    fn keeps_first_of_duplicate_ids() {
        let catalog = Catalog::from_records(vec![
            star("a", Some(5000.0)),
            star("b", Some(6000.0)),
            star("a", Some(7000.0)),
        ]);
        let out = filter_catalog(catalog);

        assert_eq!(ids(&out.catalog), vec!["a", "b"]);
        assert_eq!(out.catalog.records[0].effective_temperature, Some(5000.0));
        assert_eq!(out.removed_duplicate, 1);
    }

    #[test]
    fn hot_first_occurrence_does_not_shadow_later_row() {
        let catalog = Catalog::from_records(vec![
            star("a", Some(20_000.0)),
            star("a", Some(5000.0)),
        ]);
        let out = filter_catalog(catalog);

        assert_eq!(ids(&out.catalog), vec!["a"]);
        assert_eq!(out.catalog.records[0].effective_temperature, Some(5000.0));
        assert_eq!(out.removed_temperature, 1);
        assert_eq!(out.removed_duplicate, 0);
    }

    #[test]
    fn output_satisfies_invariants() {
        let catalog = Catalog::from_records(
            (0..50)
                .map(|i| star(&format!("{}", i % 7), Some(2000.0 + 400.0 * i as f64)))
                .collect(),
        );
        let out = filter_catalog(catalog);

        let mut seen = HashSet::new();
        for r in &out.catalog.records {
            assert!(r.effective_temperature.unwrap() <= MAX_EFFECTIVE_TEMPERATURE);
            assert!(seen.insert(r.star_id.clone()), "duplicate {}", r.star_id);
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let catalog = Catalog::from_records(vec![
            star("a", Some(5000.0)),
            star("b", Some(13_000.0)),
            star("a", Some(4000.0)),
            star("c", None),
            star("d", Some(9000.0)),
        ]);
        let once = filter_catalog(catalog).catalog;
        let twice = filter_catalog(once.clone());

        assert_eq!(twice.catalog, once);
        assert_eq!(twice.removed_temperature, 0);
        assert_eq!(twice.removed_duplicate, 0);
    }
}
