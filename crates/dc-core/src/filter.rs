//! Faceted filtering
//!
//! A record matches when every declared facet is either unconstrained or
//! holds the record's value: OR within a facet, AND across facets. Values are
//! compared as text, so numeric facets such as `launch-year` match on their
//! printed form.

use crate::{Dataset, FacetRegistry, Record, SelectionState};

/// Does `record` satisfy the current selection?
pub fn matches(record: &Record, selection: &SelectionState, facets: &FacetRegistry) -> bool {
    facets.keys().all(|key| {
        // Facets missing from the state impose no constraint
        let Ok(selected) = selection.selected(key) else {
            return true;
        };
        if selected.is_empty() {
            return true;
        }
        record
            .text(key)
            .map(|value| selected.contains(&value))
            .unwrap_or(false)
    })
}

/// Matching records in dataset order
pub fn filter<'a>(
    dataset: &'a Dataset,
    selection: &SelectionState,
    facets: &FacetRegistry,
) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|record| matches(record, selection, facets))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(brand: &str, year: f64, os: &str, height: f64, width: f64) -> Record {
        Record::new()
            .with("brand", brand)
            .with("launch-year", year)
            .with("operating-system", os)
            .with("cpu", "generic")
            .with("height", height)
            .with("width", width)
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            device("Apple", 2020.0, "iOS", 146.7, 71.5),
            device("Samsung", 2021.0, "Android", 151.7, 71.2),
            device("Google", 2021.0, "Android", 158.6, 74.8),
            device("Apple", 2022.0, "iOS", 147.5, 71.5),
        ])
        .unwrap()
    }

    fn brands(records: &[&Record]) -> Vec<String> {
        records.iter().filter_map(|r| r.text("brand")).collect()
    }

    #[test]
    fn test_unconstrained_returns_everything() {
        let dataset = dataset();
        let facets = FacetRegistry::default();
        let selection = SelectionState::new(&facets);

        let result = filter(&dataset, &selection, &facets);
        assert_eq!(result.len(), dataset.len());
        assert!(result.iter().zip(dataset.records()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_or_within_facet() {
        let dataset = dataset();
        let facets = FacetRegistry::default();
        let mut selection = SelectionState::new(&facets);
        selection.select("brand", "Google").unwrap();
        selection.select("brand", "Samsung").unwrap();

        let result = filter(&dataset, &selection, &facets);
        assert_eq!(brands(&result), vec!["Samsung", "Google"]);
    }

    #[test]
    fn test_and_across_facets() {
        let dataset = dataset();
        let facets = FacetRegistry::default();
        let mut selection = SelectionState::new(&facets);
        selection.select("operating-system", "Android").unwrap();
        selection.select("brand", "Google").unwrap();
        selection.select("brand", "Apple").unwrap();

        let result = filter(&dataset, &selection, &facets);
        assert_eq!(brands(&result), vec!["Google"]);
    }

    #[test]
    fn test_numeric_facet_matches_as_text() {
        let dataset = dataset();
        let facets = FacetRegistry::default();
        let mut selection = SelectionState::new(&facets);
        selection.select("launch-year", "2021").unwrap();

        let result = filter(&dataset, &selection, &facets);
        assert_eq!(brands(&result), vec!["Samsung", "Google"]);

        // "2021.0" is not the printed form of the value
        let mut selection = SelectionState::new(&facets);
        selection.select("launch-year", "2021.0").unwrap();
        assert!(filter(&dataset, &selection, &facets).is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let dataset = dataset();
        let facets = FacetRegistry::default();
        let mut selection = SelectionState::new(&facets);
        selection.select("brand", "Nokia").unwrap();
        assert!(filter(&dataset, &selection, &facets).is_empty());
    }

    #[test]
    fn test_scenario_single_brand() {
        let dataset = Dataset::from_records(vec![
            Record::new().with("brand", "A").with("height", 100.0).with("width", 50.0),
            Record::new().with("brand", "B").with("height", 200.0).with("width", 100.0),
        ])
        .unwrap();
        let facets = FacetRegistry::new(vec![crate::Facet::new("brand", "Brand")]);
        let mut selection = SelectionState::new(&facets);
        selection.select("brand", "A").unwrap();

        let result = filter(&dataset, &selection, &facets);
        assert_eq!(result, vec![&dataset.records()[0]]);
    }
}
