//! Facet declarations and distinct-value derivation

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{CatalogError, Dataset};

/// Sentinel option meaning "no explicit filter"
pub const ALL: &str = "all";

/// A filterable field and its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub key: String,
    pub label: String,
}

impl Facet {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// One entry of a facet's option list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    /// Raw value forwarded to `select`
    pub value: String,
    /// Display text
    pub text: String,
}

/// Static, ordered set of declared facets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetRegistry {
    facets: Vec<Facet>,
}

impl FacetRegistry {
    /// Create a registry from declarations. Later duplicates of a key are dropped.
    pub fn new(facets: Vec<Facet>) -> Self {
        let mut seen = IndexSet::new();
        let facets = facets
            .into_iter()
            .filter(|f| seen.insert(f.key.clone()))
            .collect();
        Self { facets }
    }

    /// Look up a declared facet
    pub fn get(&self, key: &str) -> Result<&Facet, CatalogError> {
        self.facets
            .iter()
            .find(|f| f.key == key)
            .ok_or_else(|| CatalogError::InvalidFacet(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.facets.iter().any(|f| f.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Facet> {
        self.facets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.facets.iter().map(|f| f.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

impl Default for FacetRegistry {
    fn default() -> Self {
        Self::new(vec![
            Facet::new("brand", "Brand"),
            Facet::new("launch-year", "Launch Year"),
            Facet::new("operating-system", "Operating System"),
            Facet::new("cpu", "CPU"),
        ])
    }
}

/// Distinct text values of `facet_key`, in first-seen order.
///
/// Records lacking the field contribute nothing.
pub fn derive_facet_values(dataset: &Dataset, facet_key: &str) -> IndexSet<String> {
    dataset
        .records()
        .iter()
        .filter_map(|r| r.text(facet_key))
        .collect()
}

/// Option list for a facet control: the `all` sentinel first, then each
/// distinct value.
pub fn facet_options(dataset: &Dataset, facet: &Facet) -> Vec<FacetOption> {
    let mut options = vec![FacetOption {
        value: ALL.to_string(),
        text: format!("All {}s", facet.label),
    }];
    options.extend(
        derive_facet_values(dataset, &facet.key)
            .into_iter()
            .map(|value| FacetOption {
                text: value.clone(),
                value,
            }),
    );
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    fn dataset() -> Dataset {
        let rows = [("Apple", 2020.0), ("Samsung", 2021.0), ("Apple", 2021.0), ("Google", 2020.0)];
        Dataset::from_records(
            rows.iter()
                .map(|(brand, year)| {
                    Record::new()
                        .with("brand", *brand)
                        .with("launch-year", *year)
                        .with("height", 150.0)
                        .with("width", 70.0)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_default_registry() {
        let registry = FacetRegistry::default();
        let keys: Vec<_> = registry.keys().collect();
        assert_eq!(keys, vec!["brand", "launch-year", "operating-system", "cpu"]);
        assert_eq!(registry.get("cpu").unwrap().label, "CPU");
        assert_eq!(
            registry.get("color"),
            Err(CatalogError::InvalidFacet("color".to_string()))
        );
    }

    #[test]
    fn test_registry_drops_duplicate_keys() {
        let registry = FacetRegistry::new(vec![
            Facet::new("brand", "Brand"),
            Facet::new("brand", "Maker"),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("brand").unwrap().label, "Brand");
    }

    #[test]
    fn test_derive_facet_values_first_seen_order() {
        let values = derive_facet_values(&dataset(), "brand");
        let values: Vec<_> = values.iter().map(String::as_str).collect();
        assert_eq!(values, vec!["Apple", "Samsung", "Google"]);

        let years = derive_facet_values(&dataset(), "launch-year");
        let years: Vec<_> = years.iter().map(String::as_str).collect();
        assert_eq!(years, vec!["2020", "2021"]);
    }

    #[test]
    fn test_facet_options_prepend_all() {
        let options = facet_options(&dataset(), &Facet::new("brand", "Brand"));
        assert_eq!(options[0].value, ALL);
        assert_eq!(options[0].text, "All Brands");
        assert_eq!(options.len(), 4);
        assert_eq!(options[1].value, "Apple");
    }
}
