//! Per-facet multi-select state

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};

use crate::facets::ALL;
use crate::{CatalogError, FacetRegistry};

/// Insertion-ordered set of selected values with hashed membership
pub type ValueSet = IndexSet<String, RandomState>;

/// Facet key to selected values. An empty set means the facet is unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    selections: IndexMap<String, ValueSet>,
}

impl SelectionState {
    /// One empty entry per declared facet
    pub fn new(facets: &FacetRegistry) -> Self {
        Self {
            selections: facets
                .keys()
                .map(|key| (key.to_string(), ValueSet::default()))
                .collect(),
        }
    }

    fn entry_mut(&mut self, facet_key: &str) -> Result<&mut ValueSet, CatalogError> {
        self.selections
            .get_mut(facet_key)
            .ok_or_else(|| CatalogError::InvalidFacet(facet_key.to_string()))
    }

    /// Add `value` to the facet's selection.
    ///
    /// Returns `Ok(false)` for the `all` sentinel or a value already selected.
    pub fn select(&mut self, facet_key: &str, value: &str) -> Result<bool, CatalogError> {
        let set = self.entry_mut(facet_key)?;
        if value == ALL || set.contains(value) {
            return Ok(false);
        }
        set.insert(value.to_string());
        Ok(true)
    }

    /// Remove `value` from the facet's selection, keeping the order of the rest.
    pub fn deselect(&mut self, facet_key: &str, value: &str) -> Result<bool, CatalogError> {
        Ok(self.entry_mut(facet_key)?.shift_remove(value))
    }

    /// Drop every selected value of one facet
    pub fn clear(&mut self, facet_key: &str) -> Result<bool, CatalogError> {
        let set = self.entry_mut(facet_key)?;
        let changed = !set.is_empty();
        set.clear();
        Ok(changed)
    }

    pub fn is_unconstrained(&self, facet_key: &str) -> Result<bool, CatalogError> {
        Ok(self.selected(facet_key)?.is_empty())
    }

    pub fn selected(&self, facet_key: &str) -> Result<&ValueSet, CatalogError> {
        self.selections
            .get(facet_key)
            .ok_or_else(|| CatalogError::InvalidFacet(facet_key.to_string()))
    }

    /// Iterate `(facet key, selected values)` in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValueSet)> {
        self.selections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when no facet has an active selection
    pub fn is_empty(&self) -> bool {
        self.selections.values().all(|set| set.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SelectionState {
        SelectionState::new(&FacetRegistry::default())
    }

    fn values(state: &SelectionState, key: &str) -> Vec<String> {
        state.selected(key).unwrap().iter().cloned().collect()
    }

    #[test]
    fn test_new_state_is_unconstrained() {
        let state = state();
        assert!(state.is_empty());
        for key in ["brand", "launch-year", "operating-system", "cpu"] {
            assert!(state.is_unconstrained(key).unwrap());
        }
    }

    #[test]
    fn test_select_appends_in_order() {
        let mut state = state();
        assert!(state.select("brand", "Samsung").unwrap());
        assert!(state.select("brand", "Apple").unwrap());
        assert_eq!(values(&state, "brand"), vec!["Samsung", "Apple"]);
        assert!(!state.is_unconstrained("brand").unwrap());
    }

    #[test]
    fn test_select_rejects_duplicates_and_all() {
        let mut state = state();
        assert!(state.select("brand", "Apple").unwrap());
        assert!(!state.select("brand", "Apple").unwrap());
        assert!(!state.select("brand", ALL).unwrap());
        assert_eq!(values(&state, "brand"), vec!["Apple"]);

        assert!(!state.select("cpu", ALL).unwrap());
        assert!(state.is_unconstrained("cpu").unwrap());
    }

    #[test]
    fn test_deselect_preserves_remaining_order() {
        let mut state = state();
        for v in ["A", "B", "C"] {
            state.select("brand", v).unwrap();
        }
        assert!(state.deselect("brand", "B").unwrap());
        assert_eq!(values(&state, "brand"), vec!["A", "C"]);
    }

    #[test]
    fn test_deselect_unknown_value_is_noop() {
        let mut state = state();
        state.select("brand", "A").unwrap();
        let before = state.clone();
        assert!(!state.deselect("brand", "Z").unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn test_clear_facet() {
        let mut state = state();
        state.select("cpu", "M1").unwrap();
        state.select("cpu", "M2").unwrap();
        assert!(state.clear("cpu").unwrap());
        assert!(!state.clear("cpu").unwrap());
        assert!(state.is_unconstrained("cpu").unwrap());
    }

    #[test]
    fn test_undeclared_facet_is_an_error() {
        let mut state = state();
        let err = CatalogError::InvalidFacet("color".to_string());
        assert_eq!(state.select("color", "red"), Err(err.clone()));
        assert_eq!(state.deselect("color", "red"), Err(err.clone()));
        assert_eq!(state.is_unconstrained("color"), Err(err));
    }
}
