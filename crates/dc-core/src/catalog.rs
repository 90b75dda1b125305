//! Catalog engine state
//!
//! [`Catalog`] owns the loaded dataset, the facet registry, the current
//! selection and the sort configuration. Every call to [`Catalog::view`] is a
//! fresh filter-then-sort pass; nothing is memoized between renders.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::data::CatalogSource;
use crate::events::events::{DatasetLoaded, SelectionChanged, SortChanged};
use crate::events::EventBus;
use crate::facets::{facet_options, Facet, FacetOption};
use crate::sort::{sort, sort_columns, SortColumnOption};
use crate::{filter, CatalogError, Dataset, FacetRegistry, Record, SelectionState, SortOrder, SortSpec};

/// The faceted browsing state for one loaded catalog
pub struct Catalog {
    dataset: Dataset,
    source_name: String,
    facets: FacetRegistry,
    selection: SelectionState,
    sort: SortSpec,
    events: Option<Arc<EventBus>>,
}

impl Catalog {
    /// Create a catalog with every facet unconstrained and the default sort
    pub fn new(dataset: Dataset, facets: FacetRegistry) -> Self {
        let selection = SelectionState::new(&facets);
        Self {
            dataset,
            source_name: String::from("memory"),
            facets,
            selection,
            sort: SortSpec::default(),
            events: None,
        }
    }

    /// Load a dataset from `source` and build a catalog around it
    pub async fn load_from(
        source: &dyn CatalogSource,
        facets: FacetRegistry,
        events: Option<Arc<EventBus>>,
    ) -> anyhow::Result<Self> {
        let dataset = source
            .load()
            .await
            .with_context(|| format!("Failed to load catalog from {}", source.source_name()))?;

        let mut catalog = Self::new(dataset, facets);
        catalog.events = events;
        catalog.source_name = source.source_name().to_string();
        catalog.announce_dataset();
        Ok(catalog)
    }

    /// Attach an event bus for state-change notifications
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    /// Set the initial sort, validating the column
    pub fn with_sort(mut self, spec: SortSpec) -> Result<Self, CatalogError> {
        self.check_column(&spec.column)?;
        self.sort = spec;
        Ok(self)
    }

    /// Replace the dataset. Selections persist; a sort column that no longer
    /// exists falls back to the default.
    pub fn reload(&mut self, dataset: Dataset, source_name: impl Into<String>) {
        self.dataset = dataset;
        self.source_name = source_name.into();

        if !self.dataset.has_column(&self.sort.column) {
            warn!(
                "Sort column '{}' missing after reload, reverting to '{}'",
                self.sort.column,
                SortSpec::default().column
            );
            self.sort.column = SortSpec::default().column;
        }

        self.announce_dataset();
    }

    fn announce_dataset(&self) {
        info!(
            "Catalog '{}' loaded: {} records, {} columns",
            self.source_name,
            self.dataset.len(),
            self.dataset.columns().len()
        );
        self.publish(DatasetLoaded {
            source_name: self.source_name.clone(),
            row_count: self.dataset.len(),
            column_count: self.dataset.columns().len(),
        });
    }

    fn publish<E: crate::events::Event>(&self, event: E) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }

    fn check_column(&self, column: &str) -> Result<(), CatalogError> {
        if self.dataset.has_column(column) {
            Ok(())
        } else {
            Err(CatalogError::UnknownColumn(column.to_string()))
        }
    }

    /// Add a value to a facet's selection. Returns whether the state changed.
    pub fn select(&mut self, facet_key: &str, value: &str) -> Result<bool, CatalogError> {
        let changed = self.selection.select(facet_key, value)?;
        if changed {
            debug!("Selected {}={}", facet_key, value);
            self.publish(SelectionChanged {
                facet: facet_key.to_string(),
                value: Some(value.to_string()),
                selected: true,
            });
        }
        Ok(changed)
    }

    /// Remove a value from a facet's selection. Returns whether the state changed.
    pub fn deselect(&mut self, facet_key: &str, value: &str) -> Result<bool, CatalogError> {
        let changed = self.selection.deselect(facet_key, value)?;
        if changed {
            debug!("Deselected {}={}", facet_key, value);
            self.publish(SelectionChanged {
                facet: facet_key.to_string(),
                value: Some(value.to_string()),
                selected: false,
            });
        }
        Ok(changed)
    }

    /// Remove every selected value of a facet
    pub fn clear_facet(&mut self, facet_key: &str) -> Result<bool, CatalogError> {
        let changed = self.selection.clear(facet_key)?;
        if changed {
            debug!("Cleared facet {}", facet_key);
            self.publish(SelectionChanged {
                facet: facet_key.to_string(),
                value: None,
                selected: false,
            });
        }
        Ok(changed)
    }

    pub fn set_sort_column(&mut self, column: &str) -> Result<bool, CatalogError> {
        self.check_column(column)?;
        if self.sort.column == column {
            return Ok(false);
        }
        self.sort.column = column.to_string();
        self.announce_sort();
        Ok(true)
    }

    pub fn set_sort_order(&mut self, order: SortOrder) -> bool {
        if self.sort.order == order {
            return false;
        }
        self.sort.order = order;
        self.announce_sort();
        true
    }

    fn announce_sort(&self) {
        debug!("Sorting by {} {}", self.sort.column, self.sort.order);
        self.publish(SortChanged {
            column: self.sort.column.clone(),
            order: self.sort.order,
        });
    }

    /// Matching records, ordered by the current sort
    pub fn view(&self) -> Vec<&Record> {
        let mut records = filter(&self.dataset, &self.selection, &self.facets);
        sort(&mut records, &self.sort);
        debug!(
            "View recomputed: {} of {} records match",
            records.len(),
            self.dataset.len()
        );
        records
    }

    /// Option lists for every declared facet, in declaration order
    pub fn facet_options(&self) -> Vec<(&Facet, Vec<FacetOption>)> {
        self.facets
            .iter()
            .map(|facet| (facet, facet_options(&self.dataset, facet)))
            .collect()
    }

    pub fn sort_columns(&self) -> Vec<SortColumnOption> {
        sort_columns(&self.dataset, &self.sort)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn facets(&self) -> &FacetRegistry {
        &self.facets
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }
}
