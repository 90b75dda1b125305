//! Core functionality for the device catalog viewer
//!
//! This crate provides the record model and the faceted filter/sort engine.
//! Parsing and presentation live in `dc-data` and `dc-views`.

pub mod catalog;
pub mod dataset;
pub mod events;
pub mod facets;
pub mod filter;
pub mod labels;
pub mod selection;
pub mod sort;

use thiserror::Error;

// Re-export commonly used types
pub use catalog::Catalog;
pub use dataset::{coerce, Dataset, DatasetError, Record, Value, HEIGHT, WIDTH};
pub use events::EventBus;
pub use facets::{derive_facet_values, facet_options, Facet, FacetOption, FacetRegistry, ALL};
pub use filter::{filter, matches};
pub use labels::format_label;
pub use selection::{SelectionState, ValueSet};
pub use sort::{compare, sort, sort_columns, SortColumnOption, SortOrder, SortSpec};
pub use data::CatalogSource;

/// Errors raised by the catalog engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Facet '{0}' is not declared in the registry")]
    InvalidFacet(String),

    #[error("Column '{0}' does not exist in the dataset")]
    UnknownColumn(String),

    #[error("Invalid sort order '{0}' (expected 'asc' or 'desc')")]
    InvalidSortOrder(String),
}

pub mod data {
    use crate::Dataset;

    /// Trait for anything that can produce a catalog dataset
    #[async_trait::async_trait]
    pub trait CatalogSource: Send + Sync {
        /// Load the full dataset. Loading is all-or-nothing.
        async fn load(&self) -> anyhow::Result<Dataset>;

        /// Get the source name/path
        fn source_name(&self) -> &str;
    }
}
