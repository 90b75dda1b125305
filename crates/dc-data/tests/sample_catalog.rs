//! End-to-end checks against the bundled sample catalog

use std::path::PathBuf;

use dc_core::{Catalog, FacetRegistry, Record, SortOrder};
use dc_data::{summarize, ColumnKind, CsvSource, LoadConfig};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/devices.csv")
}

fn models(records: &[&Record]) -> Vec<String> {
    records.iter().filter_map(|r| r.text("model")).collect()
}

#[tokio::test]
async fn test_sample_catalog_browse() {
    let source = CsvSource::new(sample_path(), LoadConfig::default());
    let mut catalog = Catalog::load_from(&source, FacetRegistry::default(), None)
        .await
        .unwrap();

    assert_eq!(catalog.dataset().len(), 8);
    assert_eq!(catalog.dataset().max_height(), 253.8);

    catalog.select("brand", "Apple").unwrap();
    catalog.select("launch-year", "2021").unwrap();
    catalog.set_sort_order(SortOrder::Desc);
    assert_eq!(models(&catalog.view()), vec!["iPad mini", "iPhone 13 mini"]);

    catalog.deselect("launch-year", "2021").unwrap();
    catalog.set_sort_column("screen-size").unwrap();
    assert_eq!(
        models(&catalog.view()),
        vec!["iPad mini", "iPhone 12", "iPhone 13 mini"]
    );
}

#[test]
fn test_sample_catalog_column_kinds() {
    let dataset = CsvSource::new(sample_path(), LoadConfig::default())
        .load_blocking()
        .unwrap();
    let kinds: Vec<_> = summarize(&dataset).into_iter().map(|c| (c.name, c.kind)).collect();

    assert!(kinds.contains(&("brand".to_string(), ColumnKind::Text)));
    assert!(kinds.contains(&("launch-year".to_string(), ColumnKind::Numeric)));
    assert!(kinds.iter().all(|(_, kind)| *kind != ColumnKind::Mixed));
}
