//! Record to card projection

use dc_core::{format_label, Dataset, Record, HEIGHT, WIDTH};
use serde::Serialize;
use tracing::debug;

/// Display height of the box drawn for the tallest device
pub const FIXED_BOX_HEIGHT: f64 = 200.0;

/// Unit suffix shown after a field's value
pub fn unit_for(key: &str) -> Option<&'static str> {
    match key.trim() {
        "depth" => Some("mm"),
        "screen-size" => Some("inch"),
        "ram" => Some("GB"),
        "battery" => Some("mAh"),
        _ => None,
    }
}

/// One labelled attribute of a card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecLine {
    pub key: String,
    pub label: String,
    /// Value followed by its unit, if any
    pub value: String,
}

/// Display space needed by a set of cards: the box of the tallest and the
/// widest device
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewFrame {
    pub width: f64,
    pub height: f64,
}

/// Presentation-ready card, recomputed on every render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedViewRecord<'a> {
    #[serde(skip)]
    pub record: &'a Record,
    pub title: String,
    /// Screen size with an inch mark, when the record has one
    pub caption: Option<String>,
    pub height: f64,
    pub width: f64,
    pub visual_height: f64,
    pub visual_width: f64,
    pub specs: Vec<SpecLine>,
}

/// Scales records against dataset-wide extrema
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    max_height: f64,
    max_width: f64,
    box_height: f64,
}

impl Projector {
    /// A non-positive `max_height` projects every box to zero
    pub fn new(max_height: f64, max_width: f64, box_height: f64) -> Self {
        Self {
            max_height,
            max_width,
            box_height,
        }
    }

    pub fn for_dataset(dataset: &Dataset, box_height: f64) -> Self {
        Self::new(dataset.max_height(), dataset.max_width(), box_height)
    }

    /// `box_height / max_height`, or 0 when the maximum is not positive
    pub fn scale(&self) -> f64 {
        self.visual(1.0)
    }

    /// Ratio first, so the tallest device lands on `box_height` exactly
    fn visual(&self, length: f64) -> f64 {
        if self.max_height > 0.0 {
            self.box_height * (length / self.max_height)
        } else {
            0.0
        }
    }

    pub fn frame(&self) -> ViewFrame {
        ViewFrame {
            width: self.visual(self.max_width),
            height: self.visual(self.max_height),
        }
    }

    pub fn project<'a>(&self, record: &'a Record) -> DerivedViewRecord<'a> {
        let height = record.height();
        let width = record.width();

        let title = ["brand", "model"]
            .iter()
            .filter_map(|key| record.text(key))
            .collect::<Vec<_>>()
            .join(" ");

        let specs = record
            .iter()
            .filter(|(key, _)| *key != HEIGHT && *key != WIDTH)
            .map(|(key, value)| SpecLine {
                key: key.to_string(),
                label: format_label(key),
                value: match unit_for(key) {
                    Some(unit) => format!("{} {}", value, unit),
                    None => value.to_text(),
                },
            })
            .collect();

        DerivedViewRecord {
            record,
            title,
            caption: record.text("screen-size").map(|size| format!("{}\"", size)),
            height,
            width,
            visual_height: self.visual(height),
            visual_width: self.visual(width),
            specs,
        }
    }

    pub fn project_all<'a>(&self, records: &[&'a Record]) -> Vec<DerivedViewRecord<'a>> {
        debug!("Projecting {} records at scale {:.4}", records.len(), self.scale());
        records.iter().map(|&record| self.project(record)).collect()
    }
}

/// Project one record at the fixed box height
pub fn project(record: &Record, max_height: f64, max_width: f64) -> DerivedViewRecord<'_> {
    Projector::new(max_height, max_width, FIXED_BOX_HEIGHT).project(record)
}
