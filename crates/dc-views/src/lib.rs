//! Presentation layer for the device catalog viewer
//!
//! Projects matched records into display-ready cards and hands them to a
//! renderer.

mod export;
mod projector;

pub use export::{CardRenderer, ExportFormat, JsonCards, TextCards};
pub use projector::{
    project, unit_for, DerivedViewRecord, Projector, SpecLine, ViewFrame, FIXED_BOX_HEIGHT,
};
