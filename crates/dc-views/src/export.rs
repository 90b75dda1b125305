//! Card rendering to text and JSON

use std::io::Write;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::projector::{DerivedViewRecord, ViewFrame};

/// Output format for rendered cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

impl ExportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            other => bail!("Unknown output format '{}' (expected text or json)", other),
        }
    }
}

/// Consumes projected cards and presents them
pub trait CardRenderer {
    fn render(&mut self, frame: ViewFrame, cards: &[DerivedViewRecord<'_>]) -> Result<()>;
}

/// Plain-text cards, one block per device
pub struct TextCards<W: Write> {
    out: W,
}

impl<W: Write> TextCards<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CardRenderer for TextCards<W> {
    fn render(&mut self, frame: ViewFrame, cards: &[DerivedViewRecord<'_>]) -> Result<()> {
        if cards.is_empty() {
            writeln!(self.out, "No devices match the current filters.")?;
            return Ok(());
        }

        writeln!(
            self.out,
            "{} device(s), frame {:.0} x {:.0}",
            cards.len(),
            frame.width,
            frame.height
        )?;

        for card in cards {
            writeln!(self.out)?;
            writeln!(self.out, "== {} ==", card.title)?;
            write!(
                self.out,
                "  [box {:.1} x {:.1}]",
                card.visual_width, card.visual_height
            )?;
            if let Some(caption) = &card.caption {
                write!(self.out, " {}", caption)?;
            }
            writeln!(self.out)?;
            writeln!(self.out, "  Height: {}mm  Width: {}mm", card.height, card.width)?;
            for spec in &card.specs {
                writeln!(self.out, "  {}: {}", spec.label, spec.value)?;
            }
        }

        self.out.flush().context("Failed to flush card output")
    }
}

#[derive(Serialize)]
struct JsonView<'c, 'a> {
    frame: ViewFrame,
    cards: &'c [DerivedViewRecord<'a>],
}

/// Cards serialized as a single JSON document
pub struct JsonCards<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonCards<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CardRenderer for JsonCards<W> {
    fn render(&mut self, frame: ViewFrame, cards: &[DerivedViewRecord<'_>]) -> Result<()> {
        let view = JsonView { frame, cards };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, &view)?;
        } else {
            serde_json::to_writer(&mut self.out, &view)?;
        }
        writeln!(self.out)?;
        self.out.flush().context("Failed to flush card output")
    }
}
