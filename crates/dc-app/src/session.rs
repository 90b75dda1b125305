//! Forwards user actions to the catalog and re-renders after each change

use std::io::{BufRead, Write};

use anyhow::Result;
use dc_core::Catalog;
use dc_views::{CardRenderer, Projector};
use tracing::debug;

use crate::commands::{Command, HELP};

/// Whether the control loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A catalog bound to a renderer
pub struct Session<R: CardRenderer> {
    catalog: Catalog,
    renderer: R,
    box_height: f64,
}

impl<R: CardRenderer> Session<R> {
    pub fn new(catalog: Catalog, renderer: R, box_height: f64) -> Self {
        Self {
            catalog,
            renderer,
            box_height,
        }
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Full filter, sort and project pass handed to the renderer
    pub fn render(&mut self) -> Result<()> {
        let records = self.catalog.view();
        let projector = Projector::for_dataset(self.catalog.dataset(), self.box_height);
        let cards = projector.project_all(&records);
        self.renderer.render(projector.frame(), &cards)
    }

    /// Apply one command. State changes trigger a render; listings go to `out`.
    pub fn apply(&mut self, command: &Command, out: &mut impl Write) -> Result<Flow> {
        let changed = match command {
            Command::Select { facet, value } => self.catalog.select(facet, value)?,
            Command::Deselect { facet, value } => self.catalog.deselect(facet, value)?,
            Command::Clear { facet } => self.catalog.clear_facet(facet)?,
            Command::Sort { column } => self.catalog.set_sort_column(column)?,
            Command::Order(order) => self.catalog.set_sort_order(*order),
            Command::Show => true,
            Command::Facets => {
                self.write_facets(out)?;
                false
            }
            Command::Columns => {
                self.write_columns(out)?;
                false
            }
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                false
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        if changed {
            self.render()?;
        } else {
            debug!("{:?} left the view unchanged", command);
        }
        Ok(Flow::Continue)
    }

    fn write_facets(&self, out: &mut impl Write) -> Result<()> {
        for (facet, options) in self.catalog.facet_options() {
            let selected = self.catalog.selection().selected(&facet.key)?;
            let values: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
            writeln!(out, "{} ({}): {}", facet.label, facet.key, values.join(", "))?;
            if !selected.is_empty() {
                let chosen: Vec<&str> = selected.iter().map(String::as_str).collect();
                writeln!(out, "  selected: {}", chosen.join(", "))?;
            }
        }
        Ok(())
    }

    fn write_columns(&self, out: &mut impl Write) -> Result<()> {
        let order = self.catalog.sort_spec().order;
        for column in self.catalog.sort_columns() {
            let marker = if column.selected {
                format!(" <- {}", order)
            } else {
                String::new()
            };
            writeln!(out, "{} ({}){}", column.label, column.column, marker)?;
        }
        Ok(())
    }

    /// Read commands until `quit` or end of input.
    ///
    /// Bad commands are reported on `out` and the loop continues.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        self.render()?;
        for line in input.lines() {
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "error: {}", e)?;
                    continue;
                }
            };
            match self.apply(&command, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "error: {}", e)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_core::{Dataset, FacetRegistry, Record};
    use dc_views::{DerivedViewRecord, ViewFrame};

    /// Records card titles of every render
    #[derive(Default)]
    struct Recorder {
        renders: Vec<Vec<String>>,
    }

    impl CardRenderer for Recorder {
        fn render(&mut self, _frame: ViewFrame, cards: &[DerivedViewRecord<'_>]) -> Result<()> {
            self.renders.push(cards.iter().map(|c| c.title.clone()).collect());
            Ok(())
        }
    }

    fn device(brand: &str, model: &str, year: f64, height: f64) -> Record {
        Record::new()
            .with("brand", brand)
            .with("model", model)
            .with("launch-year", year)
            .with("operating-system", "Android")
            .with("cpu", "Snapdragon")
            .with("height", height)
            .with("width", 70.0)
    }

    fn session() -> Session<Recorder> {
        let dataset = Dataset::from_records(vec![
            device("Samsung", "S21", 2021.0, 151.7),
            device("Google", "Pixel 6", 2021.0, 158.6),
            device("Samsung", "S20", 2020.0, 151.7),
        ])
        .unwrap();
        Session::new(
            Catalog::new(dataset, FacetRegistry::default()),
            Recorder::default(),
            200.0,
        )
    }

    #[test]
    fn test_renders_only_on_change() {
        let mut session = session();
        let mut out = Vec::new();

        let select = Command::Select {
            facet: "brand".to_string(),
            value: "Samsung".to_string(),
        };
        session.apply(&select, &mut out).unwrap();
        session.apply(&select, &mut out).unwrap();
        session
            .apply(
                &Command::Select {
                    facet: "brand".to_string(),
                    value: "all".to_string(),
                },
                &mut out,
            )
            .unwrap();

        assert_eq!(session.renderer().renders.len(), 1);
        assert_eq!(session.renderer().renders[0], vec!["Samsung S21", "Samsung S20"]);
    }

    #[test]
    fn test_run_script() {
        let mut session = session();
        let script = "\
select launch-year 2021
order desc
bogus
deselect launch-year 2021
sort model
select color red
quit
show
";
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();

        let renders = &session.renderer().renders;
        // initial, select, order, deselect, sort
        assert_eq!(renders.len(), 5);
        assert_eq!(renders[0], vec!["Samsung S21", "Samsung S20", "Google Pixel 6"]);
        assert_eq!(renders[2], vec!["Google Pixel 6", "Samsung S21"]);
        assert_eq!(renders[4], vec!["Samsung S21", "Samsung S20", "Google Pixel 6"]);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("error: Unknown command 'bogus'"));
        assert!(out.contains("error: Facet 'color' is not declared"));
    }

    #[test]
    fn test_listings() {
        let mut session = session();
        session.catalog_mut().select("brand", "Google").unwrap();
        let mut out = Vec::new();
        session.apply(&Command::Facets, &mut out).unwrap();
        session.apply(&Command::Columns, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Brand (brand): All Brands, Samsung, Google"));
        assert!(out.contains("  selected: Google"));
        assert!(out.contains("Launch year (launch-year)"));
        assert!(out.contains("Height (height) <- asc"));
        assert!(session.renderer().renders.is_empty());
    }
}
