//! Control commands typed at the interactive prompt

use anyhow::{anyhow, bail, Result};
use dc_core::SortOrder;

/// One discrete user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select { facet: String, value: String },
    Deselect { facet: String, value: String },
    Clear { facet: String },
    Sort { column: String },
    Order(SortOrder),
    Facets,
    Columns,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  select <facet> <value>    add a value to a facet filter
  deselect <facet> <value>  remove a value from a facet filter
  clear <facet>             remove every value of a facet filter
  sort <column>             sort by a column
  order <asc|desc>          set the sort direction
  facets                    list facets, their values and selections
  columns                   list sortable columns
  show                      render the current view
  help                      show this help
  quit                      exit";

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// Values run to the end of the line, so they may contain spaces.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "select" => {
                let (facet, value) = facet_and_value(word, rest)?;
                Command::Select { facet, value }
            }
            "deselect" => {
                let (facet, value) = facet_and_value(word, rest)?;
                Command::Deselect { facet, value }
            }
            "clear" => Command::Clear {
                facet: single_argument(word, rest, "facet")?,
            },
            "sort" => Command::Sort {
                column: single_argument(word, rest, "column")?,
            },
            "order" => Command::Order(single_argument(word, rest, "asc|desc")?.parse()?),
            "facets" => Command::Facets,
            "columns" => Command::Columns,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("Unknown command '{}' (try 'help')", other),
        };
        Ok(Some(command))
    }
}

fn facet_and_value(word: &str, rest: &str) -> Result<(String, String)> {
    let (facet, value) = rest
        .split_once(char::is_whitespace)
        .ok_or_else(|| anyhow!("Usage: {} <facet> <value>", word))?;
    Ok((facet.to_string(), value.trim().to_string()))
}

fn single_argument(word: &str, rest: &str, name: &str) -> Result<String> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        bail!("Usage: {} <{}>", word, name);
    }
    Ok(rest.to_string())
}
