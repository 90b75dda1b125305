//! Device catalog viewer entry point

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use parking_lot::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dc_core::events::events::{SelectionChanged, SortChanged};
use dc_core::events::handler_from_fn;
use dc_core::{Catalog, EventBus, SortOrder};
use dc_data::CsvSource;
use dc_views::{CardRenderer, ExportFormat, JsonCards, TextCards};

mod commands;
mod config;
mod session;

use config::ViewerConfig;
use session::Session;

/// Browse a device catalog with faceted filters and sorting
#[derive(Parser, Debug)]
#[command(name = "catalog", version, about)]
struct Cli {
    /// CSV file with a header row; `height` and `width` are required
    csv: PathBuf,

    /// JSON viewer configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initial facet selection, repeatable
    #[arg(long = "select", value_name = "FACET=VALUE")]
    selections: Vec<String>,

    /// Sort column
    #[arg(long)]
    sort: Option<String>,

    /// Sort direction (asc or desc)
    #[arg(long)]
    order: Option<SortOrder>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Read select/deselect/sort/order commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// List facets and their values, then exit
    #[arg(long)]
    list_facets: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Log every state change published by the catalog
fn event_log() -> Arc<EventBus> {
    let bus = Arc::new(EventBus::new());
    let changes = Arc::new(Mutex::new(0usize));

    let counter = changes.clone();
    bus.subscribe::<SelectionChanged>(handler_from_fn(move |event| {
        if let Some(e) = event.as_any().downcast_ref::<SelectionChanged>() {
            let mut count = counter.lock();
            *count += 1;
            debug!(
                "selection change #{}: {} {:?} selected={}",
                *count, e.facet, e.value, e.selected
            );
        }
    }));
    bus.subscribe::<SortChanged>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<SortChanged>() {
            debug!("sort changed: {} {}", e.column, e.order);
        }
    }));
    bus
}

fn parse_selection(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(facet, value)| (facet.trim(), value.trim()))
        .with_context(|| format!("Invalid --select '{}', expected FACET=VALUE", raw))
}

fn run<R: CardRenderer>(cli: &Cli, catalog: Catalog, renderer: R, box_height: f64) -> Result<()> {
    let mut session = Session::new(catalog, renderer, box_height);

    if cli.interactive {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        writeln!(stdout, "Type 'help' for commands.")?;
        session.run(stdin.lock(), &mut stdout)
    } else {
        session.render()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => ViewerConfig::from_file(path)?,
        None => ViewerConfig::default(),
    };

    // Initialize tokio runtime for the load
    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let source = CsvSource::new(&cli.csv, config.load.clone());
    let catalog = runtime.block_on(Catalog::load_from(&source, config.registry(), Some(event_log())))?;
    info!("Loaded {} devices from {}", catalog.dataset().len(), catalog.source_name());

    let mut sort = config.sort.clone();
    if let Some(column) = &cli.sort {
        sort.column = column.clone();
    }
    if let Some(order) = cli.order {
        sort.order = order;
    }
    let mut catalog = catalog.with_sort(sort)?;

    for raw in &cli.selections {
        let (facet, value) = parse_selection(raw)?;
        catalog.select(facet, value)?;
    }

    if cli.list_facets {
        let mut stdout = io::stdout();
        for (facet, options) in catalog.facet_options() {
            let values: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
            writeln!(stdout, "{} ({}): {}", facet.label, facet.key, values.join(", "))?;
        }
        return Ok(());
    }

    let stdout = io::stdout();
    match cli.format {
        ExportFormat::Text => run(&cli, catalog, TextCards::new(stdout), config.box_height),
        ExportFormat::Json => run(&cli, catalog, JsonCards::new(stdout, cli.pretty), config.box_height),
    }
}
