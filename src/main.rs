use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

// 导入库模块
use kpaths::config::Config;
use kpaths::ingest::load_graph;
use kpaths::report::{self, SearchReport};
use kpaths::search::{KShortestPaths, LedgerKind, RouteMode};
use kpaths::utils::logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[clap(version = "0.1.0", author = "KPaths Contributors")]
enum Cli {
    /// Find the K lowest-cost routes between two nodes
    Search {
        #[clap(short, long)]
        config: Option<PathBuf>,
        /// Edge list (CSV)
        #[clap(short, long)]
        input: Option<PathBuf>,
        #[clap(short, long)]
        source: Option<String>,
        #[clap(short, long)]
        destination: Option<String>,
        #[clap(short)]
        k: Option<usize>,
        /// Worker threads, 0 = one per CPU
        #[clap(short, long)]
        workers: Option<usize>,
        #[clap(long, value_enum)]
        ledger: Option<LedgerKind>,
        #[clap(long, value_enum)]
        mode: Option<RouteMode>,
        #[clap(long, value_enum, default_value = "text")]
        format: Format,
        /// Also print the direct-edge distance matrix
        #[clap(long)]
        print_matrix: bool,
    },
    /// Print the direct-edge distance matrix
    Matrix {
        #[clap(short, long)]
        config: Option<PathBuf>,
        #[clap(short, long)]
        input: Option<PathBuf>,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let shown = path.clone();
    Config::load_or_default(path)
        .with_context(|| format!("Failed to load config {:?}", shown))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli {
        Cli::Search {
            config,
            input,
            source,
            destination,
            k,
            workers,
            ledger,
            mode,
            format,
            print_matrix,
        } => {
            let mut config = load_config(config)?;
            if let Some(input) = input {
                config.input.path = input;
            }
            if let Some(source) = source {
                config.search.source = source;
            }
            if let Some(destination) = destination {
                config.search.destination = destination;
            }
            if let Some(k) = k {
                config.search.k = k;
            }
            if let Some(workers) = workers {
                config.search.workers = workers;
            }
            if let Some(ledger) = ledger {
                config.search.ledger = ledger;
            }
            if let Some(mode) = mode {
                config.search.mode = mode;
            }
            config.validate()?;
            logging::init(&config.log)?;

            let result = run_search(&config, format, print_matrix);
            logging::shutdown();
            result?;
        }
        Cli::Matrix { config, input } => {
            let mut config = load_config(config)?;
            if let Some(input) = input {
                config.input.path = input;
            }
            config.validate()?;
            logging::init(&config.log)?;

            let result = load_graph(&config.input.path, &config.input).map(|(graph, _)| {
                print!("{}", report::render_matrix(&graph.build_distance_matrix()));
            });
            logging::shutdown();
            result.with_context(|| format!("Failed to read {}", config.input.path.display()))?;
        }
    }

    Ok(())
}

fn run_search(config: &Config, format: Format, print_matrix: bool) -> Result<()> {
    let (graph, _) = load_graph(&config.input.path, &config.input)
        .with_context(|| format!("Failed to read {}", config.input.path.display()))?;

    if print_matrix {
        print!("{}", report::render_matrix(&graph.build_distance_matrix()));
    }

    let search = &config.search;
    let outcome = KShortestPaths::new(&graph)
        .with_options(search.options())
        .search(&search.source, &search.destination, search.k);

    match format {
        Format::Text => {
            if outcome.is_empty() {
                log::warn!(
                    "no route from {:?} to {:?}",
                    search.source,
                    search.destination
                );
            }
            print!("{}", report::render_text(&outcome.routes));
        }
        Format::Json => {
            let report =
                SearchReport::new(&search.source, &search.destination, search.k, &outcome);
            println!("{}", report::render_json(&report)?);
        }
    }
    Ok(())
}
