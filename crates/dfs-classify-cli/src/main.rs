//! dfsc - classify the edges of a directed graph by depth-first traversal.
//!
//! Graphs come from a literal edge list, a file, stdin, or a seeded random
//! generator. Results go to stdout as text or JSON; logs go to stderr.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dfs_classify_core::{EngineKind, MAX_CLOCK_BASE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod generate;
mod render;

use commands::{classify, compare, config as config_cmd, dag, GraphSource, RunOptions};
use config::Config;
use generate::RandomGraphSpec;
use render::{OutputFormat, TextOptions};

/// Classify directed graph edges as tree, back, forward or cross.
#[derive(Parser, Debug)]
#[command(
    name = "dfsc",
    author,
    version,
    about = "Depth-first edge classification for directed graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where to read the graph from. Stdin when neither `--edges` nor `--file` is given.
#[derive(Args, Debug)]
struct InputArgs {
    /// Literal edge list, e.g. "0->1; 1->2".
    #[arg(short, long)]
    edges: Option<String>,

    /// Edge list file.
    #[arg(short, long, conflicts_with = "edges")]
    file: Option<PathBuf>,

    /// Read the edge list as JSON (`[[u, v], ...]`).
    #[arg(long)]
    json: bool,
}

impl InputArgs {
    fn source(&self) -> GraphSource {
        match (&self.edges, &self.file) {
            (Some(edges), _) => GraphSource::Inline(edges.clone()),
            (None, Some(path)) => GraphSource::File(path.clone()),
            (None, None) => GraphSource::Stdin,
        }
    }
}

/// Engine and rendering flags; unset flags fall back to the config.
#[derive(Args, Debug)]
struct OutputArgs {
    /// Traversal engine: recursive or iterative.
    #[arg(long)]
    engine: Option<EngineKind>,

    /// Output format: text or json.
    #[arg(long)]
    format: Option<String>,

    /// Include the adjacency matrix in text output.
    #[arg(long)]
    matrix: bool,

    /// First timestamp handed out by the traversal clock.
    #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_CLOCK_BASE))]
    clock_base: Option<u64>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify every edge of a graph.
    Classify {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate a random graph and classify it.
    Random {
        /// Number of vertices, labelled 0..N.
        #[arg(short = 'n', long, default_value_t = 10)]
        vertices: u64,

        /// Number of edges (random in 9..=45 when omitted).
        #[arg(short, long)]
        edges: Option<usize>,

        /// Seed for the generator; printed so runs can be reproduced.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Allow edges from a vertex to itself.
        #[arg(long)]
        allow_self_loops: bool,

        /// Allow the same edge more than once.
        #[arg(long)]
        allow_duplicates: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the graph with its back edges removed.
    Dag {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run both engines on a graph and check they agree.
    Compare {
        #[command(flatten)]
        input: InputArgs,

        /// First timestamp handed out by the traversal clock.
        #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_CLOCK_BASE))]
        clock_base: Option<u64>,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false);
    if std::env::var_os("RUST_LOG").is_some() {
        subscriber.with_env_filter(EnvFilter::from_default_env()).init();
    } else {
        subscriber.with_max_level(level).init();
    }

    let config = Config::load()?;

    match cli.command {
        Commands::Classify { input, output } => {
            let options = run_options(&config, &output)?;
            let graph = commands::load_graph(&input.source(), input.json)?;
            classify::execute(&graph, &options, None)?;
        }

        Commands::Random {
            vertices,
            edges,
            seed,
            allow_self_loops,
            allow_duplicates,
            output,
        } => {
            let options = run_options(&config, &output)?;
            let seed = seed
                .or(config.seed)
                .unwrap_or_else(|| rand::rng().random());
            info!(seed, vertices, "random_seed");

            let spec = RandomGraphSpec {
                vertices,
                edges,
                allow_self_loops,
                allow_duplicates,
            };
            let graph = generate::generate(&spec, &mut StdRng::seed_from_u64(seed));
            classify::execute(&graph, &options, Some(seed))?;
        }

        Commands::Dag { input, output } => {
            let options = run_options(&config, &output)?;
            let graph = commands::load_graph(&input.source(), input.json)?;
            dag::execute(&graph, &options)?;
        }

        Commands::Compare { input, clock_base } => {
            let classify = config.classify_config(None, clock_base)?;
            let graph = commands::load_graph(&input.source(), input.json)?;
            compare::execute(&graph, &classify)?;
        }

        Commands::Config(config_cmd_inner) => {
            let mut config = config;
            match config_cmd_inner {
                ConfigCommands::Show => {
                    config_cmd::show(&config)?;
                }
                ConfigCommands::Set { key, value } => {
                    config_cmd::set(&mut config, &key, &value)?;
                }
                ConfigCommands::Get { key } => {
                    config_cmd::get(&config, &key)?;
                }
                ConfigCommands::Reset => {
                    config_cmd::reset()?;
                }
                ConfigCommands::Path => {
                    if let Some(path) = Config::config_file_path() {
                        println!("{}", path.display());
                    } else {
                        println!("(no config file path available)");
                    }
                }
            }
        }
    }

    Ok(())
}

/// Merge command-line output flags over the loaded config.
fn run_options(config: &Config, args: &OutputArgs) -> Result<RunOptions> {
    let classify = config.classify_config(args.engine, args.clock_base)?;
    let format: OutputFormat = match &args.format {
        Some(format) => format.parse()?,
        None => config.format,
    };

    Ok(RunOptions {
        classify,
        format,
        text: TextOptions {
            matrix: args.matrix || config.show_matrix,
        },
    })
}
