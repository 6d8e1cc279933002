use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use termcolor::ColorChoice;
use tracing_subscriber::EnvFilter;
use versefind::codec::{decode_with, DecodeOptions, Passage, PassageWriter, Translation};
use versefind::output::{self, HeaderLocale};
use versefind::query::{filter_clauses, parse_query_string, parse_query_string_strict, FilterOptions, UnionMode};
use versefind::session::Session;
use versefind::source::DirectorySource;
use versefind::store::FileStore;
use versefind::utils::{get_config_path, get_store_dir, progress, AppConfig};
use versefind::stats;

#[derive(Parser)]
#[command(name = "versefind")]
#[command(about = "Compact passage codec and reference query filter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Query (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    #[command(flatten)]
    load: LoadArgs,
}

#[derive(Args, Clone, Default)]
struct LoadArgs {
    /// Translation to load (defaults to the configured one)
    #[arg(short, long, global = true)]
    translation: Option<String>,

    /// Directory holding `<translation>.txt` flat files
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Args, Default)]
struct QueryArgs {
    /// Keep only the first occurrence of a passage matched by several clauses
    #[arg(long)]
    distinct: bool,

    /// Reject reversed ranges and clauses that constrain nothing
    #[arg(long)]
    strict: bool,

    /// Print matches as a JSON array
    #[arg(long)]
    json: bool,

    /// Only print the number of matches
    #[arg(short, long)]
    count: bool,

    /// Stop after this many matches
    #[arg(long)]
    limit: Option<usize>,

    /// Language of chapter headers (en or fi)
    #[arg(long)]
    locale: Option<HeaderLocale>,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
    color: ColorArg,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum ColorArg {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorArg {
    fn choice(self) -> ColorChoice {
        match self {
            ColorArg::Auto if io::stdout().is_terminal() => ColorChoice::Auto,
            ColorArg::Auto | ColorArg::Never => ColorChoice::Never,
            ColorArg::Always => ColorChoice::Always,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON passage list into the flat-file format
    Encode {
        /// JSON file with an array of passages
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a flat file into a JSON passage list
    Decode {
        /// Flat file to decode
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on malformed headers, orphan lines and empty verses
        #[arg(long)]
        strict: bool,
    },
    /// Filter a translation and print the matching verses
    Query {
        /// Query, e.g. `joh 3:16` or `gen 1 "valo"; ps 23`
        #[arg(required = true)]
        words: Vec<String>,

        #[command(flatten)]
        args: QueryArgs,
    },
    /// Filter interactively (TUI)
    Search {
        /// Initial query
        query: Option<String>,
    },
    /// Show statistics of a stored translation
    Stats,
    /// Show the configuration file, optionally writing the defaults
    Config {
        /// Write the current configuration to disk
        #[arg(long)]
        init: bool,
    },
    /// Manage stored translations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// List stored translations
    List,
    /// Remove a stored translation
    Remove {
        /// Translation to remove
        translation: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Some(Commands::Encode { input, output }) => encode_file(&input, output.as_deref())?,
        Some(Commands::Decode {
            input,
            output,
            strict,
        }) => decode_file(&input, output.as_deref(), strict)?,
        Some(Commands::Query { words, args }) => {
            run_query(&config, &cli.load, &words.join(" "), &args)?;
        }
        Some(Commands::Search { query }) => {
            run_interactive(&config, &cli.load, query)?;
        }
        Some(Commands::Stats) => {
            let config = apply_load_args(config, &cli.load);
            stats::show_stats(&get_store_dir()?, &config.translation)?;
        }
        Some(Commands::Config { init }) => {
            let path = get_config_path()?;
            if init {
                config.save()?;
                println!("Wrote {}", path.display());
            }
            println!("Config file: {}", path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Some(Commands::Cache { action }) => match action {
            CacheAction::List => stats::list_stores(&get_store_dir()?)?,
            CacheAction::Remove { translation } => {
                let translation = Translation::new(translation);
                let store = FileStore::in_dir(&get_store_dir()?, &translation);
                if store.remove()? {
                    println!("Removed stored translation: {}", translation);
                } else {
                    println!("Translation {} was not stored", translation);
                }
            }
        },
        None => {
            if cli.query.is_empty() {
                run_interactive(&config, &cli.load, None)?;
            } else {
                run_query(&config, &cli.load, &cli.query.join(" "), &QueryArgs::default())?;
            }
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn apply_load_args(mut config: AppConfig, load: &LoadArgs) -> AppConfig {
    if let Some(translation) = &load.translation {
        config.translation = Translation::new(translation.as_str());
    }
    if let Some(dir) = &load.data_dir {
        config.data_dir = Some(dir.clone());
    }
    config
}

/// Open an output file, or stdout when no path is given
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn encode_file(input: &Path, output: Option<&Path>) -> Result<()> {
    let content =
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let passages: Vec<Passage> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse passages from {}", input.display()))?;

    let mut writer = PassageWriter::new(open_output(output)?);
    writer
        .write_all(&passages)
        .with_context(|| format!("Failed to encode {}", input.display()))?;
    tracing::info!(count = writer.written(), "encoded passages");
    writer.finish()?;
    Ok(())
}

fn decode_file(input: &Path, output: Option<&Path>, strict: bool) -> Result<()> {
    let content =
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let passages = decode_with(&content, DecodeOptions { strict })
        .with_context(|| format!("Failed to decode {}", input.display()))?;
    tracing::info!(count = passages.len(), "decoded passages");

    let mut out = open_output(output)?;
    serde_json::to_writer_pretty(&mut out, &passages)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn open_session(config: &AppConfig) -> Result<Session> {
    let mut store = FileStore::open(&config.translation)?;
    let source = DirectorySource::new(config.effective_data_dir()?);

    let spinner = progress::spinner(format!("Loading {}", config.translation));
    let session = Session::initialize(config, &mut store, &source);
    spinner.finish_and_clear();
    session
}

fn run_query(config: &AppConfig, load: &LoadArgs, query: &str, args: &QueryArgs) -> Result<()> {
    let mut config = apply_load_args(config.clone(), load);
    if args.distinct {
        config.union = UnionMode::Distinct;
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }

    // Validate before loading so a bad query fails fast
    let clauses = if args.strict {
        parse_query_string_strict(query)?
    } else {
        parse_query_string(query)
    };

    let session = open_session(&config)?;
    let mut results = filter_clauses(
        session.passages(),
        &clauses,
        FilterOptions { union: config.union },
    );
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }

    if args.count {
        output::print_count(results.len())?;
    } else if args.json {
        output::print_json(&results)?;
    } else {
        output::print_passages(&results, session.locale(), args.color.choice())?;
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn run_interactive(config: &AppConfig, load: &LoadArgs, query: Option<String>) -> Result<()> {
    use versefind::tui::{self, TuiOptions};

    let config = apply_load_args(config.clone(), load);
    let store = FileStore::open(&config.translation)?;
    let source = DirectorySource::new(config.effective_data_dir()?);

    tui::run(
        store,
        source,
        TuiOptions {
            translation: config.translation.clone(),
            initial_query: query.unwrap_or_else(|| config.initial_query.clone()),
            locale: config.locale,
            debounce: config.debounce_duration(),
            filter: FilterOptions { union: config.union },
        },
    )
}

#[cfg(not(feature = "interactive"))]
fn run_interactive(_config: &AppConfig, _load: &LoadArgs, _query: Option<String>) -> Result<()> {
    anyhow::bail!("Interactive mode is not available: built without the `interactive` feature")
}
