// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use yifysub::app_config::{Config, LogLevel};
use yifysub::app_controller::{Controller, FoundSubtitle, SubtitleListener};
use yifysub::host::{Action, Invocation};
use yifysub::language_utils;
use yifysub::omdb_client::OmdbClient;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search subtitles for a movie by IMDB identifier or title + year
    Search(SearchArgs),

    /// Download one subtitle file from a previously found archive
    Download(DownloadArgs),

    /// Run a host-convention plugin invocation (handle + parameter string)
    Plugin(PluginArgs),

    /// Generate shell completions for yifysub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SearchArgs {
    /// IMDB identifier (e.g., 'tt0133093')
    #[arg(short, long)]
    imdb_id: Option<String>,

    /// Movie title, resolved to an IMDB identifier via OMDb
    #[arg(short, long, requires = "year")]
    title: Option<String>,

    /// Year of release (with --title)
    #[arg(short, long)]
    year: Option<u16>,

    /// Accepted languages: names or ISO 639 codes, comma-separated
    #[arg(short, long, value_delimiter = ',')]
    languages: Vec<String>,
}

#[derive(Parser, Debug)]
struct DownloadArgs {
    /// Archive URL from an earlier search result
    url: String,

    /// Subtitle filename inside the archive
    filename: String,

    /// Working directory for the extracted file
    #[arg(short, long)]
    workdir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PluginArgs {
    /// Host handle (opaque, logged only)
    handle: i64,

    /// Raw parameter string in the host's calling convention
    parameters: String,
}

/// yifysub - YIFY subtitle search and download
///
/// Searches the YIFY subtitle listing site for a movie's subtitles, filtered
/// by language, and downloads selected subtitle files from their archives.
#[derive(Parser, Debug)]
#[command(name = "yifysub")]
#[command(version = "1.0.0")]
#[command(about = "YIFY subtitle search and download tool")]
#[command(long_about = "yifysub locates movie subtitles on the YIFY subtitle listing site by IMDB
identifier and extracts them from their ZIP archives.

EXAMPLES:
    yifysub search -i tt0133093 -l English,Persian
    yifysub search -t \"The Matrix\" -y 1999
    yifysub download https://example.com/subtitle.zip matrix.srt -w /tmp/subs
    yifysub plugin 1 '?action=search&languages=en%2Cfa'
    yifysub completions bash > yifysub.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Listener for the command line: prints each event and keeps counts
#[derive(Debug, Default)]
struct CliService {
    num_found: usize,
    num_downloaded: usize,
}

impl SubtitleListener for CliService {
    fn on_subtitle_found(&mut self, subtitle: &FoundSubtitle) {
        self.num_found += 1;
        info!(
            "Found {} subtitle {}:{}",
            subtitle.language, subtitle.url, subtitle.filename
        );
        println!(
            "{:3}. [{}] rating {}  {}  {}",
            self.num_found, subtitle.language, subtitle.rating, subtitle.filename, subtitle.url
        );
    }

    fn on_subtitle_downloaded(&mut self, path: &Path) {
        self.num_downloaded += 1;
        info!("Subtitle {} downloaded", path.display());
        println!("{}", path.display());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "yifysub", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_or_create_config(&cli.config_path, cli.log_level)?;
    config.validate().context("Configuration validation failed")?;

    match cli.command {
        Commands::Search(args) => run_search(args, &config).await,
        Commands::Download(args) => run_download(args, &config).await,
        Commands::Plugin(args) => run_plugin(args, &config).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}

/// Load the configuration file, creating a default one on first run
fn load_or_create_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to: {}", config_path))?;
        config
    };

    if let Some(cli_level) = log_level {
        config.log_level = cli_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

async fn run_search(args: SearchArgs, config: &Config) -> Result<()> {
    let tokens = if args.languages.is_empty() {
        config.languages.clone()
    } else {
        args.languages
    };
    search_movie(args.imdb_id, args.title, args.year, tokens, config).await
}

/// Resolve the movie and search with exactly the given language tokens
async fn search_movie(
    imdb_id: Option<String>,
    title: Option<String>,
    year: Option<u16>,
    tokens: Vec<String>,
    config: &Config,
) -> Result<()> {
    let imdb_id = match imdb_id {
        Some(id) => Some(id),
        None => {
            let title = title
                .ok_or_else(|| anyhow!("either --imdb-id or --title with --year is required"))?;
            let year = year.ok_or_else(|| anyhow!("--year is required"))?;
            let omdb = OmdbClient::new(&config.omdb_endpoint, config.timeout_secs);
            omdb.search(&title, year).await?
        }
    };
    let Some(imdb_id) = imdb_id else {
        info!("No IMDB match, nothing to search");
        return Ok(());
    };

    let languages = resolve_languages(&tokens);

    let controller = Controller::with_config(config)?;
    let mut service = CliService::default();
    controller.search(&imdb_id, &languages, &mut service).await?;
    info!("{} subtitles found", service.num_found);

    Ok(())
}

async fn run_download(args: DownloadArgs, config: &Config) -> Result<()> {
    let mut config = config.clone();
    if let Some(workdir) = args.workdir {
        config.workdir = workdir;
    }

    // The extractor expects the working directory to already exist;
    // creating it is the host's job, and here the CLI is the host.
    std::fs::create_dir_all(&config.workdir)
        .context(format!("Failed to create workdir: {:?}", config.workdir))?;

    let controller = Controller::with_config(&config)?;
    let mut service = CliService::default();
    controller
        .download(&args.url, &args.filename, &mut service)
        .await?;
    info!("{} subtitles downloaded", service.num_downloaded);

    Ok(())
}

async fn run_plugin(args: PluginArgs, config: &Config) -> Result<()> {
    debug!("Plugin invocation, handle {}", args.handle);
    let invocation = Invocation::parse(&args.parameters);

    match invocation.action()? {
        Action::Download => {
            let url = invocation
                .get("url")
                .ok_or_else(|| anyhow!("missing url parameter"))?
                .to_string();
            let filename = invocation
                .get("filename")
                .ok_or_else(|| anyhow!("missing filename parameter"))?
                .to_string();
            run_download(
                DownloadArgs {
                    url,
                    filename,
                    workdir: None,
                },
                config,
            )
            .await
        }
        Action::Search | Action::ManualSearch => {
            let imdb_id = invocation.get("imdbid").map(str::to_string);
            let (title, year) = match invocation.get("title") {
                Some(title) => {
                    let year = invocation
                        .get("year")
                        .and_then(|y| y.parse::<u16>().ok())
                        .ok_or_else(|| anyhow!("missing or invalid year parameter"))?;
                    (Some(title.to_string()), Some(year))
                }
                None => (None, None),
            };
            if imdb_id.is_none() && title.is_none() {
                return Err(anyhow!("search requires an imdbid or title/year parameters"));
            }
            // Under the host convention an absent languages parameter means
            // an empty accepted set, not the configured one: pass the parsed
            // set through verbatim.
            search_movie(imdb_id, title, year, invocation.languages(), config).await
        }
    }
}

/// Resolve requested language tokens to English names, keeping unknown
/// tokens as-is so site-specific canonical names still match
fn resolve_languages(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| match language_utils::resolve_language_token(token) {
            Some(name) => name,
            None => {
                warn!("Unrecognized language token '{}', using it verbatim", token);
                token.clone()
            }
        })
        .collect()
}
