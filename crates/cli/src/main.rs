// boxkv CLI - read and edit box settings files

mod exit_codes;
mod value_kind;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use boxkv_config::CliConfig;
use boxkv_core::{file, ReadReport, Settings, StoreError};
use clap::{Parser, Subcommand};

use exit_codes::{EXIT_CHECK_FAILED, EXIT_ERROR, EXIT_IO, EXIT_MISSING_KEY, EXIT_SUCCESS, EXIT_USAGE};
use value_kind::ValueKind;

#[derive(Parser)]
#[command(name = "boxkv")]
#[command(about = "Read and edit box settings files (#box / name value)")]
#[command(version)]
#[command(long_version = long_version())]
struct Cli {
    /// Settings file to operate on
    #[arg(long, short = 'f', global = true, env = "BOXKV_FILE")]
    file: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one value
    #[command(after_help = "\
Examples:
  boxkv -f app.box get network host
  boxkv -f app.box get network port --as i32")]
    Get {
        /// Box name
        section: String,
        /// Pair name
        pair: String,
        /// Typed view to print the value through
        #[arg(long = "as", value_enum, default_value_t = ValueKind::Str)]
        kind: ValueKind,
    },

    /// Set one value, creating the box and pair if needed
    #[command(after_help = "\
Examples:
  boxkv -f app.box set network port 8080 --as u32
  boxkv -f app.box set flags enabled yes --as bool")]
    Set {
        /// Box name
        section: String,
        /// Pair name
        pair: String,
        /// New value
        value: String,
        /// Parse the value as this type before storing it
        #[arg(long = "as", value_enum, default_value_t = ValueKind::Str)]
        kind: ValueKind,
    },

    /// Remove a pair, or a whole box when no pair is given
    Unset {
        /// Box name
        section: String,
        /// Pair name
        pair: Option<String>,
    },

    /// List boxes, or the pairs of one box
    List {
        /// Box to list pairs of
        section: Option<String>,
    },

    /// Rewrite the file in canonical form
    Fmt {
        /// Exit non-zero if the file is not already canonical; do not write
        #[arg(long)]
        check: bool,
        /// Print the canonical form instead of rewriting the file
        #[arg(long, conflicts_with = "check")]
        stdout: bool,
    },

    /// Print the settings as a JSON object
    Export {
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },

    /// Merge a JSON object of boxes into the file
    #[command(after_help = "\
Examples:
  boxkv -f app.box import overrides.json
  boxkv -f app.box export | boxkv -f copy.box import -")]
    Import {
        /// JSON file shaped like `export` output, or - for stdin
        input: PathBuf,
    },

    /// Report lines that were ignored or not valid UTF-8
    Lint,

    /// Inspect the CLI configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default config file if none exists
    Init,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\ncore:    boxkv-core ", env!("CARGO_PKG_VERSION"),
        "\nbuild:   ", env!("BOXKV_PROFILE"),
        "\ntarget:  ", env!("BOXKV_TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = CliConfig::try_load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(cli.verbose, &config);
    if let Err(e) = &loaded {
        log::warn!("{}: {}; using defaults", CliConfig::path().display(), e);
    }

    let result = match cli.command {
        Commands::Get { section, pair, kind } => {
            resolve_file(cli.file, &config).and_then(|path| cmd_get(&path, &section, &pair, kind))
        }
        Commands::Set { section, pair, value, kind } => resolve_file(cli.file, &config)
            .and_then(|path| cmd_set(&path, &config, &section, &pair, &value, kind)),
        Commands::Unset { section, pair } => {
            resolve_file(cli.file, &config).and_then(|path| cmd_unset(&path, &section, pair.as_deref()))
        }
        Commands::List { section } => {
            resolve_file(cli.file, &config).and_then(|path| cmd_list(&path, section.as_deref()))
        }
        Commands::Fmt { check, stdout } => {
            resolve_file(cli.file, &config).and_then(|path| cmd_fmt(&path, check, stdout))
        }
        Commands::Export { compact } => {
            resolve_file(cli.file, &config).and_then(|path| cmd_export(&path, compact))
        }
        Commands::Import { input } => resolve_file(cli.file, &config)
            .and_then(|path| cmd_import(&path, &config, &input)),
        Commands::Lint => resolve_file(cli.file, &config).and_then(|path| cmd_lint(&path)),
        Commands::Config(command) => cmd_config(command, &config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: bool, config: &CliConfig) {
    let default_filter = if verbose { "debug" } else { config.log_level.as_str() };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// `--file` / `BOXKV_FILE` win over the config's `default_file`.
fn resolve_file(file: Option<PathBuf>, config: &CliConfig) -> Result<PathBuf, CliError> {
    file.or_else(|| config.default_file.clone()).ok_or_else(|| {
        CliError::args("no settings file given").with_hint(format!(
            "pass --file, set BOXKV_FILE, or set default_file in {}",
            CliConfig::path().display()
        ))
    })
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn missing(msg: impl Into<String>) -> Self {
        Self { code: EXIT_MISSING_KEY, message: msg.into(), hint: None }
    }

    pub fn check_failed(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CHECK_FAILED, message: msg.into(), hint: None }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from a store error with the matching exit code.
    pub fn store(err: StoreError) -> Self {
        match &err {
            StoreError::NotFound(_) => Self::io(err.to_string())
                .with_hint("check the path, or run `set` to create the file"),
            StoreError::Io { .. } => Self::io(err.to_string()),
            StoreError::UnknownBox(_) | StoreError::UnknownPair { .. } => {
                Self::missing(err.to_string()).with_hint("run `boxkv list` to see what exists")
            }
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn load(path: &Path) -> Result<Settings, CliError> {
    file::load(path).map(|(settings, _)| settings).map_err(CliError::store)
}

/// Load a file that is about to be written back. Lines that were not valid
/// UTF-8 would be saved with replacement characters, so such files are refused.
fn load_for_rewrite(path: &Path) -> Result<Settings, CliError> {
    let (settings, report) = file::load(path).map_err(CliError::store)?;
    refuse_lossy(path, &report)?;
    Ok(settings)
}

/// Like [`load_for_rewrite`], but a missing file starts an empty tree when
/// the config allows creating it.
fn load_or_create(path: &Path, config: &CliConfig) -> Result<Settings, CliError> {
    match file::load(path) {
        Ok((settings, report)) => {
            refuse_lossy(path, &report)?;
            Ok(settings)
        }
        Err(StoreError::NotFound(_)) if config.create_missing => {
            log::info!("creating {}", path.display());
            Ok(Settings::new())
        }
        Err(e) => Err(CliError::store(e)),
    }
}

fn refuse_lossy(path: &Path, report: &ReadReport) -> Result<(), CliError> {
    if !report.is_lossy() {
        return Ok(());
    }
    let lines: Vec<String> = report.lossy_lines.iter().map(|n| n.to_string()).collect();
    Err(CliError::check_failed(format!(
        "{}: line(s) {} are not valid UTF-8; rewriting would corrupt them",
        path.display(),
        lines.join(", ")
    ))
    .with_hint("convert the file to UTF-8 first (e.g. iconv -f latin1 -t utf-8)"))
}

fn save(settings: &Settings, path: &Path) -> Result<(), CliError> {
    file::save(settings, path).map_err(CliError::store)
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(text.as_bytes()).map_err(|e| CliError::io(e.to_string()))
}

// ============================================================================
// get / set / unset
// ============================================================================

fn cmd_get(path: &Path, section: &str, pair: &str, kind: ValueKind) -> Result<(), CliError> {
    let settings = load(path)?;
    let found = settings.require(section, pair).map_err(CliError::store)?;
    write_stdout(&format!("{}\n", kind.view(found)))
}

fn cmd_set(
    path: &Path,
    config: &CliConfig,
    section: &str,
    pair: &str,
    value: &str,
    kind: ValueKind,
) -> Result<(), CliError> {
    let mut settings = load_or_create(path, config)?;

    kind.assign(settings.section(section).entry(pair), value)
        .map_err(CliError::args)?;
    save(&settings, path)
}

fn cmd_unset(path: &Path, section: &str, pair: Option<&str>) -> Result<(), CliError> {
    let mut settings = load_for_rewrite(path)?;

    match pair {
        Some(pair) => {
            settings.require(section, pair).map_err(CliError::store)?;
            if let Some(found) = settings.get_mut(section) {
                found.remove(pair);
            }
        }
        None => {
            settings
                .remove(section)
                .ok_or_else(|| CliError::store(StoreError::UnknownBox(section.to_string())))?;
        }
    }

    save(&settings, path)
}

// ============================================================================
// list / export / import
// ============================================================================

fn cmd_list(path: &Path, section: Option<&str>) -> Result<(), CliError> {
    let settings = load(path)?;
    let mut out = String::new();

    match section {
        None => {
            for s in settings.sections() {
                out.push_str(s.name());
                out.push('\n');
            }
        }
        Some(name) => {
            let found = settings
                .get(name)
                .ok_or_else(|| CliError::store(StoreError::UnknownBox(name.to_string())))?;
            for p in found.pairs() {
                out.push_str(&format!("{} {}\n", p.name(), p.as_str()));
            }
        }
    }

    write_stdout(&out)
}

fn cmd_export(path: &Path, compact: bool) -> Result<(), CliError> {
    let settings = load(path)?;
    let text = if compact {
        serde_json::to_string(&settings)
    } else {
        serde_json::to_string_pretty(&settings)
    }
    .map_err(|e| CliError::other(e.to_string()))?;
    write_stdout(&format!("{}\n", text))
}

fn cmd_import(path: &Path, config: &CliConfig, input: &Path) -> Result<(), CliError> {
    let text = if input == Path::new("-") {
        io::read_to_string(io::stdin()).map_err(|e| CliError::io(e.to_string()))?
    } else {
        std::fs::read_to_string(input)
            .map_err(|e| CliError::io(format!("{}: {}", input.display(), e)))?
    };
    let incoming: Settings = serde_json::from_str(&text)
        .map_err(|e| CliError::args(format!("{}: {}", input.display(), e)))?;

    let mut settings = load_or_create(path, config)?;
    settings.merge(&incoming);
    save(&settings, path)
}

// ============================================================================
// fmt / lint
// ============================================================================

fn cmd_fmt(path: &Path, check: bool, stdout: bool) -> Result<(), CliError> {
    let original = std::fs::read(path).map_err(|e| CliError::store(StoreError::from_io(path, e)))?;
    let mut settings = Settings::new();
    let report = settings
        .read(original.as_slice())
        .map_err(|e| CliError::io(e.to_string()))?;
    refuse_lossy(path, &report)?;
    let canonical = settings.to_string();

    if stdout {
        return write_stdout(&canonical);
    }

    if canonical.as_bytes() == original.as_slice() {
        log::debug!("{} already canonical", path.display());
        return Ok(());
    }

    if check {
        return Err(CliError::check_failed(format!("{} is not in canonical form", path.display()))
            .with_hint("run `boxkv fmt` to rewrite it"));
    }

    save(&settings, path)
}

fn cmd_lint(path: &Path) -> Result<(), CliError> {
    let (_, report) = file::load(path).map_err(CliError::store)?;

    let mut problems: Vec<(usize, &str)> = report
        .anomalies()
        .map(|s| (s.line, s.reason.describe()))
        .chain(report.lossy_lines.iter().map(|&line| (line, "invalid UTF-8 replaced")))
        .collect();
    problems.sort_by_key(|&(line, _)| line);

    let mut out = String::new();
    for (line, problem) in &problems {
        out.push_str(&format!("{}:{}: {}\n", path.display(), line, problem));
    }
    write_stdout(&out)?;

    if !problems.is_empty() {
        return Err(CliError::check_failed(format!("{} problem line(s)", problems.len())));
    }
    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn cmd_config(command: ConfigCommands, config: &CliConfig) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => write_stdout(&format!("{}\n", CliConfig::path().display())),
        ConfigCommands::Show => {
            let text = config.to_toml().map_err(|e| CliError::other(e.to_string()))?;
            write_stdout(&text)
        }
        ConfigCommands::Init => {
            let path = CliConfig::path();
            if path.exists() {
                return Err(CliError::args(format!("{} already exists", path.display())));
            }
            CliConfig::default().save().map_err(|e| CliError::io(e.to_string()))?;
            write_stdout(&format!("{}\n", path.display()))
        }
    }
}
