//! CLI entry point for treecat

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use treecat::concat::default_output_for;
use treecat::{
    ConcatRequest, DEFAULT_SECRET_BYTES, Preset, concatenate, generate_secret, print_summary,
    print_summary_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // The summary goes to stderr
            std::io::stderr().is_terminal()
        }
    }
}

/// Built-in extension/exclusion bundles
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    /// .js and .env files; skips node_modules, .git, dist, build, logs, public
    Node,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Node => Preset::Node,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "treecat")]
#[command(about = "Concatenate a source tree into one annotated file, and mint session secrets")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every matching file under ROOT into one output file
    Concat(ConcatArgs),
    /// Print a URL-safe random token suitable for a session secret
    Secret(SecretArgs),
}

#[derive(Args, Debug)]
struct ConcatArgs {
    /// Directory to concatenate
    root: PathBuf,

    /// Output file (default: combined_code_<root name>.txt)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only include files ending with SUFFIX (repeatable or comma-separated)
    #[arg(short = 'e', long = "ext", value_name = "SUFFIX", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Never descend into folders named DIR (repeatable or comma-separated)
    #[arg(short = 'x', long = "exclude", value_name = "DIR", value_delimiter = ',')]
    exclude: Vec<String>,

    /// Start from a built-in extension/exclusion list
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Keep files whose path merely contains an excluded name
    /// (e.g. node_modules_backup.js); only whole folders are pruned.
    /// Folder pruning matches whole path segments, so with this flag
    /// `-x dist` no longer drops files under `distribution/`
    #[arg(long = "no-substring-check")]
    no_substring_check: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

#[derive(Args, Debug)]
struct SecretArgs {
    /// Number of random bytes to draw
    #[arg(
        default_value_t = DEFAULT_SECRET_BYTES as u64,
        value_parser = clap::value_parser!(u64).range(1..=4096)
    )]
    length: u64,
}

/// Prefix a leading dot onto bare extensions (`js` -> `.js`).
fn normalize_suffix(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{}", trimmed)
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn build_request(args: &ConcatArgs) -> ConcatRequest {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_for(&args.root));

    let request = match args.preset {
        Some(preset) => ConcatRequest::from_preset(preset.into(), args.root.clone(), output),
        None => ConcatRequest::new(args.root.clone(), output),
    };

    // Empty items come from stray commas (`-e js,`) and are not list members here.
    request
        .with_extensions(
            args.extensions
                .iter()
                .map(|e| normalize_suffix(e))
                .filter(|e| !e.is_empty()),
        )
        .with_excluded_folders(
            args.exclude
                .iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        )
        .with_substring_check(!args.no_substring_check)
}

fn run_concat(args: &ConcatArgs) -> Result<(), String> {
    let request = build_request(args);
    debug!(?request, "built request");

    let summary = concatenate(&request).map_err(|e| e.to_string())?;

    let printed = if args.json {
        print_summary_json(&summary)
    } else {
        print_summary(&summary, should_use_color(args.color))
    };
    printed.map_err(|e| format!("error writing summary: {}", e))
}

fn run_secret(args: &SecretArgs) -> Result<(), String> {
    let token = generate_secret(args.length as usize).map_err(|e| e.to_string())?;
    println!("{}", token);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Concat(args) => run_concat(args),
        Command::Secret(args) => run_secret(args),
    };

    if let Err(e) = result {
        eprintln!("treecat: {}", e);
        process::exit(1);
    }
}
