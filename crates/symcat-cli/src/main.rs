//! symcat - extract function and class catalogs from namespace descriptors.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use symcat_output::{FormatFlags, OutputFormat};

mod commands;
mod config;

use commands::Context;
use config::SymcatConfig;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SYMCAT_LOG";

#[derive(Parser)]
#[command(name = "symcat", version, about = "Extract function and class catalogs from namespaces")]
struct Cli {
    /// Project root for .symcat/config.toml (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Output as JSON Lines
    #[arg(long, global = true)]
    jsonl: bool,

    /// Filter JSON output through a jq expression
    #[arg(long, global = true, value_name = "FILTER")]
    jq: Option<String>,

    /// Human-friendly text output
    #[arg(long, global = true, conflicts_with = "compact")]
    pretty: bool,

    /// Compact text output
    #[arg(long, global = true)]
    compact: bool,

    /// Log more (repeat for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a catalog from a namespace descriptor
    Extract(commands::extract::ExtractArgs),

    /// List registered categories
    Categories,

    /// List a namespace's bindings and how they are classified
    Scan(commands::scan::ScanArgs),
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: restores the default disposition of SIGPIPE; no memory is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

/// Log to stderr. `SYMCAT_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    reset_sigpipe();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match cli.root.clone() {
        Some(root) => root,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let config = SymcatConfig::load(&root);
    for category in &config.categories {
        symcat::register_category(category.clone());
    }

    let flags = FormatFlags {
        json: cli.json,
        jsonl: cli.jsonl,
        jq: cli.jq.as_deref(),
        pretty: cli.pretty,
        compact: cli.compact,
    };
    let format = OutputFormat::from_cli(&flags, &config.output);
    let ctx = Context { config, format };

    let code = match cli.command {
        Commands::Extract(args) => commands::extract::run(args, &ctx),
        Commands::Categories => commands::categories::run(&ctx),
        Commands::Scan(args) => commands::scan::run(args, &ctx),
    };
    std::process::exit(code);
}
