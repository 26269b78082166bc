use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use colored::Colorize;
use spiffsync::{SyncContext, commands, output};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "spiffsync",
    version = spiffsync::VERSION,
    about = "Checksum manifest synchronizer for SPIFFS data directories",
    long_about = "Keeps a JSON manifest of content checksums in sync with a directory \
                  of data files, so the image build pipeline can detect added, removed, \
                  or changed files before flashing"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory holding the files and the manifest
    #[arg(short, long, global = true, env = "SPIFFSYNC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Manifest filename within the data directory
    #[arg(short, long, global = true)]
    manifest_name: Option<String>,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchronize the manifest with the data directory contents
    Sync {
        /// Report the diff without rewriting the manifest
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Show pending manifest drift (exits non-zero when drift exists)
    Status,

    /// Create a fresh empty manifest in the data directory
    Init {
        /// Overwrite an existing manifest
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.quiet {
        output::set_verbosity(output::Verbosity::Quiet);
    } else if cli.verbose {
        output::set_verbosity(output::Verbosity::Verbose);
    }

    match cli.command {
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(0)
        }
        command => {
            let ctx = SyncContext::new(cli.data_dir, cli.manifest_name)?;
            match command {
                Commands::Sync { dry_run } => {
                    commands::sync::execute(&ctx, dry_run)?;
                    Ok(0)
                }
                Commands::Status => {
                    let drift = commands::status::execute(&ctx)?;
                    Ok(i32::from(drift))
                }
                Commands::Init { force } => {
                    commands::init::execute(&ctx, force)?;
                    Ok(0)
                }
                Commands::Completion { .. } => unreachable!(),
            }
        }
    }
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
