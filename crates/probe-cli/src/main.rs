mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{ManifestArgs, ProbeArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wait-for-program",
    about = "Wait until a deployed program emits a known log line",
    version,
    propagate_version = true,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Probe config file (YAML); flags override its values
    #[arg(long, global = true, env = "PROBE_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Arguments for the default `wait` command
    #[command(flatten)]
    probe: ProbeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the node until the program emits the marker (default)
    Wait(ProbeArgs),

    /// Print the program id the manifest maps a name to
    Resolve(ManifestArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let result = match cli.command.unwrap_or(Commands::Wait(cli.probe)) {
        Commands::Wait(args) => cmd::load_config(config_path, |cfg| args.apply(cfg))
            .and_then(|cfg| cmd::wait::run(&cfg, cli.json)),
        Commands::Resolve(args) => cmd::load_config(config_path, |cfg| args.apply(cfg))
            .and_then(|cfg| cmd::resolve::run(&cfg, cli.json)),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
