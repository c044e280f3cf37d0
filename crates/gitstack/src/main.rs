//! gitstack CLI - an ordered stack of bookmarked git branches

mod cli;
mod colors;
mod commands;
mod output;

use std::process::ExitCode;

use anyhow::Context as _;
use gitstack_core::{Config, GitCli};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::Context;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--verbose` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gitstack=debug,gitstack_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Resolve config, store path, and git adapter for this invocation
fn build_context(cli: &Cli) -> anyhow::Result<Context> {
    let config = Config::discover().context("failed to load configuration")?;
    let store_path = config
        .store_path(cli.store.as_deref())
        .context("failed to resolve the stack file")?;
    let git = GitCli::new(config.gitstack.git_path.clone(), cli.repo.clone());

    Ok(Context {
        store_path,
        git,
        json: cli.json,
        quiet: cli.quiet,
    })
}

/// Dispatch one command, returning the process exit code
fn run(cli: Cli) -> Result<i32, String> {
    // Unknown command words never open the stack file
    if let Some(Commands::Unrecognized(args)) = &cli.command {
        return commands::run_unrecognized(args, cli.json);
    }

    let ctx = build_context(&cli).map_err(|e| format!("{:#}", e))?;

    match cli.command {
        None | Some(Commands::Show) => commands::run_show(&ctx),
        Some(Commands::Add { name }) => commands::run_add(name, &ctx),
        Some(Commands::Drop { index }) => commands::run_drop(index, &ctx),
        Some(Commands::Select { index }) => commands::run_select(index, &ctx),
        Some(Commands::Unrecognized(args)) => commands::run_unrecognized(&args, cli.json),
    }
}

fn main() -> ExitCode {
    let cli = cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!("gitstack starting with args: {:?}", cli);

    match run(cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
