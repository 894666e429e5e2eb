use clap::Parser;
use std::io;
use std::process;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

use blackout_cli::cli::{build_cli_command, Cli, Commands};

mod commands;

use commands::{completions, generate, init_config, kpi, likelihood};

fn main() {
    let cli = Cli::parse();

    // stdout carries reports only
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {err}");
    }

    let Some(command) = cli.command.as_ref() else {
        if let Err(err) = build_cli_command().print_help() {
            eprintln!("{err}");
        }
        return;
    };

    let result = match command {
        Commands::Generate { .. } => generate::handle(command),
        Commands::Kpi { input, format } => kpi::handle(input, *format),
        Commands::Likelihood { config, format } => likelihood::handle(config.as_deref(), *format),
        Commands::InitConfig { out, force } => init_config::handle(out, *force),
        Commands::Completions { shell, out } => completions::handle(*shell, out.as_deref()),
    };

    if let Err(err) = result {
        error!("{err:#}");
        process::exit(1);
    }
}
