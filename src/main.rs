use std::process::ExitCode;

use clap::Parser;
use log::debug;

use scholar_gpa::{config::Config, logger};

mod cli;
mod commands;

use cli::Cli;
use commands::Output;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    if let Err(err) = logger::init(config.log_level, config.log_file.as_deref()) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    debug!("scholar-gpa {} using {}", env!("CARGO_PKG_VERSION"), config.db_path.display());

    let out = Output {
        json: cli.json,
        locale: cli.lang,
    };
    let mut stdout = std::io::stdout();
    match commands::run(cli.command, out, &config.db_path, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("command failed: {err:?}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
