mod app;
mod cli;
mod constants;
mod date_math;
mod domain;
mod error;
mod logging;
mod month_view;
mod storage;
mod tracker;

use clap::Parser;
use log::error;

use crate::{cli::Cli, error::HabitError};

fn main() {
    let cli = Cli::parse();
    let interactive = cli.command.is_none();

    let _logger = match logging::init(&storage::get_state_dir(), !interactive) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let data_dir = cli.data_dir.as_deref();
    let result = match cli.command {
        None => app::run_ui(data_dir).map_err(HabitError::from),
        Some(command) => cli::run(command, data_dir),
    };

    if let Err(e) = result {
        if interactive {
            error!("{}", e);
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
