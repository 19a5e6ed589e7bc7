pub mod action;
pub mod app;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod errors;
pub mod logging;
pub mod theme;
pub mod tui;

use std::process::ExitCode;

use color_eyre::Result;
use forms::FormController;
use tracing::info;

use crate::app::App;
use crate::cli::{Cli, Cmd};
use crate::config::Config;

pub async fn run(args: Cli) -> Result<ExitCode> {
    crate::errors::init()?;
    let config = Config::new()?;
    // keep the guard alive until exit so buffered log lines are flushed
    let _log_guard = crate::logging::init(&config.config.data_dir)?;
    info!(version = env!("CARGO_PKG_VERSION"), "wizard starting");

    match args.cmd {
        Cmd::Run {
            schema,
            values,
            output,
            no_mouse,
        } => {
            let mut controller = FormController::new(commands::load_schema(&schema)?)?;
            if let Some(values) = values {
                controller = controller.with_initial_values(&commands::load_values(&values)?);
            }
            let mouse = config.mouse && !no_mouse;
            let mut app = App::new(config, controller, output, mouse);
            app.run().await?;
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Check { schema } => {
            commands::check(&schema, &mut std::io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Validate { schema, values } => {
            let valid = commands::validate(&schema, &values, &mut std::io::stdout().lock())?;
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
