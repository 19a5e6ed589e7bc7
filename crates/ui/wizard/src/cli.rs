// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wizard", version, about = "Fill in, check and validate schema-driven forms")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Run the interactive form in the terminal
    Run {
        /// Schema file (.json or .ron)
        schema: PathBuf,
        /// Initial values (JSON object keyed by field id)
        #[arg(long)]
        values: Option<PathBuf>,
        /// Write submitted values here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Disable mouse capture
        #[arg(long)]
        no_mouse: bool,
    },
    /// Load a schema, run the structural checks and list its fields
    Check { schema: PathBuf },
    /// Validate a values file against a schema without opening the UI
    Validate {
        schema: PathBuf,
        #[arg(long)]
        values: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_options() {
        let cli = Cli::try_parse_from([
            "wizard", "run", "visit.json", "--values", "v.json", "-o", "out.json", "--no-mouse",
        ])
        .unwrap();
        match cli.cmd {
            Cmd::Run {
                schema,
                values,
                output,
                no_mouse,
            } => {
                assert_eq!(schema, PathBuf::from("visit.json"));
                assert_eq!(values, Some(PathBuf::from("v.json")));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(no_mouse);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn validate_requires_values() {
        assert!(Cli::try_parse_from(["wizard", "validate", "visit.json"]).is_err());
        assert!(Cli::try_parse_from(["wizard", "validate", "visit.json", "--values", "v.json"]).is_ok());
    }
}
