//! framecull CLI - Detect and remove bad frames from timelapse image sequences
//!
//! This binary classifies frames against declarative specifications and moves
//! or deletes the ones no specification accepts.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use framecull_cli::commands;

/// framecull - Rule-based bad frame detection for timelapse sequences
#[derive(Parser)]
#[command(name = "framecull")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every frame in a directory and move or delete the bad ones
    Triage {
        /// Specification of what to check for in the frames (repeatable)
        #[arg(short, long = "spec", required = true)]
        specs: Vec<String>,

        /// Source directory holding the image sequence
        source: String,

        /// Destination directory for bad frames
        #[arg(long, value_name = "D", default_value = "rejected")]
        destination: String,

        /// Delete bad frames immediately instead of moving them
        #[arg(long)]
        delete: bool,

        /// Print the parsed specifications and why each frame was rejected
        #[arg(short, long)]
        debug: bool,

        /// Check the rules but do not move or delete the frames
        #[arg(long)]
        test: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Classify a single frame and explain the verdict
    Check {
        /// Specification of what to check for (repeatable)
        #[arg(short, long = "spec", required = true)]
        specs: Vec<String>,

        /// Frame to classify
        frame: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate specification files without touching any frames
    Validate {
        /// Specification files to check (repeatable)
        #[arg(short, long = "spec", required = true)]
        specs: Vec<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Triage {
            specs,
            source,
            destination,
            delete,
            debug,
            test,
            json,
        } => commands::triage::run(&specs, &source, &destination, delete, debug, test, json),
        Commands::Check { specs, frame, json } => commands::check::run(&specs, &frame, json),
        Commands::Validate { specs, json } => commands::validate::run(&specs, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
