// Copyright (c) 2026 Tally Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! This module defines the strict schema for user input.
//!
//! It serves as the single source of truth for the application's command-line interface.
//! While the *execution* logic for each command resides in its own submodule (e.g., `audit.rs`),
//! the *definition* of the arguments, flags, and help text is centralized here.
//!
//! ## Architectural Role
//!
//! This module performs two key architectural functions:
//!
//! 1.  **Input Normalization**: It uses `clap` to validate user inputs, making sure that necessary
//!     arguments are present and types are correct (e.g., strictly typed paths vs strings)
//!     before the application attempts to run.
//! 2.  **State Translation**: via the `From<&CommandLine> for Config` implementation, it
//!     decouples the external interface (CLI flags) from the internal application state (`Config`).
//!     This allows the core libraries to remain agnostic of the user interface layer.
//!
//! ## Structure
//!
//! The CLI is structured hierarchically:
//!
//! * [`CommandLine`]: The top-level struct containing global flags applicable to the entire process
//!   (logging, formatting, verbosity, config file location).
//! * [`Commands`]: An enum representing the specific operation mode. Since these are mutually
//!   exclusive, the type system ensures the application cannot be in two states (e.g., "Audit"
//!   and "Sources") simultaneously.

pub mod audit;
pub mod sources;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tally_common::config::Config;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "IP consistency auditor for homelab infrastructure.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the audit configuration file (default: ./tally.toml)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Keep logs and colors but hide the ASCII art
    #[arg(long = "no-banner", global = true)]
    pub no_banner: bool,

    /// Reduce UI visual density (-q: summary only, -qq: report only)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Increase logging detail (-v: debug logs, -vv: remote command traces)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cross-reference proxy, DHCP, DNS and live inventory
    #[command(alias = "a")]
    Audit {
        /// Write the Markdown report to this path instead of the configured one
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the report as JSON to stdout instead of writing Markdown
        #[arg(long = "json")]
        json: bool,
    },

    /// Display the configured data sources without contacting them
    #[command(alias = "s")]
    Sources,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
        }
    }
}
