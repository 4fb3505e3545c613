// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand, ValueEnum};

pub use args::SettingsArgs;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "punchsync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Forward attendance punches from a ZKTeco terminal to an ingestion endpoint")]
#[command(long_about = "Forward attendance punches from a ZKTeco terminal to an ingestion endpoint.\n\n\
    Each run connects to the terminal, reads the attendance log, keeps the punches from the \
    lookback window and posts them as one batch. Without a subcommand a single sync runs.")]
#[command(after_help = "\
Examples:
  punchsync                                  Sync once and exit
  punchsync daemon --interval 5              Sync now, then every 5 minutes
  punchsync users -o json                    List enrolled users as JSON
  punchsync config --device-ip 10.0.0.20     Show the resolved configuration")]
pub struct Cli {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Run continuously (same as the `daemon` command)
    #[arg(long, conflicts_with = "list_users")]
    pub daemon: bool,

    /// List enrolled users (same as the `users` command)
    #[arg(long)]
    pub list_users: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The command to run, folding the legacy flags into subcommands.
    pub fn resolved_command(&self) -> Command {
        match &self.command {
            Some(command) => command.clone(),
            None if self.daemon => Command::Daemon,
            None if self.list_users => Command::Users { output: OutputFormat::Text },
            None => Command::Sync,
        }
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Sync once and exit (default)
    Sync,

    /// Sync immediately, then on the configured interval until interrupted
    Daemon,

    /// List users enrolled on the terminal
    Users {
        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Show the resolved configuration with secrets redacted
    Config,
}

impl Command {
    /// Whether the command talks to the ingestion endpoint.
    pub fn needs_api(&self) -> bool {
        matches!(self, Command::Sync | Command::Daemon)
    }
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
