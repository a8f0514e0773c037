//! CLI subcommands — combination inspection, bindings config, live watch.

mod bind;
mod check;
mod config_cmd;
mod watch;

use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use keypool_lib::combo::KeyCombination;
pub(super) use keypool_lib::config::BindingsConfig;
pub(super) use keypool_lib::error::{KeypoolError, Result};

const PADDING: usize = 2;

#[derive(Subcommand)]
pub(super) enum Command {
    /// Parse a key combination and print its canonical form
    Check {
        /// Combination string, e.g. "ctrl+shift+m"
        combo: String,
    },
    /// Show the bindings configuration and its validation state
    Config {
        /// Read bindings from a custom config file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Add or replace a named binding and save the config
    Bind {
        /// Binding name, e.g. "toggle"
        name: String,
        /// Combination string, e.g. "ctrl+shift+m"
        combo: String,
        /// Write to a custom config file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Remove a named binding and save the config
    Unbind {
        /// Binding name
        name: String,
        /// Write to a custom config file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Register configured bindings with the OS and dispatch fired hotkeys
    Watch {
        /// Read bindings from a custom config file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

pub(super) fn run(command: Command, json: bool) -> Result<()> {
    match command {
        Command::Check { combo } => check::cmd_check(&combo, json),
        Command::Config { file } => config_cmd::cmd_config(json, file.as_deref()),
        Command::Bind { name, combo, file } => bind::cmd_bind(&name, &combo, file.as_deref()),
        Command::Unbind { name, file } => bind::cmd_unbind(&name, file.as_deref()),
        Command::Watch { file } => watch::cmd_watch(file.as_deref()),
    }
}

/// Load config from a custom path or the platform default.
pub(super) fn load_config(custom_path: Option<&std::path::Path>) -> BindingsConfig {
    match custom_path {
        Some(path) => {
            let (config, warnings) = BindingsConfig::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => BindingsConfig::load(),
    }
}

/// Compute alignment width for a command's key-value output.
pub(super) fn kv_width(keys: &[&str]) -> usize {
    keys.iter().map(|k| k.len()).max().unwrap_or(0) + PADDING
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{key:<width$}{value}", width = w);
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct CheckOutput {
    pub input: String,
    pub canonical: String,
    pub code: u64,
    pub modifiers: Vec<String>,
    pub triggers: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub bindings: std::collections::BTreeMap<String, String>,
    pub problems: Vec<String>,
}
