//! CLI command definitions for pulpo-config
//!
//! This module defines the CLI structure using clap's derive macros and the
//! layering the binary applies before running a command.

use crate::config::{ConfigStore, Value};
use crate::error::ConfigResult;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect layered configuration built from JSON/YAML files and overrides
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON config file to layer (repeatable, applied in order)
    #[arg(long = "json", value_name = "FILE", global = true)]
    pub json_files: Vec<PathBuf>,

    /// YAML config file to layer after the JSON files (repeatable)
    #[arg(long = "yaml", value_name = "FILE", global = true)]
    pub yaml_files: Vec<PathBuf>,

    /// Override a value by dotted path, e.g. `server.port=9000` (repeatable)
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_override, global = true)]
    pub overrides: Vec<(String, String)>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the value at a dotted path (exit status 1 if absent)
    Get {
        /// Dotted path, e.g. `server.port`
        path: String,
    },

    /// List every leaf path
    Keys,

    /// Print the merged configuration as JSON
    Json {
        /// Indent the output over multiple lines
        #[arg(long)]
        pretty: bool,
    },

    /// Print the merged configuration as a literal mapping
    Show,
}

/// Parse a `KEY=VALUE` override.
fn parse_override(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("missing key in '{raw}'")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

/// Interpret an override value as a YAML scalar.
///
/// `8080` becomes an integer and `true` a bool. Anything that does not parse
/// to a plain scalar, including `null` and the empty string, stays a string.
pub fn parse_scalar(raw: &str) -> Value {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(value @ (Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

impl Cli {
    /// Overrides as dotted-path/value pairs ready for `process_args`.
    pub fn override_args(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        self.overrides
            .iter()
            .map(|(key, value)| (key.as_str(), parse_scalar(value)))
    }

    /// Build the store: JSON files, then YAML files, then `--set` overrides.
    pub fn build_store(&self) -> ConfigResult<ConfigStore> {
        let mut store = ConfigStore::new();
        for path in &self.json_files {
            store.merge_json_file(path)?;
        }
        for path in &self.yaml_files {
            store.merge_yaml_file(path)?;
        }
        store.process_args(self.override_args());
        Ok(store)
    }
}

/// Text printed by `get`: strings raw, everything else as a literal.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
