//! pulpo-config CLI
//!
//! Layers JSON/YAML files and `--set` overrides into one store and prints
//! values, leaf paths or the whole tree.

use anyhow::{Context, Result};
use clap::Parser;
use pulpo_config::cli::{Cli, Command, render_value};
use pulpo_config::logging::{self, LogTarget};
use tracing::{debug, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let store = cli.build_store().context("failed to load configuration")?;
    debug!(
        json_files = cli.json_files.len(),
        yaml_files = cli.yaml_files.len(),
        overrides = cli.overrides.len(),
        "configuration loaded"
    );

    match &cli.command {
        Command::Get { path } => match store.get(path) {
            Some(value) => println!("{}", render_value(&value)),
            None => {
                warn!(path = %path, "no value at path");
                std::process::exit(1);
            }
        },
        Command::Keys => {
            for key in store.keys() {
                println!("{key}");
            }
        }
        Command::Json { pretty } => {
            let json = if *pretty {
                store.to_json_pretty()?
            } else {
                store.to_json()?
            };
            println!("{json}");
        }
        Command::Show => println!("{store}"),
    }

    Ok(())
}
