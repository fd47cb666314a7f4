//! churn-encoder CLI: query, records, customers, config, or validate.
//!
//! Settings from `packages/conf/churn-encoder.yaml`, overridden by the user
//! settings file. Override the config home with `--conf <dir>`.
//!
//! Logging: set `RUST_LOG=churn_encoder=debug` to see classifier decisions on stderr.

mod cli;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use churn_encoder::{
    AttributeSet, EncoderConfig, RuntimeSettings, encode_query, encoder_config_with,
    load_customers, load_patterns, load_runtime_settings, set_config_home_override,
};

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "churn_encoder=debug"
        } else {
            "churn_encoder=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let settings = load_runtime_settings();
    let config = encoder_config_with(&settings.encoder);

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Query { text } => {
            let result = encode_query(&text);
            serde_json::to_writer_pretty(&mut stdout, &result)?;
            writeln!(stdout)?;
        }
        Command::Records { input } => {
            let path = resolve_input(input, &settings)?;
            for record in load_patterns(&path)? {
                serde_json::to_writer(&mut stdout, &record)?;
                writeln!(stdout)?;
            }
        }
        Command::Customers { input } => {
            let Some(path) = input.or_else(|| settings.customers_path()) else {
                bail!("no --input given and data.customers_path is not set");
            };
            for customer in load_customers(&path)? {
                serde_json::to_writer(&mut stdout, &customer.to_attributes())?;
                writeln!(stdout)?;
            }
        }
        Command::Config { json_schema } => {
            let value = if json_schema {
                EncoderConfig::to_json_schema()?
            } else {
                serde_json::to_value(&config)?
            };
            serde_json::to_writer_pretty(&mut stdout, &value)?;
            writeln!(stdout)?;
        }
        Command::Validate { input } => {
            config.validate().context("encoder schema is invalid")?;
            config
                .check_attributes(&AttributeSet::default())
                .context("encoder roles do not match the attribute keys")?;
            let path = resolve_input(input, &settings)?;
            let records = load_patterns(&path)?;
            tracing::info!(
                roles = config.role_names().len(),
                patterns = records.len(),
                "schema and patterns valid"
            );
            writeln!(stdout, "ok: {} patterns", records.len())?;
        }
    }
    Ok(())
}

fn resolve_input(input: Option<PathBuf>, settings: &RuntimeSettings) -> anyhow::Result<PathBuf> {
    match input.or_else(|| settings.patterns_path()) {
        Some(path) => Ok(path),
        None => bail!("no --input given and data.patterns_path is not set"),
    }
}
