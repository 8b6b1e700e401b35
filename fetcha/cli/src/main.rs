//! fetcha - System Information Display
//!
//! Prints a block of ASCII art with a panel of system facts beside it.
//!
//! # Usage
//!
//! ```bash
//! # Defaults (built-in art, all modules)
//! fetcha
//!
//! # Custom art, no colors
//! fetcha --ascii ~/.config/fetcha/logo.txt --no-color
//!
//! # With config file
//! fetcha --config ~/dotfiles/fetcha.toml
//!
//! # Show the effective configuration
//! fetcha --print-config
//!
//! # Diagnostics on stderr
//! RUST_LOG=debug fetcha
//! ```

mod cli;
mod providers;

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use fetcha_core::{load_config, render, terminal_width, Art, SystemIdentity};
use tracing::debug;

use cli::Args;

/// Default log filter when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "warn";

/// Initialize logging on stderr so stdout carries only the display
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let config = load_config(args.config.clone(), &args.overrides())
        .context("Failed to load configuration")?;
    debug!(source = %config.source(), "Configuration loaded");

    if args.print_config {
        let text = config
            .to_toml_string()
            .context("Failed to serialize configuration")?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    let sources = providers::select(config.modules.as_deref())
        .context("Invalid module list in configuration")?;

    let art = match config.ascii_path {
        Some(ref path) => Art::load(path),
        None => Art::builtin(),
    };

    let width = args.width.or_else(terminal_width);

    let out = BufWriter::new(io::stdout().lock());
    render(&config, &art, &sources, &SystemIdentity, width, out).context("Failed to render")?;

    Ok(())
}
