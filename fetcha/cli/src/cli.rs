//! Command line

use std::path::PathBuf;

use clap::Parser;
use fetcha_core::ConfigOverrides;

/// fetcha - system information next to a block of ASCII art
#[derive(Parser, Debug)]
#[command(name = "fetcha")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (default: $XDG_CONFIG_HOME/fetcha/config.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Art file to show instead of the configured one
    #[arg(short = 'a', long = "ascii", value_name = "PATH")]
    pub ascii: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// Hide the user@host header and its boundary
    #[arg(long)]
    pub no_header: bool,

    /// Hide the color palette rows
    #[arg(long)]
    pub no_palette: bool,

    /// Never truncate rows at the terminal width
    #[arg(long)]
    pub no_wrap: bool,

    /// Terminal width to wrap at, instead of querying the terminal
    #[arg(short = 'w', long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Columns between the art and the fact panel
    #[arg(short = 'p', long, value_name = "N")]
    pub pad: Option<usize>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Flags that override configured values
    ///
    /// Switches only ever turn things off, so an absent flag leaves the
    /// configured value alone.
    pub fn overrides(&self) -> ConfigOverrides {
        let off = |flag: bool| flag.then_some(false);
        ConfigOverrides {
            ascii_path: self.ascii.clone(),
            ascii_pad: self.pad,
            header_show: off(self.no_header),
            color_palette_show: off(self.no_palette),
            line_break: off(self.no_wrap),
            color_enabled: off(self.no_color),
        }
    }
}
