//! Command-line argument definitions

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use prism_theme::ThemeMode;

#[derive(Debug, Parser)]
#[command(
    name = "prism",
    version,
    about = "Inspect and change the Prism theme, export color variables"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: ./prism.toml if present)
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered themes
    List,

    /// Show the persisted mode, theme and resolved scheme
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the theme mode
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Select a theme by name
    Theme { name: String },

    /// Switch to the explicit mode opposite the resolved scheme
    Toggle,

    /// Print the color variables in effect
    Vars(VarsArgs),

    /// Follow the OS color scheme and print every change
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Stop after this many polls
        #[arg(long)]
        count: Option<u64>,
    },
}

#[derive(Debug, Parser)]
pub struct VarsArgs {
    /// Theme to render instead of the persisted one
    #[arg(long)]
    pub theme: Option<String>,

    /// Mode to render instead of the persisted one
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    #[arg(long, value_enum, default_value = "css")]
    pub format: FormatArg,

    /// CSS selector wrapping the custom properties
    #[arg(long, default_value = ":root")]
    pub selector: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Light,
    Dark,
    System,
}

impl From<ModeArg> for ThemeMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Light => ThemeMode::Light,
            ModeArg::Dark => ThemeMode::Dark,
            ModeArg::System => ThemeMode::System,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Css,
    Json,
}
