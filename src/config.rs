use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// Default width of the line-number gutter
pub const DEFAULT_LEFT_MARGIN: usize = 5;

/// Narrowest gutter: one digit plus the separating blank
const MIN_LEFT_MARGIN: usize = 2;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(bin_name = "slate")]
#[command(about = "A small piece-table text editor for the terminal")]
#[command(version)]
pub struct Cli {
    /// File to edit. Created on first save if it does not exist.
    #[arg(name = "file path")]
    pub path: PathBuf,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long, short = 'l')]
    pub log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: Level,

    /// Width of the line-number gutter
    #[arg(long, default_value_t = DEFAULT_LEFT_MARGIN)]
    pub margin: usize,
}

/// Resolved editor settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub path: PathBuf,
    pub left_margin: usize,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            left_margin: DEFAULT_LEFT_MARGIN,
            log_file: None,
            log_level: Level::INFO,
        }
    }
}

impl From<Cli> for EditorConfig {
    fn from(cli: Cli) -> Self {
        Self {
            path: cli.path,
            left_margin: cli.margin.max(MIN_LEFT_MARGIN),
            log_file: cli.log_file,
            log_level: cli.log_level,
        }
    }
}
