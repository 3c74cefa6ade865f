use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quick-folder")]
#[command(about = "A keyboard-driven popup for jumping to frequently used folders")]
pub struct Cli {
    /// Folder list, one path per line; a trailing `*` segment expands to subdirectories
    #[arg(short, long, global = true, default_value = "config.txt")]
    pub config: PathBuf,

    /// JSON file overriding popup style and colors
    #[arg(long, global = true)]
    pub style: Option<PathBuf>,

    /// Path separator used in the folder list (defaults to the platform one)
    #[arg(long, global = true)]
    pub separator: Option<char>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show the interactive popup (default)
    Run {
        /// Print the chosen folder instead of opening it
        #[arg(long)]
        print: bool,
    },
    /// Render the popup once after applying commands, without a terminal
    Screenshot {
        /// Comma-separated commands to apply first (e.g. "down,enter")
        #[arg(short, long, default_value = "")]
        keys: String,
        /// Output file for the screenshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Terminal width for rendering
        #[arg(long, default_value = "80")]
        width: u16,
        /// Terminal height for rendering
        #[arg(long, default_value = "24")]
        height: u16,
    },
    /// Print the flattened folder tree as JSON
    Tree,
}

impl Cli {
    pub fn separator(&self) -> char {
        self.separator.unwrap_or(std::path::MAIN_SEPARATOR)
    }
}
