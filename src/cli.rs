use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(about = "A terminal news portal", long_about = None)]
pub struct Cli {
    /// News category to open (e.g. top-news, world, technology)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Language code for the feed (e.g. en, de)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Base URL of the news feed service
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Theme name
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Force dark mode (overrides auto-detection)
    #[arg(long, conflicts_with = "light")]
    pub dark: bool,

    /// Force light mode (overrides auto-detection)
    #[arg(long, conflicts_with = "dark")]
    pub light: bool,

    /// Custom config directory (default: ~/.config/portal)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Enable verbose logging (prints log path, sets DEBUG level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page of news and print it
    Fetch {
        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: usize,

        /// Output format (toml or json)
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {s}. Use 'toml' or 'json'")),
        }
    }
}
