use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the blogview binary.
#[derive(Debug, Parser)]
#[command(
    name = "blogview",
    version,
    about = "Filter, search, and sort a static blog feed into a listing"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "BLOGVIEW_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl CliArgs {
    /// The requested command, defaulting to `render` with no interactions.
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Render(RenderArgs::default()))
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render the listing page as HTML.
    Render(RenderArgs),
    /// Print the computed listing as JSON.
    List(ListArgs),
}

impl Command {
    pub fn overrides(&self) -> &SettingsOverrides {
        match self {
            Command::Render(args) => &args.overrides,
            Command::List(args) => &args.overrides,
        }
    }

    pub fn interactions(&self) -> &InteractionArgs {
        match self {
            Command::Render(args) => &args.interactions,
            Command::List(args) => &args.interactions,
        }
    }
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: SettingsOverrides,

    #[command(flatten)]
    pub interactions: InteractionArgs,

    /// Write the rendered page to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub overrides: SettingsOverrides,

    #[command(flatten)]
    pub interactions: InteractionArgs,
}

/// Interactions replayed on the listing after the page loads, in the order
/// category, sort, search.
#[derive(Debug, Args, Default, Clone)]
pub struct InteractionArgs {
    /// Click the filter for this category (`all` clears the filter).
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Click a sort control (desc|asc).
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<String>,

    /// Type this text into the title search field.
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SettingsOverrides {
    /// Override the feed location (file path or URL).
    #[arg(long = "feed", value_name = "LOCATION")]
    pub feed_location: Option<String>,

    /// Override the base URL that relative feed locations are fetched from.
    #[arg(long = "feed-base-url", value_name = "URL")]
    pub feed_base_url: Option<String>,

    /// Override the page URL whose `category` parameter seeds the filter.
    #[arg(long = "page-url", value_name = "URL")]
    pub page_url: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}
