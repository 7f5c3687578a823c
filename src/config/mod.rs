//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::str::FromStr;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::application::store::{DEFAULT_FEED_LOCATION, FeedLocation};

pub use cli::{CliArgs, Command, InteractionArgs, ListArgs, RenderArgs, SettingsOverrides};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "blogview";
const ENV_PREFIX: &str = "BLOGVIEW";
pub const DEFAULT_PAGE_URL: &str = "http://localhost/blog.html";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub feed: FeedSettings,
    pub logging: LoggingSettings,
    pub listing: ListingSettings,
}

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub location: FeedLocation,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct ListingSettings {
    pub page_url: Url,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(cli.command_or_default().overrides());

    Settings::from_raw(raw)
}

/// Resolve configuration using the process arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    feed: RawFeedSettings,
    logging: RawLoggingSettings,
    listing: RawListingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(location) = overrides.feed_location.as_ref() {
            self.feed.location = Some(location.clone());
        }
        if let Some(base) = overrides.feed_base_url.as_ref() {
            self.feed.base_url = Some(base.clone());
        }
        if let Some(page_url) = overrides.page_url.as_ref() {
            self.listing.page_url = Some(page_url.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            feed,
            logging,
            listing,
        } = raw;

        Ok(Self {
            feed: build_feed_settings(feed)?,
            logging: build_logging_settings(logging)?,
            listing: build_listing_settings(listing)?,
        })
    }
}

fn build_feed_settings(feed: RawFeedSettings) -> Result<FeedSettings, LoadError> {
    let base_url = feed
        .base_url
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            parse_url(value).map_err(|reason| LoadError::invalid("feed.base_url", reason))
        })
        .transpose()?;

    let location = feed
        .location
        .unwrap_or_else(|| DEFAULT_FEED_LOCATION.to_string());
    let location = FeedLocation::resolve(&location, base_url.as_ref())
        .map_err(|reason| LoadError::invalid("feed.location", reason))?;

    Ok(FeedSettings { location })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_listing_settings(listing: RawListingSettings) -> Result<ListingSettings, LoadError> {
    let page_url = listing
        .page_url
        .unwrap_or_else(|| DEFAULT_PAGE_URL.to_string());
    let page_url = parse_url(page_url.trim())
        .map_err(|reason| LoadError::invalid("listing.page_url", reason))?;

    Ok(ListingSettings { page_url })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawFeedSettings {
    location: Option<String>,
    base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawListingSettings {
    page_url: Option<String>,
}

fn parse_url(value: &str) -> Result<Url, String> {
    Url::parse(value).map_err(|err| format!("invalid URL `{value}`: {err}"))
}
