//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    commands::IntervalBounds,
    error::SettingsError,
    services::{Notifier, SettingsStore},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "blink-now")]
#[command(about = "An eye care reminder service with a repeating countdown")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Shortest accepted reminder interval in minutes
    #[arg(long, default_value = "1")]
    pub min_interval: u64,

    /// Longest accepted reminder interval in minutes
    #[arg(long, default_value = "120")]
    pub max_interval: u64,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Start the reminder at launch with the saved interval and message
    #[arg(short, long)]
    pub start: bool,

    /// Log reminders instead of showing desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn bounds(&self) -> IntervalBounds {
        IntervalBounds {
            min: self.min_interval.max(1),
            max: self.max_interval,
        }
    }

    pub fn notifier(&self) -> Notifier {
        if self.no_notify { Notifier::LogOnly } else { Notifier::Desktop }
    }

    pub fn settings_path(&self) -> Result<PathBuf, SettingsError> {
        match &self.settings {
            Some(path) => Ok(path.clone()),
            None => SettingsStore::default_path(),
        }
    }
}
