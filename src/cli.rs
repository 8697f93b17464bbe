// CLI module for argument parsing and configuration

use crate::batch::BatchOrder;
use crate::config::UserConfig;
use crate::deletion::DeletionMode;
use crate::domain::DiscoveryOptions;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Pswp - swipe through your photo library in the terminal
///
/// Each session shows a small random batch of photos. Keep what you love,
/// delete what you don't.
#[derive(Parser, Debug, Clone)]
#[command(name = "pswp")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing the photo library
    ///
    /// If not specified, defaults to the current directory.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Number of photos per session (overrides the config file)
    #[arg(short = 'l', long = "limit")]
    pub limit: Option<usize>,

    /// Order in which photos are presented
    #[arg(short = 'o', long = "order", value_enum, default_value = "random")]
    pub order: OrderArg,

    /// Include photos in subdirectories
    #[arg(short = 'R', long = "recursive", action = ArgAction::SetTrue)]
    pub recursive: bool,

    /// Show hidden files (files starting with .)
    #[arg(long = "hidden", action = ArgAction::SetTrue)]
    pub show_hidden: bool,

    /// Dry run mode - record decisions without deleting anything
    #[arg(short = 'n', long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Remove deleted photos from disk instead of moving them to the trash
    #[arg(long = "permanent", action = ArgAction::SetTrue, conflicts_with = "dry_run")]
    pub permanent: bool,

    /// Delete without asking for confirmation
    #[arg(short = 'y', long = "yes", action = ArgAction::SetTrue)]
    pub yes: bool,

    /// Show the welcome screen even if it was already seen
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub welcome: bool,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    /// Log file path (defaults to the user cache directory)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

/// Presentation order options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OrderArg {
    /// Random sample of the library
    #[default]
    Random,
    /// Most recent first
    Newest,
    /// Oldest first
    Oldest,
    /// Alphabetical by file name
    Name,
    /// Largest first
    Size,
}

impl From<OrderArg> for BatchOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Random => BatchOrder::Random,
            OrderArg::Newest => BatchOrder::Newest,
            OrderArg::Oldest => BatchOrder::Oldest,
            OrderArg::Name => BatchOrder::Name,
            OrderArg::Size => BatchOrder::Size,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    pub fn deletion_mode(&self) -> DeletionMode {
        if self.dry_run {
            DeletionMode::DryRun
        } else if self.permanent {
            DeletionMode::Permanent
        } else {
            DeletionMode::Trash
        }
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        // Check if directory exists
        if !self.directory.exists() {
            return Err(format!(
                "Directory does not exist: {}",
                self.directory.display()
            ));
        }

        if !self.directory.is_dir() {
            return Err(format!(
                "Path is not a directory: {}",
                self.directory.display()
            ));
        }

        if self.limit == Some(0) {
            return Err("limit must be at least 1".to_string());
        }

        if self.dry_run && self.permanent {
            return Err("--permanent cannot be combined with --dry-run".to_string());
        }

        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(format!(
                "Invalid log level: '{}'. Use one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments and the user config file
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory: PathBuf,
    pub batch_size: usize,
    pub order: BatchOrder,
    pub discovery: DiscoveryOptions,
    pub deletion_mode: DeletionMode,
    pub confirm_delete: bool,
    pub gesture_display: Duration,
    pub show_welcome: bool,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Merges parsed arguments over the persisted preferences
    pub fn resolve(args: Args, user: &UserConfig) -> Self {
        let deletion_mode = args.deletion_mode();
        AppConfig {
            directory: args.directory,
            batch_size: args.limit.unwrap_or(user.batch_size),
            order: args.order.into(),
            discovery: DiscoveryOptions {
                recursive: args.recursive,
                show_hidden: args.show_hidden,
            },
            deletion_mode,
            confirm_delete: user.confirm_delete && !args.yes,
            gesture_display: user.gesture_display(),
            show_welcome: args.welcome || !user.welcome_shown,
            log_level: args.log_level,
            log_file: args.log_file,
        }
    }
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig::resolve(args, &UserConfig::default())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let user = UserConfig::default();
        AppConfig {
            directory: PathBuf::from("."),
            batch_size: user.batch_size,
            order: BatchOrder::Random,
            discovery: DiscoveryOptions::default(),
            deletion_mode: DeletionMode::Trash,
            confirm_delete: user.confirm_delete,
            gesture_display: user.gesture_display(),
            show_welcome: true,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}
