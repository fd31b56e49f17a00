//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::options::FormatOptions;
use crate::reference::Posts;

/// Command line configuration for linkify-posts.
#[derive(Debug, Clone, Parser)]
#[command(name = "linkify-posts", version, about, long_about = None)]
pub struct Config {
    /// Post IDs and/or slugs, separated by commas or spaces
    pub posts: Vec<String>,

    /// JSON content store
    #[arg(short, long, default_value = "posts.json")]
    pub store: PathBuf,

    #[command(flatten)]
    pub format: FormatOptions,

    /// Render as a widget with this title
    #[arg(long)]
    pub title: Option<String>,

    /// Use the deprecated linkify_post_ids entry point
    #[arg(long, conflicts_with = "title")]
    pub legacy: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if content store path does not exist.
    pub fn validate(&self) -> Result<()> {
        if !self.store.exists() {
            bail!("Content store does not exist: {}", self.store.display());
        }

        Ok(())
    }

    /// Returns post arguments as delimited input.
    ///
    /// Each word is one or more references; words are joined with commas.
    pub fn posts(&self) -> Posts {
        Posts::Delimited(self.posts.join(","))
    }
}
