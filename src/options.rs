//! Output formatting options.

use clap::Args;
use serde::Deserialize;

/// Default separator between consecutive links.
pub const DEFAULT_BETWEEN: &str = ", ";

/// Strings wrapped around and placed between rendered links.
#[derive(Debug, Clone, PartialEq, Eq, Args, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Text before the listing (emitted only when something is rendered)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub before: String,

    /// Text after the listing (emitted only when something is rendered)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub after: String,

    /// Separator between links
    #[arg(long, default_value = DEFAULT_BETWEEN, allow_hyphen_values = true)]
    pub between: String,

    /// Separator before the last link (defaults to --between)
    #[arg(long = "before-last", default_value = "", allow_hyphen_values = true)]
    pub before_last: String,

    /// Text rendered when no post resolves (nothing is rendered when empty)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub none: String,
}

impl FormatOptions {
    /// Maps hook arguments in order: before, after, between, before_last,
    /// none. Missing positions keep their defaults.
    pub fn from_positional(args: &[String]) -> Self {
        let mut options = Self::default();
        let fields = [
            &mut options.before,
            &mut options.after,
            &mut options.between,
            &mut options.before_last,
            &mut options.none,
        ];

        for (field, value) in fields.into_iter().zip(args) {
            *field = value.clone();
        }

        options
    }

    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = before.into();
        self
    }

    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = after.into();
        self
    }

    pub fn between(mut self, between: impl Into<String>) -> Self {
        self.between = between.into();
        self
    }

    pub fn before_last(mut self, before_last: impl Into<String>) -> Self {
        self.before_last = before_last.into();
        self
    }

    pub fn none(mut self, none: impl Into<String>) -> Self {
        self.none = none.into();
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            before: String::new(),
            after: String::new(),
            between: DEFAULT_BETWEEN.to_string(),
            before_last: String::new(),
            none: String::new(),
        }
    }
}
