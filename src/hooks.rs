//! Named action registry.
//!
//! Lets template code invoke renderers by name with positional arguments,
//! independent of how the renderer was wired up.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Write;

use crate::reference::Posts;

/// Priority used when none is specified.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Callback invoked for an action.
type ActionCallback = Box<dyn Fn(&ActionArgs, &mut dyn Write) -> Result<()>>;

/// Arguments passed to an action: the posts, then positional strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionArgs {
    pub posts: Posts,
    pub positional: Vec<String>,
}

impl ActionArgs {
    pub fn new(posts: impl Into<Posts>) -> Self {
        Self {
            posts: posts.into(),
            positional: Vec::new(),
        }
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Keeps at most `accepted` arguments, counting posts as the first.
    fn truncated(&self, accepted: usize) -> Self {
        let keep = accepted.saturating_sub(1).min(self.positional.len());
        Self {
            posts: self.posts.clone(),
            positional: self.positional[..keep].to_vec(),
        }
    }
}

struct Action {
    priority: i32,
    accepted_args: usize,
    callback: ActionCallback,
}

/// Registry of named actions.
#[derive(Default)]
pub struct HookRegistry {
    actions: HashMap<String, Vec<Action>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `name`.
    ///
    /// Callbacks run in ascending priority; equal priorities keep
    /// registration order.
    ///
    /// # Arguments
    ///
    /// * `name`: Action name
    /// * `priority`: Lower runs earlier
    /// * `accepted_args`: Number of arguments the callback receives,
    ///   counting the posts argument
    /// * `callback`: Function invoked with the arguments and output writer
    pub fn add_action<F>(&mut self, name: &str, priority: i32, accepted_args: usize, callback: F)
    where
        F: Fn(&ActionArgs, &mut dyn Write) -> Result<()> + 'static,
    {
        let actions = self.actions.entry(name.to_string()).or_default();
        let position = actions.partition_point(|a| a.priority <= priority);
        actions.insert(
            position,
            Action {
                priority,
                accepted_args,
                callback: Box::new(callback),
            },
        );
    }

    /// Runs every callback registered under `name`.
    ///
    /// # Returns
    ///
    /// Number of callbacks run; zero for an unknown action
    ///
    /// # Errors
    ///
    /// Returns the first callback error; later callbacks do not run.
    pub fn do_action(&self, name: &str, args: &ActionArgs, out: &mut dyn Write) -> Result<usize> {
        let Some(actions) = self.actions.get(name) else {
            tracing::debug!(action = name, "No callbacks registered");
            return Ok(0);
        };

        for action in actions {
            (action.callback)(&args.truncated(action.accepted_args), out)
                .with_context(|| format!("Action {} failed", name))?;
        }

        Ok(actions.len())
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.actions.iter().map(|(name, a)| (name, a.len())))
            .finish()
    }
}
