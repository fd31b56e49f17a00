//! Turn post IDs and/or slugs into a list of links to those posts.

mod config;
mod hooks;
mod linker;
mod options;
mod reference;
mod repository;
mod widget;

pub use config::Config;
pub use hooks::{ActionArgs, DEFAULT_PRIORITY, HookRegistry};
#[allow(deprecated)]
pub use linker::linkify_post_ids;
pub use linker::{LINKIFY_POSTS_ACTION, Linker, join_links, linkify_posts, register_actions};
pub use options::FormatOptions;
pub use reference::{PostId, PostReference, Posts};
pub use repository::{ContentRepository, DEFAULT_SITE_URL, MemoryRepository, Post, PostStatus};
pub use widget::{WidgetChrome, WidgetSettings, render_widget};
