//! Shared test utilities for integration tests.
//!
//! Provides a seeded content store and helpers that render through either
//! the direct entry points or the registered action.

use anyhow::Result;
use linkify_posts::{
    ActionArgs, FormatOptions, HookRegistry, LINKIFY_POSTS_ACTION, MemoryRepository, Post, PostId,
    Posts, register_actions,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// ID assigned to the first seeded post.
pub const FIRST_POST_ID: PostId = 101;

/// Number of seeded posts.
pub const POST_COUNT: usize = 5;

/// Content store seeded with posts titled "Post title 1" through
/// "Post title 5".
pub struct Fixture {
    pub repository: Arc<MemoryRepository>,
    pub post_ids: Vec<PostId>,
}

impl Fixture {
    pub fn new() -> Self {
        let mut repository = MemoryRepository::new();
        let post_ids: Vec<PostId> = (0..POST_COUNT as PostId).map(|i| FIRST_POST_ID + i).collect();

        for (n, id) in post_ids.iter().enumerate() {
            repository.insert(Post::new(
                *id,
                format!("post-title-{}", n + 1),
                format!("Post title {}", n + 1),
            ));
        }

        Self {
            repository: Arc::new(repository),
            post_ids,
        }
    }

    /// Slug of a seeded post.
    pub fn slug(&self, id: PostId) -> String {
        self.repository
            .get(id)
            .map(|post| post.slug.clone())
            .unwrap_or_default()
    }

    /// Renders through the direct entry point or the registered action.
    ///
    /// # Arguments
    ///
    /// * `posts`: Post input
    /// * `positional`: Format strings in action argument order
    /// * `direct_call`: Call the function instead of dispatching the action
    ///
    /// # Returns
    ///
    /// Everything written; empty when nothing rendered
    pub fn results(&self, posts: Posts, positional: &[&str], direct_call: bool) -> Result<String> {
        let positional: Vec<String> = positional.iter().map(|s| s.to_string()).collect();

        if direct_call {
            let options = FormatOptions::from_positional(&positional);
            let rendered =
                linkify_posts::linkify_posts(self.repository.as_ref(), &posts, &options)?;
            return Ok(rendered.unwrap_or_default());
        }

        let mut registry = HookRegistry::new();
        register_actions(&mut registry, Arc::clone(&self.repository));

        let mut args = ActionArgs::new(posts);
        args.positional = positional;

        let mut out = Vec::new();
        registry.do_action(LINKIFY_POSTS_ACTION, &args, &mut out)?;
        Ok(String::from_utf8(out)?)
    }
}

/// Builds the expected markup for consecutive seeded posts.
///
/// # Arguments
///
/// * `count`: Number of links
/// * `first_id`: ID of the first linked post
/// * `between`: Separator between links
/// * `post_num`: Title number of the first linked post
pub fn expected_output(count: usize, first_id: PostId, between: &str, post_num: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                r#"<a href="http://example.org/?p={}" title="View post: Post title {}">Post title {}</a>"#,
                first_id + i as PostId,
                post_num + i,
                post_num + i
            )
        })
        .collect::<Vec<_>>()
        .join(between)
}

/// Writes a JSON content store holding the seeded posts.
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn write_store(dir: &Path) -> Result<PathBuf> {
    let posts: Vec<String> = (0..POST_COUNT)
        .map(|i| {
            format!(
                r#"{{"id": {}, "slug": "post-title-{}", "title": "Post title {}"}}"#,
                FIRST_POST_ID + i as PostId,
                i + 1,
                i + 1
            )
        })
        .collect();

    let path = dir.join("posts.json");
    std::fs::write(
        &path,
        format!(
            r#"{{"site_url": "http://example.org", "posts": [{}]}}"#,
            posts.join(",")
        ),
    )?;
    Ok(path)
}
