//! Rendering post references as joined links.

use anyhow::{Context, Result};
use maud::{PreEscaped, html};
use std::io::Write;
use std::sync::Arc;

use crate::hooks::{DEFAULT_PRIORITY, HookRegistry};
use crate::options::FormatOptions;
use crate::reference::{PostId, PostReference, Posts};
use crate::repository::ContentRepository;

/// Action name the renderer is registered under.
pub const LINKIFY_POSTS_ACTION: &str = "linkify_posts";

/// Arguments accepted by the action: posts plus the five format strings.
const ACTION_ACCEPTED_ARGS: usize = 6;

/// Renders post references against a content repository.
pub struct Linker<'a, R: ContentRepository + ?Sized> {
    repository: &'a R,
}

impl<'a, R: ContentRepository + ?Sized> Linker<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// Resolves every reference to link markup, in input order.
    ///
    /// References that match no post, or whose post has an empty title,
    /// produce no entry.
    ///
    /// # Errors
    ///
    /// Returns error only if the repository itself fails.
    pub fn links(&self, posts: &Posts) -> Result<Vec<String>> {
        let mut links = Vec::new();

        for reference in posts.tokens() {
            let Some(id) = self.resolve(&reference)? else {
                tracing::debug!(reference = %reference, "Skipping unresolved post reference");
                continue;
            };

            match self.link(id)? {
                Some(link) => links.push(link),
                None => {
                    tracing::debug!(reference = %reference, id, "Skipping post without title")
                }
            }
        }

        Ok(links)
    }

    /// Renders the joined links wrapped in `before` and `after`.
    ///
    /// Falls back to `none` when nothing resolves.
    ///
    /// # Returns
    ///
    /// `None` when nothing resolves and `none` is empty; the caller must
    /// then emit nothing, not even `before` or `after`
    ///
    /// # Errors
    ///
    /// Returns error only if the repository itself fails.
    pub fn render(&self, posts: &Posts, options: &FormatOptions) -> Result<Option<String>> {
        let links = self.links(posts)?;
        tracing::debug!(resolved = links.len(), "Rendered post links");

        let joined = join_links(&links, &options.between, &options.before_last);
        let body = if joined.is_empty() {
            if options.none.is_empty() {
                return Ok(None);
            }
            options.none.as_str()
        } else {
            joined.as_str()
        };

        Ok(Some(format!("{}{}{}", options.before, body, options.after)))
    }

    /// Renders into `out`.
    ///
    /// # Returns
    ///
    /// Whether anything was written
    ///
    /// # Errors
    ///
    /// Returns error if the repository fails or writing fails.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        posts: &Posts,
        options: &FormatOptions,
        out: &mut W,
    ) -> Result<bool> {
        let Some(rendered) = self.render(posts, options)? else {
            return Ok(false);
        };

        out.write_all(rendered.as_bytes())
            .context("Failed to write rendered links")?;
        Ok(true)
    }

    fn resolve(&self, reference: &PostReference) -> Result<Option<PostId>> {
        match reference {
            PostReference::Id(0) => Ok(None),
            PostReference::Id(id) => Ok(Some(*id)),
            PostReference::Slug(text) => match PostReference::from_token(text) {
                None => Ok(None),
                Some(PostReference::Id(id)) => Ok(Some(id)),
                Some(PostReference::Slug(slug)) => self
                    .repository
                    .find_by_slug(&slug)
                    .with_context(|| format!("Failed to look up post slug {}", slug)),
            },
        }
    }

    fn link(&self, id: PostId) -> Result<Option<String>> {
        let title = self
            .repository
            .title(id)
            .with_context(|| format!("Failed to fetch title of post {}", id))?;
        if title.is_empty() {
            return Ok(None);
        }

        let permalink = self
            .repository
            .permalink(id)
            .with_context(|| format!("Failed to fetch permalink of post {}", id))?;

        let tooltip = escape_attribute(&format!("View post: {}", title));
        let markup = html! {
            a href=(permalink) title=(PreEscaped(tooltip)) { (PreEscaped(&title)) }
        };

        Ok(Some(markup.into_string()))
    }
}

/// Escapes text for an attribute value without double encoding.
///
/// Existing `&name;`, `&#NN;` and `&#xHH;` entities are kept as they are.
fn escape_attribute(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for (i, c) in text.char_indices() {
        match c {
            '&' if is_entity(&text[i + 1..]) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// True when `rest` (the text after an `&`) starts with an entity body.
fn is_entity(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];

    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(dec) = body.strip_prefix('#') {
        !dec.is_empty() && dec.chars().all(|c| c.is_ascii_digit())
    } else {
        body.starts_with(|c: char| c.is_ascii_alphabetic())
            && body.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

/// Joins rendered links.
///
/// Uses `between` for every gap unless `before_last` is non-empty, in which
/// case `before_last` replaces the final gap.
///
/// # Arguments
///
/// * `links`: Rendered links in output order
/// * `between`: Separator between consecutive links
/// * `before_last`: Separator before the last link, empty to reuse `between`
///
/// # Returns
///
/// Joined string, empty when there are no links
pub fn join_links(links: &[String], between: &str, before_last: &str) -> String {
    if before_last.is_empty() {
        return links.join(between);
    }

    match links {
        [] => String::new(),
        [only] => only.clone(),
        [first, last] => format!("{}{}{}", first, before_last, last),
        [init @ .., last] => format!("{}{}{}", init.join(between), before_last, last),
    }
}

/// Renders links to each of any number of posts.
///
/// # Errors
///
/// Returns error only if the repository itself fails.
pub fn linkify_posts<R: ContentRepository + ?Sized>(
    repository: &R,
    posts: &Posts,
    options: &FormatOptions,
) -> Result<Option<String>> {
    Linker::new(repository).render(posts, options)
}

/// Renders links to each of any number of posts.
///
/// Emits a deprecation notice, then behaves exactly like [`linkify_posts`].
///
/// # Errors
///
/// Returns error only if the repository itself fails.
#[deprecated(since = "2.0.0", note = "use `linkify_posts` instead")]
pub fn linkify_post_ids<R: ContentRepository + ?Sized>(
    repository: &R,
    posts: &Posts,
    options: &FormatOptions,
) -> Result<Option<String>> {
    tracing::warn!(
        function = "linkify_post_ids",
        since = "2.0",
        replacement = "linkify_posts",
        "linkify_post_ids is deprecated since version 2.0! Use linkify_posts instead."
    );
    linkify_posts(repository, posts, options)
}

/// Registers the renderer as the [`LINKIFY_POSTS_ACTION`] action.
///
/// Positional action arguments map to [`FormatOptions::from_positional`].
pub fn register_actions<R>(registry: &mut HookRegistry, repository: Arc<R>)
where
    R: ContentRepository + ?Sized + 'static,
{
    registry.add_action(
        LINKIFY_POSTS_ACTION,
        DEFAULT_PRIORITY,
        ACTION_ACCEPTED_ARGS,
        move |args, out| {
            let options = FormatOptions::from_positional(&args.positional);
            Linker::new(repository.as_ref()).write_to(&args.posts, &options, out)?;
            Ok(())
        },
    );
}
