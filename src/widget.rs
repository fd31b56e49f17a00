//! Sidebar widget wrapping the post linker.

use anyhow::Result;
use maud::{PreEscaped, html};
use serde::Deserialize;

use crate::linker::linkify_posts;
use crate::options::FormatOptions;
use crate::reference::Posts;
use crate::repository::ContentRepository;

/// Per-instance widget settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Heading shown above the links; omitted when empty.
    pub title: String,
    /// Post IDs and/or slugs separated by commas or spaces.
    pub posts: String,
    #[serde(flatten)]
    pub format: FormatOptions,
}

/// Markup the hosting sidebar places around each widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetChrome {
    pub before_widget: String,
    pub after_widget: String,
    pub before_title: String,
    pub after_title: String,
}

impl Default for WidgetChrome {
    fn default() -> Self {
        Self {
            before_widget: r#"<div class="widget linkify-posts">"#.to_string(),
            after_widget: "</div>".to_string(),
            before_title: r#"<h2 class="widget-title">"#.to_string(),
            after_title: "</h2>".to_string(),
        }
    }
}

/// Renders a widget instance.
///
/// # Arguments
///
/// * `repository`: Content repository for post lookups
/// * `settings`: Widget instance settings
/// * `chrome`: Sidebar markup around the widget and its title
///
/// # Returns
///
/// `None` when the linker renders nothing; the widget is then omitted
/// entirely
///
/// # Errors
///
/// Returns error only if the repository itself fails.
pub fn render_widget<R: ContentRepository + ?Sized>(
    repository: &R,
    settings: &WidgetSettings,
    chrome: &WidgetChrome,
) -> Result<Option<String>> {
    let posts = Posts::from(settings.posts.as_str());
    let Some(content) = linkify_posts(repository, &posts, &settings.format)? else {
        return Ok(None);
    };

    let markup = html! {
        (PreEscaped(&chrome.before_widget))
        @if !settings.title.is_empty() {
            (PreEscaped(&chrome.before_title))
            (settings.title)
            (PreEscaped(&chrome.after_title))
        }
        (PreEscaped(content))
        (PreEscaped(&chrome.after_widget))
    };

    Ok(Some(markup.into_string()))
}
