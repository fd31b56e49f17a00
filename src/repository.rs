//! Content repository lookups.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::reference::PostId;

/// Site URL used for default permalinks when none is configured.
pub const DEFAULT_SITE_URL: &str = "http://example.org";

/// Read access to published content.
///
/// Implementations return `Err` only when the store itself cannot be
/// reached. A reference that matches nothing is `Ok(None)` or an empty
/// title, never an error.
pub trait ContentRepository {
    /// Finds the published post whose slug equals `slug`.
    fn find_by_slug(&self, slug: &str) -> Result<Option<PostId>>;

    /// Post title, empty when the post does not exist.
    fn title(&self, id: PostId) -> Result<String>;

    /// Canonical URL of the post.
    fn permalink(&self, id: PostId) -> Result<String>;
}

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
    Draft,
    Private,
    Trash,
}

/// Stored post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub permalink: Option<String>,
}

impl Post {
    /// Creates a published post with the default permalink.
    pub fn new(id: PostId, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            title: title.into(),
            status: PostStatus::Publish,
            permalink: None,
        }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_permalink(mut self, permalink: impl Into<String>) -> Self {
        self.permalink = Some(permalink.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct StoreDocument {
    #[serde(default = "default_site_url")]
    site_url: String,
    #[serde(default)]
    posts: Vec<Post>,
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

/// In-memory content store keyed by post ID.
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    site_url: String,
    posts: BTreeMap<PostId, Post>,
}

impl MemoryRepository {
    /// Creates an empty store for the default site URL.
    pub fn new() -> Self {
        Self::with_site_url(DEFAULT_SITE_URL)
    }

    /// Creates an empty store for `site_url`.
    ///
    /// Trailing slashes are stripped so default permalinks take the form
    /// `{site_url}/?p={id}`.
    pub fn with_site_url(site_url: impl Into<String>) -> Self {
        let site_url: String = site_url.into();
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            posts: BTreeMap::new(),
        }
    }

    /// Parses a JSON store document.
    ///
    /// # Errors
    ///
    /// Returns error if the document is not valid JSON or a post is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: StoreDocument =
            serde_json::from_str(json).context("Failed to parse content store")?;

        let mut repository = Self::with_site_url(document.site_url);
        for post in document.posts {
            repository.insert(post);
        }

        Ok(repository)
    }

    /// Loads a JSON store document from disk.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read content store: {}", path.display()))?;

        Self::from_json_str(&json)
            .with_context(|| format!("Invalid content store: {}", path.display()))
    }

    /// Adds or replaces a post, returning the previous post with that ID.
    pub fn insert(&mut self, post: Post) -> Option<Post> {
        self.posts.insert(post.id, post)
    }

    /// Site URL without trailing slash.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRepository for MemoryRepository {
    fn find_by_slug(&self, slug: &str) -> Result<Option<PostId>> {
        Ok(self
            .posts
            .values()
            .find(|post| post.status == PostStatus::Publish && post.slug == slug)
            .map(|post| post.id))
    }

    fn title(&self, id: PostId) -> Result<String> {
        Ok(self
            .posts
            .get(&id)
            .map(|post| post.title.clone())
            .unwrap_or_default())
    }

    fn permalink(&self, id: PostId) -> Result<String> {
        let Some(post) = self.posts.get(&id) else {
            bail!("Post {} does not exist", id);
        };

        Ok(post
            .permalink
            .clone()
            .unwrap_or_else(|| format!("{}/?p={}", self.site_url, post.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_repository() -> MemoryRepository {
        let mut repo = MemoryRepository::new();
        repo.insert(Post::new(1, "hello-world", "Hello world"));
        repo.insert(Post::new(2, "draft-post", "Draft").with_status(PostStatus::Draft));
        repo.insert(Post::new(3, "about", "About").with_permalink("http://example.org/about/"));
        repo
    }

    #[test]
    fn test_find_by_slug_published() {
        // Arrange
        let repo = sample_repository();

        // Act
        let result = repo.find_by_slug("hello-world").expect("Lookup should succeed");

        // Assert
        assert_eq!(result, Some(1));
    }

    #[test]
    fn test_find_by_slug_skips_unpublished() {
        // Arrange
        let repo = sample_repository();

        // Act
        let result = repo.find_by_slug("draft-post").expect("Lookup should succeed");

        // Assert
        assert_eq!(result, None, "Draft posts should not match slug queries");
    }

    #[test]
    fn test_find_by_slug_missing() {
        let repo = sample_repository();

        assert_eq!(repo.find_by_slug("not-a-post").unwrap(), None);
    }

    #[test]
    fn test_title_for_unknown_id_is_empty() {
        let repo = sample_repository();

        assert_eq!(repo.title(99999999).unwrap(), "");
        assert_eq!(repo.title(2).unwrap(), "Draft");
    }

    #[test]
    fn test_default_permalink() {
        let repo = sample_repository();

        assert_eq!(repo.permalink(1).unwrap(), "http://example.org/?p=1");
    }

    #[test]
    fn test_explicit_permalink() {
        let repo = sample_repository();

        assert_eq!(repo.permalink(3).unwrap(), "http://example.org/about/");
    }

    #[test]
    fn test_permalink_unknown_id_errors() {
        // Arrange
        let repo = sample_repository();

        // Act
        let result = repo.permalink(42);

        // Assert
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_site_url_trailing_slash_stripped() {
        // Arrange
        let mut repo = MemoryRepository::with_site_url("https://blog.test/");
        repo.insert(Post::new(7, "seven", "Seven"));

        // Act
        let permalink = repo.permalink(7).unwrap();

        // Assert
        assert_eq!(repo.site_url(), "https://blog.test");
        assert_eq!(permalink, "https://blog.test/?p=7");
    }

    #[test]
    fn test_from_json_str() {
        // Arrange
        let json = r#"{
            "site_url": "https://news.test",
            "posts": [
                {"id": 4, "slug": "four", "title": "Four"},
                {"id": 5, "slug": "five", "title": "Five", "status": "private"}
            ]
        }"#;

        // Act
        let repo = MemoryRepository::from_json_str(json).expect("Should parse store");

        // Assert
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get(5).map(|p| p.status), Some(PostStatus::Private));
        assert_eq!(repo.permalink(4).unwrap(), "https://news.test/?p=4");
    }

    #[test]
    fn test_from_json_str_defaults_site_url() {
        let repo = MemoryRepository::from_json_str(r#"{"posts": []}"#).unwrap();

        assert_eq!(repo.site_url(), DEFAULT_SITE_URL);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_from_json_str_invalid() {
        let result = MemoryRepository::from_json_str("{not json");

        assert!(result.is_err(), "Malformed store should be rejected");
    }

    #[test]
    fn test_from_json_file_missing() {
        // Act
        let result = MemoryRepository::from_json_file("/nonexistent/posts.json");

        // Assert
        let err_msg = format!("{:#}", result.unwrap_err());
        assert!(
            err_msg.contains("Failed to read content store"),
            "Error should name the failing step: {}",
            err_msg
        );
    }
}
