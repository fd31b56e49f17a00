//! Post references and input normalization.

use std::fmt;

/// Numeric post identifier.
pub type PostId = u64;

/// Single reference to a post, either by ID or by slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostReference {
    Id(PostId),
    Slug(String),
}

impl PostReference {
    /// Classifies a raw reference token.
    ///
    /// The token is coerced to an integer the way the host platform casts
    /// text: optional leading whitespace, optional sign, then leading digits.
    /// Anything after the digits is ignored, so `"12abc"` refers to post 12.
    ///
    /// # Arguments
    ///
    /// * `token`: Raw token from caller input
    ///
    /// # Returns
    ///
    /// `Id` for a positive coercion, `Slug` for a non-empty token that
    /// coerces to zero, `None` for empty tokens and negative numbers
    pub fn from_token(token: &str) -> Option<Self> {
        if token.is_empty() {
            return None;
        }

        match coerce_int(token) {
            n if n > 0 => Some(Self::Id(n as PostId)),
            0 => Some(Self::Slug(token.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for PostReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Slug(slug) => f.write_str(slug),
        }
    }
}

impl From<PostId> for PostReference {
    fn from(id: PostId) -> Self {
        Self::Id(id)
    }
}

/// Heterogeneous post input accepted by the linker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Posts {
    /// One reference, used as-is.
    Single(PostReference),
    /// Ordered references, used element by element.
    List(Vec<PostReference>),
    /// Text holding references separated by commas and/or spaces.
    Delimited(String),
}

impl Posts {
    /// Builds a list from raw tokens, dropping the ones that cannot refer
    /// to any post.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::List(
            tokens
                .into_iter()
                .filter_map(|t| PostReference::from_token(t.as_ref()))
                .collect(),
        )
    }

    /// Returns references in input order.
    ///
    /// Delimited text is canonicalized to comma separated form before
    /// splitting. Separators are replaced literally, so a slug containing a
    /// space or comma is split apart.
    pub fn tokens(&self) -> Vec<PostReference> {
        match self {
            Self::Single(reference) => vec![reference.clone()],
            Self::List(references) => references.clone(),
            Self::Delimited(text) => canonicalize(text)
                .split(',')
                .filter_map(PostReference::from_token)
                .collect(),
        }
    }
}

impl Default for Posts {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl From<&str> for Posts {
    fn from(text: &str) -> Self {
        Self::Delimited(text.to_string())
    }
}

impl From<String> for Posts {
    fn from(text: String) -> Self {
        Self::Delimited(text)
    }
}

impl From<PostId> for Posts {
    fn from(id: PostId) -> Self {
        Self::Single(PostReference::Id(id))
    }
}

impl From<PostReference> for Posts {
    fn from(reference: PostReference) -> Self {
        Self::Single(reference)
    }
}

impl From<Vec<PostReference>> for Posts {
    fn from(references: Vec<PostReference>) -> Self {
        Self::List(references)
    }
}

impl From<Vec<PostId>> for Posts {
    fn from(ids: Vec<PostId>) -> Self {
        Self::List(ids.into_iter().map(PostReference::Id).collect())
    }
}

/// Rewrites `", "` and `" "` separators as `","`.
fn canonicalize(text: &str) -> String {
    text.replace(", ", ",").replace(' ', ",")
}

/// Integer coercion of leading digits. Overflow saturates.
fn coerce_int(token: &str) -> i64 {
    let trimmed = token.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}
