//! Photo domain model and the detail payload handed to the presentation layer.
//!
//! A [`Photo`] is one image record as returned by the search API. The same
//! serde shape is used for the API wire format and for the persisted history,
//! so a photo read from either source round-trips unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Size name of the thumbnail URL used in result lists.
pub const SIZE_SMALL: &str = "small";

/// Size name of the URL shown in the detail view.
pub const SIZE_REGULAR: &str = "regular";

/// Author of a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

/// A single image search result.
///
/// Immutable once received. Equality and hashing use `id` only, so two
/// records for the same photo compare equal even if their URL maps differ.
///
/// # Fields
///
/// - `id`: Opaque identifier assigned by the API
/// - `urls`: Size name (`"small"`, `"regular"`, ...) to URL; keys are not guaranteed
/// - `description`: Optional human-readable description
/// - `user`: The photo's author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub urls: BTreeMap<String, String>,
    #[serde(default)]
    pub description: Option<String>,
    pub user: Author,
}

impl PartialEq for Photo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Photo {}

impl Hash for Photo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Photo {
    /// Creates a photo with no URLs.
    ///
    /// # Examples
    ///
    /// ```
    /// use photoscout::Photo;
    ///
    /// let photo = Photo::new("abc", Some("Red fox"), "Ana")
    ///     .with_url("regular", "https://images.example/abc");
    /// assert_eq!(photo.author_name(), "Ana");
    /// assert_eq!(photo.url("regular"), Some("https://images.example/abc"));
    /// assert!(photo.url("small").is_none());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, description: Option<&str>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            urls: BTreeMap::new(),
            description: description.map(str::to_string),
            user: Author { name: author.into() },
        }
    }

    /// Returns the photo with `size` mapped to `url`.
    #[must_use]
    pub fn with_url(mut self, size: impl Into<String>, url: impl Into<String>) -> Self {
        self.urls.insert(size.into(), url.into());
        self
    }

    #[must_use]
    pub fn author_name(&self) -> &str {
        &self.user.name
    }

    /// Looks up the URL for a size name.
    #[must_use]
    pub fn url(&self, size: &str) -> Option<&str> {
        self.urls.get(size).map(String::as_str)
    }

    /// Case-insensitive substring match against description and author name.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        let in_description = self
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle));
        in_description || self.user.name.to_lowercase().contains(needle)
    }

    /// Builds the payload the presentation layer needs for the detail view.
    #[must_use]
    pub fn detail(&self) -> PhotoDetail {
        PhotoDetail {
            id: self.id.clone(),
            description: self.description.clone(),
            author_name: self.user.name.clone(),
            image_url: self.url(SIZE_REGULAR).map(str::to_string),
        }
    }
}

/// Everything the detail view shows for a selected photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDetail {
    pub id: String,
    pub description: Option<String>,
    pub author_name: String,
    /// The `"regular"` size URL, if the record carried one.
    pub image_url: Option<String>,
}
