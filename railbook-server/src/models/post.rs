//! Post validation
//!
//! A post needs a non-blank title of at most 20 characters. The body is free text.

use super::ValidationError;

/// Maximum length for post titles, in characters
pub const MAX_TITLE_LEN: usize = 20;

/// Validated post title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    /// Create a new post title.
    ///
    /// # Rules
    /// - Not blank (empty or whitespace only)
    /// - Max 20 characters (counted as `char`s, so multi-byte text is fine)
    ///
    /// # Example
    /// ```
    /// use railbook_server::models::PostTitle;
    ///
    /// assert!(PostTitle::new("Hello").is_ok());
    /// assert!(PostTitle::new("").is_err());
    /// assert!(PostTitle::new("   ").is_err());  // whitespace only
    /// assert!(PostTitle::new("こんにちは、世界！").is_ok());
    /// assert!(PostTitle::new(&"a".repeat(21)).is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if s.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Validate an optional title, treating `None` as missing.
    pub fn required(s: Option<&str>) -> Result<Self, ValidationError> {
        match s {
            Some(s) => Self::new(s),
            None => Err(ValidationError::Empty { field: "title" }),
        }
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A post that passed validation and may be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: PostTitle,
    pub body: Option<String>,
}

impl NewPost {
    pub fn new(title: &str, body: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: PostTitle::new(title)?,
            body: body.map(str::to_owned),
        })
    }
}

/// Validated replacement values for an existing post.
///
/// Updates are full replacements of the editable fields, so the title
/// rule applies to every save.
pub type PostChanges = NewPost;
