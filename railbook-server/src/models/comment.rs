//! Comment input

/// A comment ready for insertion.
///
/// The `comments` table places no constraint on any column, so nothing
/// here is validated. `post_id` may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: Option<i64>,
    pub comment: Option<String>,
    pub name: Option<String>,
}

impl NewComment {
    /// Comment attached to the given post.
    pub fn for_post(post_id: i64, comment: Option<String>, name: Option<String>) -> Self {
        Self {
            post_id: Some(post_id),
            comment,
            name,
        }
    }
}
