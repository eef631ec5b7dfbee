//! Domain models with validation at construction
//!
//! User input is validated when creating these types, so repositories
//! only ever see values that may be persisted.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod post;
pub mod comment;
pub mod book;
pub mod record_id;
pub mod pagination;

pub use validation::ValidationError;
pub use post::{NewPost, PostChanges, PostTitle, MAX_TITLE_LEN};
pub use comment::NewComment;
pub use book::NewBook;
pub use record_id::RecordId;
pub use pagination::{Pagination, Paginated, PaginationParams};
