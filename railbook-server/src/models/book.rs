//! Book input

use chrono::NaiveDate;

/// A book ready for insertion.
///
/// Books carry no validation rules; they only exist to be listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub price: Option<i64>,
    pub publish: Option<String>,
    pub published: Option<NaiveDate>,
}
