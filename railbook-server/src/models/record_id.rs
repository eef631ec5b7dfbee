//! Record identifiers

use super::ValidationError;

/// Validated primary key (positive integer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(i64);

impl RecordId {
    /// Parse a record id from a path segment.
    ///
    /// # Example
    /// ```
    /// use railbook_server::models::RecordId;
    ///
    /// assert_eq!(RecordId::parse("42").unwrap().get(), 42);
    /// assert!(RecordId::parse("0").is_err());
    /// assert!(RecordId::parse("abc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let id: i64 = s.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "id",
            reason: "must be a positive integer",
        })?;
        Self::new(id)
    }

    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a positive integer",
            });
        }
        Ok(Self(id))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}
