//! Display-name validation shared by funds and investors

use super::ValidationError;

/// Validated, non-empty record name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordName(String);

impl RecordName {
    /// Create a new name.
    ///
    /// Surrounding whitespace is trimmed; a name that is empty after
    /// trimming is rejected.
    ///
    /// # Example
    /// ```
    /// use fundctl_server::models::RecordName;
    ///
    /// assert!(RecordName::new("Growth Fund I").is_ok());
    /// assert!(RecordName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RecordName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
