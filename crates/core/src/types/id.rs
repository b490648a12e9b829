//! Product identifiers.
//!
//! Identifiers are opaque strings assigned by the catalog. Values coming from
//! the backend are accepted as-is; values typed by a user go through
//! [`ProductId::parse`] before they are sent anywhere.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A product identifier.
///
/// ## Constraints (enforced by [`ProductId::parse`])
///
/// - Length: 1-64 characters
/// - No whitespace or control characters
///
/// ## Examples
///
/// ```
/// use storefront_cart_core::ProductId;
///
/// assert!(ProductId::parse("BW0jAAeDJmlZCF8i").is_ok());
/// assert!(ProductId::parse("").is_err());
/// assert!(ProductId::parse("two words").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Maximum length of a product identifier.
    pub const MAX_LENGTH: usize = 64;

    /// Wrap an identifier without validating it.
    ///
    /// Use this for identifiers that come from the catalog or the backend.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a `ProductId` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 64 characters, or
    /// contains whitespace or control characters.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let id = Self(s.to_owned());
        id.validate()?;
        Ok(id)
    }

    /// Check that this identifier is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first constraint the identifier violates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::EmptyProductId);
        }

        if self.0.chars().count() > Self::MAX_LENGTH {
            return Err(ValidationError::ProductIdTooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = self
            .0
            .chars()
            .find(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ValidationError::MalformedProductId(c));
        }

        Ok(())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ProductId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
