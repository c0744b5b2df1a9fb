//! Argument validation.

/// A tool argument that is required but missing or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `recipient` is empty.
    EmptyRecipient,
    /// `email` is empty.
    EmptyEmail,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyRecipient => "recipient is required",
            Self::EmptyEmail => "email is required",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyRecipient => "recipient",
            Self::EmptyEmail => "email",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Rejects an empty or whitespace-only value.
///
/// # Errors
///
/// Returns `error` if `value` has no visible characters.
pub fn require(value: &str, error: ValidationError) -> Result<&str, ValidationError> {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(value)
    }
}
