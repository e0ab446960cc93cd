//! Error types for item containers.

/// Result type alias for container operations.
pub type Result<T> = std::result::Result<T, ItemError>;

/// Errors raised by container, row and column operations.
///
/// All of these are detected synchronously and returned to the caller; none
/// are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    /// An index or range argument fell outside `[0, count)`.
    #[error("Index {index} out of range (count {count})")]
    InvalidRange { index: usize, count: usize },

    /// A required argument was absent or empty.
    #[error("Required argument '{0}' is missing")]
    NullArgument(&'static str),

    /// An argument had the right shape but violated a semantic constraint.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A row was targeted for removal while its population callback is running.
    #[error("Cannot remove item with index {index}")]
    IllegalRemovalDuringPopulation { index: usize },

    /// The container or row has been disposed.
    #[error("Widget is disposed")]
    DisposedAccess,
}

impl ItemError {
    /// Create a range error.
    pub fn range(index: usize, count: usize) -> Self {
        Self::InvalidRange { index, count }
    }

    /// Create an invalid argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns `true` if this error means the target no longer exists.
    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::DisposedAccess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ItemError::range(7, 3).to_string(),
            "Index 7 out of range (count 3)"
        );
        assert_eq!(
            ItemError::IllegalRemovalDuringPopulation { index: 2 }.to_string(),
            "Cannot remove item with index 2"
        );
        assert_eq!(
            ItemError::invalid("duplicate column 1").to_string(),
            "Invalid argument: duplicate column 1"
        );
        assert_eq!(
            ItemError::NullArgument("font family").to_string(),
            "Required argument 'font family' is missing"
        );
    }

    #[test]
    fn test_is_disposed() {
        assert!(ItemError::DisposedAccess.is_disposed());
        assert!(!ItemError::range(0, 0).is_disposed());
    }
}
