//! Error handling for the bitsum library
//!
//! All failures are reported synchronously to the immediate caller as typed
//! errors; nothing is retried internally and out-of-bounds inputs are never
//! clamped.

use thiserror::Error;

/// Main error type for the bitsum library
#[derive(Error, Debug)]
pub enum BitsumError {
    /// Index out of bounds access
    #[error("out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// A composed range (start + length) overruns the owning buffer.
    ///
    /// Reported distinctly from [`BitsumError::OutOfBounds`] because the
    /// failure is about the region as a whole, not a single scalar index.
    #[error("range out of bounds: [{start}, {end}) exceeds size {size}")]
    RangeOutOfBounds {
        /// Start of the requested range
        start: usize,
        /// Exclusive end of the requested range
        end: usize,
        /// The valid size/length
        size: usize,
    },

    /// Invalid argument value or combination
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument
        message: String,
    },

    /// Memory allocation failures
    #[error("memory allocation failed: requested {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested
        size: usize,
    },
}

impl BitsumError {
    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create a range out of bounds error
    pub fn range_out_of_bounds(start: usize, end: usize, size: usize) -> Self {
        Self::RangeOutOfBounds { start, end, size }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an out of memory error
    pub fn out_of_memory(size: usize) -> Self {
        Self::OutOfMemory { size }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "bounds",
            Self::RangeOutOfBounds { .. } => "range",
            Self::InvalidArgument { .. } => "argument",
            Self::OutOfMemory { .. } => "memory",
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::OutOfMemory { .. } => true,
            Self::OutOfBounds { .. } => false,
            Self::RangeOutOfBounds { .. } => false,
            Self::InvalidArgument { .. } => false,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BitsumError>;

/// Assert that an index is within bounds
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(BitsumError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}

/// Assert that the range `[start, start + length)` fits within `size`
#[inline]
pub fn check_range(start: usize, length: usize, size: usize) -> Result<()> {
    let end = start
        .checked_add(length)
        .ok_or_else(|| BitsumError::invalid_argument("range length overflows usize"))?;
    if end > size {
        Err(BitsumError::range_out_of_bounds(start, end, size))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = BitsumError::out_of_bounds(10, 5);
        assert_eq!(err.category(), "bounds");
        assert!(!err.is_recoverable());

        let err = BitsumError::invalid_argument("weight must be positive");
        assert_eq!(err.category(), "argument");
    }

    #[test]
    fn test_bounds_checking() {
        assert!(check_bounds(5, 10).is_ok());
        assert!(check_bounds(10, 10).is_err());
        assert!(check_bounds(0, 0).is_err());
    }

    #[test]
    fn test_range_checking() {
        assert!(check_range(2, 6, 10).is_ok());
        assert!(check_range(2, 8, 10).is_ok());
        assert!(check_range(2, 9, 10).is_err());
        assert!(check_range(10, 0, 10).is_ok());
        assert!(check_range(usize::MAX, 2, 10).is_err());
    }

    #[test]
    fn test_range_error_is_distinct_from_scalar() {
        let err = check_range(4, 10, 8).unwrap_err();
        assert!(matches!(err, BitsumError::RangeOutOfBounds { .. }));
        assert_eq!(err.category(), "range");

        let err = check_bounds(9, 8).unwrap_err();
        assert!(matches!(err, BitsumError::OutOfBounds { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = BitsumError::range_out_of_bounds(3, 12, 8);
        let display = format!("{}", err);
        assert!(display.contains("[3, 12)"));
        assert!(display.contains("8"));

        let err = BitsumError::out_of_memory(1024);
        assert!(format!("{}", err).contains("1024"));
        assert!(err.is_recoverable());
    }
}
