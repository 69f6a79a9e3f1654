//! Result type alias for Patient Track
//!
//! This module provides a convenient Result type alias that uses TrackError
//! as the error type.

use super::errors::TrackError;

/// Result type alias for Patient Track operations
///
/// # Examples
///
/// ```
/// use patient_track::domain::result::Result;
/// use patient_track::domain::errors::TrackError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TrackError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ApiError, TrackError};

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(TrackError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> std::result::Result<i32, ApiError> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
