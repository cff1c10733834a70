//! Result type alias for sensorhub

use super::errors::SensorHubError;

/// Result type alias for sensorhub operations
///
/// # Examples
///
/// ```
/// use sensorhub::domain::result::Result;
/// use sensorhub::domain::errors::SensorHubError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SensorHubError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SensorHubError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StoreError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_store_error_propagates_with_question_mark() {
        fn inner() -> std::result::Result<(), StoreError> {
            Err(StoreError::Write("duplicate key".to_string()))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
