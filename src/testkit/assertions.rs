//! Assertion macros for remapping results.

/// Asserts that a result failed with a structural violation and returns
/// the error message.
///
/// # Example
///
/// ```rust
/// use mixin_remap::assert_structural;
/// use mixin_remap::errors::RemapError;
///
/// let result: Result<(), RemapError> = Err(RemapError::illegal("torn"));
/// let message = assert_structural!(result);
/// assert_eq!(message, "torn");
/// ```
#[macro_export]
macro_rules! assert_structural {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!(
                "Expected an illegal mixin error, got Ok: {:?}\n  at {}:{}:{}",
                value,
                file!(),
                line!(),
                column!()
            ),
            Err($crate::errors::RemapError::IllegalMixin(message)) => message,
            Err(other) => panic!(
                "Expected an illegal mixin error, got: {}\n  at {}:{}:{}",
                other,
                file!(),
                line!(),
                column!()
            ),
        }
    };
}

/// Asserts that a result failed through the diagnostics policy and returns
/// the error message.
#[macro_export]
macro_rules! assert_missing_feature {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!(
                "Expected a missing feature error, got Ok: {:?}\n  at {}:{}:{}",
                value,
                file!(),
                line!(),
                column!()
            ),
            Err($crate::errors::RemapError::MissingFeature(message)) => message,
            Err(other) => panic!(
                "Expected a missing feature error, got: {}\n  at {}:{}:{}",
                other,
                file!(),
                line!(),
                column!()
            ),
        }
    };
}
