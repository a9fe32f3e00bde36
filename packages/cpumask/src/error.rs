use thiserror::Error;

/// Errors that can occur when converting CPU masks and CPU lists.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller provided a supposed CPU mask or CPU list but it did not match the expected
    /// format.
    #[error("invalid format: '{invalid_value}' is invalid: {problem}")]
    InvalidFormat {
        /// The specific value that was invalid. This may either be the entire input string
        /// or a specific token of it, depending on the problem.
        invalid_value: String,

        /// A human-readable description of the problem.
        problem: String,
    },

    /// The input could not be read in either direction. Both failure reasons are kept so the
    /// caller can see why each reading was rejected.
    #[error("'{input}' is neither a valid CPU mask ({as_mask}) nor a valid CPU list ({as_list})")]
    AmbiguousInput {
        /// The entire input string.
        input: String,

        /// Why the input was rejected as a hexadecimal CPU mask.
        as_mask: Box<Error>,

        /// Why the input was rejected as a CPU list.
        as_list: Box<Error>,
    },
}

impl Error {
    pub(crate) fn invalid_format(
        invalid_value: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            invalid_value: invalid_value.into(),
            problem: problem.into(),
        }
    }
}

/// A specialized `Result` type for cpumask operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
