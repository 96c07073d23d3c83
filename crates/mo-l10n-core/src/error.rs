use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Missing or unrecognized magic, unsupported revision, or undecodable text.
    Format(&'static str),
    /// A declared offset or length points past the end of the buffer.
    Truncated(&'static str),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Format(message) => write!(f, "format error: {message}"),
            CoreError::Truncated(message) => write!(f, "truncated data: {message}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::CoreError;
    use alloc::string::ToString;

    #[test]
    fn display_formats_format() {
        let err = CoreError::Format("magic mismatch");
        assert_eq!(err.to_string(), "format error: magic mismatch");
    }

    #[test]
    fn display_formats_truncated() {
        let err = CoreError::Truncated("string out of bounds");
        assert_eq!(err.to_string(), "truncated data: string out of bounds");
    }
}
