use std::error;
use std::fmt;

/// Error raised while building a [`crate::Grammar`].
///
/// Token rejections during recognition are not errors; they are the `false`
/// return of [`crate::Recognizer::pulse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The rules handed to the builder do not form a usable grammar.
    ValidationError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ValidationError(reason) => write!(f, "invalid grammar: {reason}"),
        }
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let error = Error::ValidationError(String::from("no start symbol"));
        assert_eq!(error.to_string(), "invalid grammar: no start symbol");
    }
}
