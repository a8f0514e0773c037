//! Unified error type for the keypool-lib crate.
//!
//! [`KeypoolError`] wraps the encoding layer's [`ParseComboError`] and
//! domain-specific error kinds (`Io`, `Config`). `From` impls allow `?` to
//! propagate across module boundaries seamlessly.

use std::fmt;

use crate::combo::ParseComboError;

/// Unified error type for keypool-lib operations.
#[derive(Debug)]
pub enum KeypoolError {
    /// Combination string parse error.
    Parse(ParseComboError),
    /// Standard I/O error (config read/write).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
}

impl fmt::Display for KeypoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeypoolError::Parse(e) => write!(f, "Combination error: {e}"),
            KeypoolError::Io(e) => write!(f, "I/O error: {e}"),
            KeypoolError::Config(e) => write!(f, "Config error: {e}"),
        }
    }
}

impl std::error::Error for KeypoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KeypoolError::Parse(e) => Some(e),
            KeypoolError::Io(e) => Some(e),
            KeypoolError::Config(_) => None,
        }
    }
}

impl From<ParseComboError> for KeypoolError {
    fn from(e: ParseComboError) -> Self {
        KeypoolError::Parse(e)
    }
}

impl From<std::io::Error> for KeypoolError {
    fn from(e: std::io::Error) -> Self {
        KeypoolError::Io(e)
    }
}

/// Crate-level Result alias using [`KeypoolError`].
pub type Result<T> = std::result::Result<T, KeypoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parse_error() {
        let e: KeypoolError = ParseComboError::Empty.into();
        assert!(matches!(e, KeypoolError::Parse(ParseComboError::Empty)));
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: KeypoolError = io_err.into();
        assert!(matches!(e, KeypoolError::Io(_)));
    }

    #[test]
    fn display_parse_error() {
        let e = KeypoolError::Parse(ParseComboError::NoTriggerKey);
        assert_eq!(
            e.to_string(),
            "Combination error: combination has no trigger key"
        );
    }

    #[test]
    fn display_config_error() {
        let e = KeypoolError::Config("duplicate binding".into());
        assert_eq!(e.to_string(), "Config error: duplicate binding");
    }

    #[test]
    fn source_chains_parse_error() {
        let e = KeypoolError::Parse(ParseComboError::UnknownToken("Esc".into()));
        let source = std::error::Error::source(&e).unwrap();
        assert!(source.to_string().contains("Esc"));
    }

    #[test]
    fn source_none_for_config() {
        let e = KeypoolError::Config("test".into());
        assert!(std::error::Error::source(&e).is_none());
    }

    #[test]
    fn question_mark_propagation_parse_to_keypool() {
        fn inner() -> std::result::Result<(), ParseComboError> {
            Err(ParseComboError::Empty)
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }
        let err = outer().unwrap_err();
        assert!(matches!(err, KeypoolError::Parse(ParseComboError::Empty)));
    }
}
