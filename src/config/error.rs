//! Errors raised while loading or checking `folio.toml`.

use std::{fmt::Display, path::PathBuf};
use thiserror::Error;

/// Why `folio.toml` could not become a [`SiteConfig`](super::SiteConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// Bad TOML syntax, a wrongly typed value or an unknown key.
    #[error("folio.toml does not parse")]
    Toml(#[from] toml::de::Error),

    /// Parsed fine, but a setting is out of range.
    #[error("invalid setting {0}")]
    Validation(String),
}

impl ConfigError {
    /// `[section.key] reason`
    pub fn invalid(key: &str, reason: impl Display) -> Self {
        Self::Validation(format!("[{key}] {reason}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_unreadable_file_names_path() {
        let err = ConfigError::Io(
            PathBuf::from("site/folio.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "cannot read `site/folio.toml`");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_names_key() {
        let err = ConfigError::invalid("hero.lines", "entry 2 must have speed > 0");
        assert_eq!(err.to_string(), "invalid setting [hero.lines] entry 2 must have speed > 0");
    }

    #[test]
    fn test_toml_error_converts() {
        let err: ConfigError = toml::from_str::<toml::Table>("[base").unwrap_err().into();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
