//! core::config::schema
//!
//! Configuration file schema.
//!
//! The same schema is used at both scopes (global and repo).
//!
//! # Validation
//!
//! Config values are validated after parsing: the separator must be
//! non-empty and free of whitespace and control characters, since it ends
//! up inside a version string.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// One configuration file.
///
/// # Example
///
/// ```toml
/// separator = "-"
/// ignore_unclean_tag = false
/// ci = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Joins the identifier parts (`v1.0.4-1-5227b593`)
    pub separator: Option<String>,

    /// Print only the tag name even when HEAD is past the tag
    pub ignore_unclean_tag: Option<bool>,

    /// Honor CI environment variables
    pub ci: Option<bool>,
}

impl ConfigFile {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(separator) = &self.separator {
            if separator.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "separator cannot be empty".into(),
                ));
            }
            if separator
                .chars()
                .any(|c| c.is_whitespace() || c.is_control())
            {
                return Err(ConfigError::InvalidValue(format!(
                    "separator {separator:?} cannot contain whitespace"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full() {
        let config: ConfigFile = toml::from_str(
            r#"
            separator = "."
            ignore_unclean_tag = true
            ci = false
            "#,
        )
        .unwrap();

        assert_eq!(config.separator.as_deref(), Some("."));
        assert_eq!(config.ignore_unclean_tag, Some(true));
        assert_eq!(config.ci, Some(false));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_empty() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(toml::from_str::<ConfigFile>("abbrev = 12").is_err());
    }

    #[test]
    fn bad_separators_rejected() {
        for bad in ["", " ", "-\n"] {
            let config = ConfigFile {
                separator: Some(bad.to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{bad:?} accepted");
        }
    }
}
