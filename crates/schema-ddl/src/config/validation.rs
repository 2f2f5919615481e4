//! Configuration validation.

use super::Config;
use crate::core::traits::DialectKind;
use crate::error::Result;

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    DialectKind::from_name(&config.dialect)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DdlError;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_dialect_aliases_accepted() {
        for name in ["exa", "PostgreSQL", "gp", "mariadb"] {
            let config = Config {
                dialect: name.to_string(),
                ..Config::default()
            };
            assert!(validate(&config).is_ok(), "{} should be accepted", name);
        }
    }

    #[test]
    fn test_unknown_dialect_rejected() {
        let config = Config {
            dialect: "oracle".to_string(),
            ..Config::default()
        };
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, DdlError::Config(_)));
        assert!(err.to_string().contains("oracle"));
    }
}
