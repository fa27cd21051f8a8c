//! Environment variable expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key and is only used for error reporting.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        let value = expand_env("https://cms.example.com", "cms.base_url").unwrap();

        assert_eq!(value, "https://cms.example.com");
    }

    #[test]
    fn test_default_used_when_unset() {
        let value = expand_env("${WPP_EXPAND_TEST_UNSET:-fallback}", "site.name_en").unwrap();

        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_missing_var_reports_field() {
        let err = expand_env("${WPP_EXPAND_TEST_MISSING}", "cms.password").unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("cms.password"), "got: {msg}");
        assert!(msg.contains("WPP_EXPAND_TEST_MISSING"), "got: {msg}");
    }
}
