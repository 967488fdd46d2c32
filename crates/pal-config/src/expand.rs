//! `${VAR}` / `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Variable that could not be resolved during expansion.
struct UnsetVar(String);

/// Expand environment variable references in `value`.
///
/// Only the braced forms are recognised; a bare `$VAR` is left alone so that
/// URLs containing dollar signs survive untouched. `field` names the config
/// key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("PAL_EXPAND_HOST", "docs.example.com");
        }
        let result = expand_env("https://${PAL_EXPAND_HOST}/docs", "site.url").unwrap();
        assert_eq!(result, "https://docs.example.com/docs");
        unsafe {
            std::env::remove_var("PAL_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("PAL_EXPAND_UNSET");
        }
        let result = expand_env("${PAL_EXPAND_UNSET:-https://paljs.com}", "site.url").unwrap();
        assert_eq!(result, "https://paljs.com");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("PAL_EXPAND_MISSING");
        }
        let err = expand_env("${PAL_EXPAND_MISSING}", "docs.source_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("PAL_EXPAND_MISSING"));
        assert!(message.contains("docs.source_dir"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("content", "docs.source_dir").unwrap(), "content");
        assert_eq!(
            expand_env("https://paljs.com/$path", "site.url").unwrap(),
            "https://paljs.com/$path"
        );
    }
}
