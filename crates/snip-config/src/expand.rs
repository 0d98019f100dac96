//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Only the braced form is recognized; a string without `${` is returned
/// as-is, so bare `$` characters survive untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SNIP_TEST_SITE_NAME", "Recipes");
        }
        let result = expand_env("${SNIP_TEST_SITE_NAME} docs", "site.title").unwrap();
        assert_eq!(result, "Recipes docs");
        unsafe {
            std::env::remove_var("SNIP_TEST_SITE_NAME");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SNIP_TEST_UNSET_OUT");
        }
        let result = expand_env("${SNIP_TEST_UNSET_OUT:-public}", "build.output_dir").unwrap();
        assert_eq!(result, "public");
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SNIP_TEST_MISSING");
        }
        let err = expand_env("${SNIP_TEST_MISSING}", "site.title").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("SNIP_TEST_MISSING"));
        assert!(message.contains("site.title"));
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        assert_eq!(expand_env("Price $5", "site.title").unwrap(), "Price $5");
    }
}
