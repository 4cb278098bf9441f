//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(expand_env("100%", "pdf.width").unwrap(), "100%");
    }

    #[test]
    fn test_default_used_when_unset() {
        assert_eq!(
            expand_env("${DW_TEST_SURELY_UNSET_VAR:-480}", "pdf.height").unwrap(),
            "480"
        );
    }

    #[test]
    fn test_unset_variable_is_error() {
        let err = expand_env("${DW_TEST_SURELY_UNSET_VAR}", "pdf.height").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Environment variable error in pdf.height: ${DW_TEST_SURELY_UNSET_VAR} not set"
        );
    }
}
