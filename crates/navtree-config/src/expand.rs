//! `${VAR}` expansion for configuration strings.
//!
//! - `${VAR}` expands to the value of VAR, errors if unset
//! - `${VAR:-default}` expands to VAR if set, otherwise to `default`
//!
//! Strings without `${` are returned untouched, so a literal `$` in a URL or
//! a logo path never needs escaping.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// `field` is the dotted config key reported when a variable is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

/// Expand an optional field in place.
pub(crate) fn expand_optional(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(current) = value.as_deref() {
        *value = Some(expand_env(current, field)?);
    }
    Ok(())
}
