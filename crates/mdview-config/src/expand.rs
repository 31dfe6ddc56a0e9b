//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Values without `${` are returned unchanged, so a literal `$` in a URL
/// survives.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| -> Result<Option<String>, UnsetVar> {
        std::env::var(name).map(Some).map_err(|_| UnsetVar {
            name: name.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", err.cause.name),
    })
}

/// Variable referenced without a default and absent from the environment.
struct UnsetVar {
    name: String,
}
