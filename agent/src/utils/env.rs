use std::env::var;

/// Get a specific environment variable value. Missing or non-unicode values
/// come back as an empty string
pub(crate) fn get_env_value(key: &str) -> String {
    var(key).unwrap_or_default()
}
