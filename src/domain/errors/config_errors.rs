use thiserror::Error;

/// Errors raised while validating adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("required option `{name}` is missing or blank")]
    MissingOption { name: &'static str },
}
