//! CLI error types.

use std::error::Error;

use wpp_config::ConfigError;
use wpp_server::StartError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Server(#[from] StartError),
}

/// Format an error with all its sources, outermost first.
pub(crate) fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_error_chain_joins_sources() {
        let err = Outer(std::io::Error::other("inner"));

        assert_eq!(error_chain(&err), "outer: inner");
    }

    #[test]
    fn test_error_chain_single() {
        let err = std::io::Error::other("alone");

        assert_eq!(error_chain(&err), "alone");
    }
}
