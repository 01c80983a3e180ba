//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while deciding which secret material authorizes a call.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Only one of access key id / secret key was given on the command line.
    #[error(
        "the credentials can be specified in the credentials file, or both the access key id \
         and the secret key have to be given as command line arguments"
    )]
    MismatchedArgs,

    /// The profile store does not define a required key.
    #[error("credentials file {path} does not define `{key}`")]
    MissingKey {
        /// Profile store path.
        path: PathBuf,
        /// Missing key name.
        key: &'static str,
    },

    /// No home directory, so there is no profile store to fall back to.
    #[error("could not determine the home directory holding the credentials file")]
    NoHomeDirectory,

    /// The profile store could not be read.
    #[error("failed to read credentials file {path}: {source}")]
    ProfileUnreadable {
        /// Profile store path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid command arguments.
    #[error("{0}")]
    Usage(String),

    /// Credential resolution failed.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The identity or token service rejected a request.
    #[error("error occurred during {operation}: {message}")]
    Service {
        /// Operation name, e.g. `CreateUser`.
        operation: &'static str,
        /// Diagnostic returned by the transport.
        message: String,
    },

    /// The account bootstrap request failed.
    #[error("account creation failed: {0}")]
    Transport(String),

    /// The server answered with a payload that could not be interpreted.
    #[error("unexpected response: {0}")]
    ResponseParse(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CliError {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Creates a service error for the given operation.
    pub fn service(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Service {
            operation,
            message: message.into(),
        }
    }

    /// Returns `true` when the error must terminate the process with a
    /// nonzero status.
    ///
    /// Remote failures are reported and the run still succeeds; local
    /// argument, credential and configuration failures abort.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::Service { .. } | Self::Transport(_) | Self::ResponseParse(_)
        )
    }
}

impl From<quick_xml::Error> for CliError {
    fn from(err: quick_xml::Error) -> Self {
        Self::ResponseParse(err.to_string())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_are_not_fatal() {
        assert!(!CliError::service("CreateUser", "denied").is_fatal());
        assert!(!CliError::Transport("connection refused".to_string()).is_fatal());
        assert!(!CliError::ResponseParse("no RootUserName".to_string()).is_fatal());
    }

    #[test]
    fn local_failures_are_fatal() {
        assert!(CliError::usage("User name missing.").is_fatal());
        assert!(CliError::from(CredentialError::MismatchedArgs).is_fatal());
        assert!(CliError::Config("bad toml".to_string()).is_fatal());
    }

    #[test]
    fn service_error_names_the_operation() {
        let err = CliError::service("DeleteUser", "NoSuchEntity");
        assert_eq!(err.to_string(), "error occurred during DeleteUser: NoSuchEntity");
    }
}
