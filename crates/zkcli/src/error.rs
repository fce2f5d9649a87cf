//! Error types for the shell.
//!
//! Command errors come in two kinds, [`ArgumentError`] for local validation
//! failures and [`RemoteError`] for failed session calls. Both are reported
//! to the user and never end the REPL. [`CliError`] covers the process-level
//! failures that stop the program before or after the REPL runs.

use std::io;

use thiserror::Error;

/// A command line failed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Wrong number of arguments for the verb.
    #[error("arg invalid: [{}]", .args.join(" "))]
    Arity {
        /// The arguments that were supplied, verb excluded.
        args: Vec<String>,
    },

    /// The ACL specification did not match the grammar.
    #[error("make acl failed: args invalid: {spec}")]
    AclSpec {
        /// The rejected specification.
        spec: String,
    },
}

impl ArgumentError {
    /// Builds an arity error from raw argument tokens.
    pub fn arity(args: &[&str]) -> Self {
        Self::Arity {
            args: args.iter().map(|arg| (*arg).to_string()).collect(),
        }
    }

    /// Builds an ACL grammar error.
    pub fn acl_spec(spec: &str) -> Self {
        Self::AclSpec {
            spec: spec.to_string(),
        }
    }
}

/// A call against the coordination service failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    message: String,
}

impl RemoteError {
    /// Wraps the message reported by the client library.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of a single REPL command.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Local validation failed.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// The session call failed.
    #[error("{context}: {source}")]
    Remote {
        /// Short prefix naming the failed operation.
        context: &'static str,
        /// Error reported by the session.
        source: RemoteError,
    },

    /// Writing the result failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Attaches a context prefix to a session error.
    pub const fn remote(context: &'static str, source: RemoteError) -> Self {
        Self::Remote { context, source }
    }
}

/// Invalid process invocation. The message doubles as the usage hint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// A single argument was supplied.
    #[error("args not enough. try -server host:port")]
    NotEnoughArgs,

    /// The first argument is not `-server`.
    #[error("unsupport command. try -server host:port")]
    Unsupported(String),
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Server address resolved to an empty string.
    #[error("server address cannot be empty")]
    EmptyServer,

    /// Session timeout is not a positive number of milliseconds.
    #[error("invalid session timeout '{value}': expected a positive number of milliseconds")]
    InvalidTimeout {
        /// Raw value.
        value: String,
    },

    /// An environment variable could not be parsed.
    #[error("{0}")]
    Environment(String),
}

/// Process-level errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid invocation.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The initial connection failed.
    #[error("connect to {address} failed. error: {source}")]
    Connect {
        /// Address that was dialled.
        address: String,
        /// Error reported by the client library.
        source: RemoteError,
    },

    /// The event listener runtime could not be started.
    #[error("failed to start event runtime: {0}")]
    Runtime(io::Error),

    /// Terminal IO failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_error_lists_arguments() {
        let err = ArgumentError::arity(&["/a"]);
        assert_eq!(err.to_string(), "arg invalid: [/a]");
    }

    #[test]
    fn arity_error_with_no_arguments() {
        let err = ArgumentError::arity(&[]);
        assert_eq!(err.to_string(), "arg invalid: []");
    }

    #[test]
    fn acl_spec_error_names_spec() {
        let err = ArgumentError::acl_spec("bogus:x");
        assert_eq!(err.to_string(), "make acl failed: args invalid: bogus:x");
    }

    #[test]
    fn remote_error_carries_context() {
        let err = ShellError::remote("delete node failed", RemoteError::new("NoNode"));
        assert_eq!(err.to_string(), "delete node failed: NoNode");
    }

    #[test]
    fn argument_error_is_transparent() {
        let err = ShellError::from(ArgumentError::arity(&["x"]));
        assert_eq!(err.to_string(), "arg invalid: [x]");
    }

    #[test]
    fn connect_error_display() {
        let err = CliError::Connect {
            address: "127.0.0.1:2181".into(),
            source: RemoteError::new("ConnectionLoss"),
        };
        assert_eq!(
            err.to_string(),
            "connect to 127.0.0.1:2181 failed. error: ConnectionLoss"
        );
    }

    #[test]
    fn usage_errors_are_hints() {
        assert_eq!(
            UsageError::NotEnoughArgs.to_string(),
            "args not enough. try -server host:port"
        );
        assert_eq!(
            UsageError::Unsupported("-x".into()).to_string(),
            "unsupport command. try -server host:port"
        );
    }

    #[test]
    fn cli_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        let cli_err = CliError::from(io_err);
        assert!(matches!(cli_err, CliError::Io(_)));
    }
}
