//! Command-line invocation: `zkcli [-server host:port]`.

use crate::error::UsageError;

/// Flag naming the server address.
pub const SERVER_FLAG: &str = "-server";

/// Parsed process arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Server named on the command line, if any.
    pub server: Option<String>,
}

impl Invocation {
    /// Parses the arguments that follow the program name. Tokens after the
    /// server address are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::NotEnoughArgs`] for a lone argument and
    /// [`UsageError::Unsupported`] when the first argument is not
    /// `-server`.
    pub fn parse<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(first) = args.next() else {
            return Ok(Self::default());
        };
        let Some(second) = args.next() else {
            return Err(UsageError::NotEnoughArgs);
        };
        if first != SERVER_FLAG {
            return Err(UsageError::Unsupported(first));
        }
        Ok(Self {
            server: Some(second),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn parse(args: &[&str]) -> Result<Invocation, UsageError> {
        Invocation::parse(args.iter().map(|arg| (*arg).to_string()))
    }

    #[test]
    fn no_arguments_uses_configured_server() {
        assert_eq!(parse(&[]), Ok(Invocation { server: None }));
    }

    #[test_case(&["-server", "zk:2181"] ; "exact")]
    #[test_case(&["-server", "zk:2181", "ignored"] ; "trailing tokens")]
    fn server_flag(args: &[&str]) {
        assert_eq!(parse(args).unwrap().server.as_deref(), Some("zk:2181"));
    }

    #[test_case(&["foo"] ; "unknown token")]
    #[test_case(&["-server"] ; "flag without value")]
    fn single_argument_is_not_enough(args: &[&str]) {
        assert_eq!(parse(args), Err(UsageError::NotEnoughArgs));
    }

    #[test]
    fn other_flag_is_unsupported() {
        assert_eq!(
            parse(&["-x", "y"]),
            Err(UsageError::Unsupported("-x".to_string()))
        );
    }

    #[test]
    fn flag_is_case_sensitive() {
        assert!(matches!(
            parse(&["-Server", "zk:2181"]),
            Err(UsageError::Unsupported(_))
        ));
    }
}
