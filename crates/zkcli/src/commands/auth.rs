//! `addauth <scheme> <credential>`.

use std::io::Write;

use crate::error::{ArgumentError, ShellError};
use crate::session::Session;

/// Arguments of `addauth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAuthArgs {
    /// Authentication scheme, for example `digest`.
    pub scheme: String,
    /// Scheme-specific credential, sent as raw bytes.
    pub credential: String,
}

impl AddAuthArgs {
    /// Parses `addauth` arguments.
    ///
    /// # Errors
    ///
    /// Returns an arity error with fewer than two tokens.
    pub fn parse(args: &[&str]) -> Result<Self, ArgumentError> {
        match args {
            [scheme, credential, ..] => Ok(Self {
                scheme: (*scheme).to_string(),
                credential: (*credential).to_string(),
            }),
            _ => Err(ArgumentError::arity(args)),
        }
    }
}

/// Prints nothing on success.
pub(super) fn add_auth<S, W>(session: &S, args: &AddAuthArgs, _out: &mut W) -> Result<(), ShellError>
where
    S: Session + ?Sized,
    W: Write,
{
    session
        .add_auth(&args.scheme, args.credential.as_bytes())
        .map_err(|err| ShellError::remote("add auth failed", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::dispatch;
    use crate::testing::{capture, Call, RecordingSession};

    #[test]
    fn add_auth_sends_credential_bytes() {
        let session = RecordingSession::new();
        let out = capture(|out| dispatch(&session, "addauth digest alice:secret", out).unwrap());
        assert_eq!(out, "");
        assert_eq!(
            session.calls(),
            vec![Call::AddAuth {
                scheme: "digest".into(),
                credential: b"alice:secret".to_vec(),
            }]
        );
    }

    #[test]
    fn add_auth_requires_credential() {
        assert!(matches!(
            AddAuthArgs::parse(&["digest"]),
            Err(ArgumentError::Arity { .. })
        ));
    }

    #[test]
    fn rejected_credential_is_reported() {
        let session = RecordingSession::failing("AuthFailed");
        let out = capture(|out| dispatch(&session, "addauth digest bad", out).unwrap());
        assert_eq!(out, "add auth failed: AuthFailed\n");
    }
}
