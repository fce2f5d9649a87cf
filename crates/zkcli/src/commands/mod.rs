//! Command parsing and dispatch.
//!
//! A line is split on whitespace; the first token selects a [`Verb`] and the
//! rest are positional arguments passed verbatim. Each verb's module parses
//! its arguments into a typed [`Command`] and runs it against a
//! [`Session`]:
//! - [`node`] - `create`, `delete`, `ls`, `get`, `set`
//! - [`acl`] - `getAcl`, `setAcl`
//! - [`auth`] - `addauth`

pub mod acl;
pub mod auth;
pub mod node;

use std::io::{self, Write};

use tracing::debug;

use crate::error::{ArgumentError, ShellError};
use crate::output::write_help;
use crate::session::Session;

pub use acl::SetAclArgs;
pub use auth::AddAuthArgs;
pub use node::{CreateArgs, DeleteArgs, PathArgs, SetArgs};

/// Verbs understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `create`
    Create,
    /// `delete`
    Delete,
    /// `ls`
    Ls,
    /// `set`
    Set,
    /// `get`
    Get,
    /// `getAcl`
    GetAcl,
    /// `setAcl`
    SetAcl,
    /// `addauth`
    AddAuth,
    /// Anything else, including an empty line.
    Unknown,
}

impl Verb {
    /// Maps a token to its verb. Matching is case-sensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "create" => Self::Create,
            "delete" => Self::Delete,
            "ls" => Self::Ls,
            "set" => Self::Set,
            "get" => Self::Get,
            "getAcl" => Self::GetAcl,
            "setAcl" => Self::SetAcl,
            "addauth" => Self::AddAuth,
            _ => Self::Unknown,
        }
    }
}

/// A validated command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a node.
    Create(CreateArgs),
    /// Delete a node.
    Delete(DeleteArgs),
    /// List children.
    Ls(PathArgs),
    /// Read data and status.
    Get(PathArgs),
    /// Write data.
    Set(SetArgs),
    /// Read the ACL.
    GetAcl(PathArgs),
    /// Replace the ACL.
    SetAcl(SetAclArgs),
    /// Add an authentication credential.
    AddAuth(AddAuthArgs),
    /// Print the help text.
    Help,
}

impl Command {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] when the arguments do not fit the verb.
    pub fn parse(line: &str) -> Result<Self, ArgumentError> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().map_or(Verb::Unknown, Verb::from_token);
        let args: Vec<&str> = tokens.collect();
        Self::from_parts(verb, &args)
    }

    fn from_parts(verb: Verb, args: &[&str]) -> Result<Self, ArgumentError> {
        match verb {
            Verb::Create => CreateArgs::parse(args).map(Self::Create),
            Verb::Delete => DeleteArgs::parse(args).map(Self::Delete),
            Verb::Ls => PathArgs::parse(args).map(Self::Ls),
            Verb::Get => PathArgs::parse(args).map(Self::Get),
            Verb::Set => SetArgs::parse(args).map(Self::Set),
            Verb::GetAcl => PathArgs::parse(args).map(Self::GetAcl),
            Verb::SetAcl => SetAclArgs::parse(args).map(Self::SetAcl),
            Verb::AddAuth => AddAuthArgs::parse(args).map(Self::AddAuth),
            Verb::Unknown => Ok(Self::Help),
        }
    }
}

/// Runs a parsed command.
///
/// # Errors
///
/// Returns [`ShellError::Remote`] when the session call fails and
/// [`ShellError::Io`] when writing the result fails.
pub fn execute<S, W>(session: &S, command: &Command, out: &mut W) -> Result<(), ShellError>
where
    S: Session + ?Sized,
    W: Write,
{
    match command {
        Command::Create(args) => node::create(session, args, out),
        Command::Delete(args) => node::delete(session, args, out),
        Command::Ls(args) => node::list_children(session, args, out),
        Command::Get(args) => node::get(session, args, out),
        Command::Set(args) => node::set(session, args, out),
        Command::GetAcl(args) => acl::get_acl(session, args, out),
        Command::SetAcl(args) => acl::set_acl(session, args, out),
        Command::AddAuth(args) => auth::add_auth(session, args, out),
        Command::Help => write_help(out).map_err(ShellError::from),
    }
}

/// Parses and runs one line, reporting command failures on `out`.
///
/// Argument and session errors are printed and swallowed so the REPL keeps
/// going.
///
/// # Errors
///
/// Only IO errors on `out` are returned.
pub fn dispatch<S, W>(session: &S, line: &str, out: &mut W) -> io::Result<()>
where
    S: Session + ?Sized,
    W: Write,
{
    let result = Command::parse(line)
        .map_err(ShellError::from)
        .and_then(|command| {
            debug!(?command, "dispatching");
            execute(session, &command, out)
        });

    match result {
        Ok(()) => Ok(()),
        Err(ShellError::Io(err)) => Err(err),
        Err(err) => {
            debug!(line, error = %err, "command failed");
            writeln!(out, "{err}")
        }
    }
}

/// Parses a version token.
///
/// Out-of-range integers clamp to the `i32` bounds and anything that is not
/// a base-10 integer becomes `0`, so `delete /x abc` deletes version 0.
#[must_use]
pub fn lenient_i32(token: &str) -> i32 {
    if let Ok(value) = token.parse::<i32>() {
        return value;
    }
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let is_integer = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    match (is_integer, negative) {
        (true, true) => i32::MIN,
        (true, false) => i32::MAX,
        (false, _) => 0,
    }
}
