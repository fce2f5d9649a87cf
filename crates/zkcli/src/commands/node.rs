//! Node commands: `create`, `delete`, `ls`, `get` and `set`.

use std::io::Write;

use tracing::debug;

use super::lenient_i32;
use crate::acl::anyone_all;
use crate::error::{ArgumentError, ShellError};
use crate::output::{BracketList, Report, StatusReport};
use crate::session::{CreateMode, Session, ANY_VERSION};

/// Arguments of `create [-s|-e] <path> <data> [acl]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    /// Creation mode selected by the flag, ephemeral when absent.
    pub mode: CreateMode,
    /// Node path.
    pub path: String,
    /// Payload.
    pub data: String,
    /// Reserved ACL token. Accepted but not applied.
    pub acl: Option<String>,
}

impl CreateArgs {
    /// Parses `create` arguments.
    ///
    /// # Errors
    ///
    /// Returns an arity error when path or data is missing.
    pub fn parse(args: &[&str]) -> Result<Self, ArgumentError> {
        if args.len() < 2 {
            return Err(ArgumentError::arity(args));
        }
        let (mode, rest) = match args {
            ["-s", rest @ ..] => (CreateMode::PersistentSequential, rest),
            ["-e", rest @ ..] => (CreateMode::Ephemeral, rest),
            _ => (CreateMode::Ephemeral, args),
        };
        match rest {
            [path, data] => Ok(Self {
                mode,
                path: (*path).to_string(),
                data: (*data).to_string(),
                acl: None,
            }),
            [path, data, acl, ..] => Ok(Self {
                mode,
                path: (*path).to_string(),
                data: (*data).to_string(),
                acl: Some((*acl).to_string()),
            }),
            _ => Err(ArgumentError::arity(rest)),
        }
    }
}

/// Arguments of `delete <path> [version]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteArgs {
    /// Node path.
    pub path: String,
    /// Expected version, [`ANY_VERSION`] to skip the check.
    pub version: i32,
}

impl DeleteArgs {
    /// Parses `delete` arguments. The version is only read when it is the
    /// last of exactly two tokens.
    ///
    /// # Errors
    ///
    /// Returns an arity error when the path is missing.
    pub fn parse(args: &[&str]) -> Result<Self, ArgumentError> {
        match args {
            [] => Err(ArgumentError::arity(args)),
            [path, version] => Ok(Self {
                path: (*path).to_string(),
                version: lenient_i32(version),
            }),
            [path, ..] => Ok(Self {
                path: (*path).to_string(),
                version: ANY_VERSION,
            }),
        }
    }
}

/// Arguments of the single-path verbs `ls`, `get` and `getAcl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathArgs {
    /// Node path.
    pub path: String,
}

impl PathArgs {
    /// Parses a single path argument; extra tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns an arity error when the path is missing.
    pub fn parse(args: &[&str]) -> Result<Self, ArgumentError> {
        match args.first() {
            Some(path) => Ok(Self {
                path: (*path).to_string(),
            }),
            None => Err(ArgumentError::arity(args)),
        }
    }
}

/// Arguments of `set <path> <data> [version]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetArgs {
    /// Node path.
    pub path: String,
    /// New payload.
    pub data: String,
    /// Expected version, [`ANY_VERSION`] to skip the check.
    pub version: i32,
}

impl SetArgs {
    /// Parses `set` arguments. The version is only read when it is the last
    /// of exactly three tokens.
    ///
    /// # Errors
    ///
    /// Returns an arity error when path or data is missing.
    pub fn parse(args: &[&str]) -> Result<Self, ArgumentError> {
        match args {
            [path, data, version] => Ok(Self {
                path: (*path).to_string(),
                data: (*data).to_string(),
                version: lenient_i32(version),
            }),
            [path, data, ..] => Ok(Self {
                path: (*path).to_string(),
                data: (*data).to_string(),
                version: ANY_VERSION,
            }),
            _ => Err(ArgumentError::arity(args)),
        }
    }
}

pub(super) fn create<S, W>(session: &S, args: &CreateArgs, out: &mut W) -> Result<(), ShellError>
where
    S: Session + ?Sized,
    W: Write,
{
    if let Some(acl) = &args.acl {
        debug!(acl = %acl, "ACL argument to create is not applied");
    }
    let created = session
        .create(&args.path, args.data.as_bytes(), args.mode, &anyone_all())
        .map_err(|err| ShellError::remote("create node error", err))?;
    writeln!(out, "created {created}")?;
    Ok(())
}

pub(super) fn delete<S, W>(session: &S, args: &DeleteArgs, out: &mut W) -> Result<(), ShellError>
where
    S: Session + ?Sized,
    W: Write,
{
    session
        .delete(&args.path, args.version)
        .map_err(|err| ShellError::remote("delete node failed", err))?;
    writeln!(out, "{} deleted", args.path)?;
    Ok(())
}

pub(super) fn list_children<S, W>(
    session: &S,
    args: &PathArgs,
    out: &mut W,
) -> Result<(), ShellError>
where
    S: Session + ?Sized,
    W: Write,
{
    let children = session
        .children(&args.path)
        .map_err(|err| ShellError::remote("get children failed", err))?;
    BracketList(&children).write_report(out)?;
    Ok(())
}

pub(super) fn get<S, W>(session: &S, args: &PathArgs, out: &mut W) -> Result<(), ShellError>
where
    S: Session + ?Sized,
    W: Write,
{
    let (data, stat) = session
        .get_data(&args.path)
        .map_err(|err| ShellError::remote("get node information failed", err))?;
    writeln!(out, "data: {}", String::from_utf8_lossy(&data))?;
    StatusReport::local(&stat).write_report(out)?;
    Ok(())
}

pub(super) fn set<S, W>(session: &S, args: &SetArgs, out: &mut W) -> Result<(), ShellError>
where
    S: Session + ?Sized,
    W: Write,
{
    let stat = session
        .set_data(&args.path, args.data.as_bytes(), args.version)
        .map_err(|err| ShellError::remote("set node data failed", err))?;
    StatusReport::local(&stat).write_report(out)?;
    Ok(())
}
