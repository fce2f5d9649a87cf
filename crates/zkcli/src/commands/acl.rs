//! ACL commands: `getAcl` and `setAcl`.

use std::io::Write;

use crate::acl::{parse_acl_spec, AclEntry};
use crate::error::{ArgumentError, ShellError};
use crate::output::{BracketList, Report, StatusReport};
use crate::session::{Session, ANY_VERSION};

use super::PathArgs;

/// Arguments of `setAcl <path> <acl-spec>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAclArgs {
    /// Node path.
    pub path: String,
    /// Entries parsed from the specification.
    pub acl: Vec<AclEntry>,
}

impl SetAclArgs {
    /// Parses `setAcl` arguments.
    ///
    /// # Errors
    ///
    /// Returns an arity error with fewer than two tokens and an ACL error when
    /// the specification does not parse.
    pub fn parse(args: &[&str]) -> Result<Self, ArgumentError> {
        match args {
            [path, spec, ..] => Ok(Self {
                path: (*path).to_string(),
                acl: parse_acl_spec(spec)?,
            }),
            _ => Err(ArgumentError::arity(args)),
        }
    }
}

pub(super) fn get_acl<S, W>(session: &S, args: &PathArgs, out: &mut W) -> Result<(), ShellError>
where
    S: Session + ?Sized,
    W: Write,
{
    let acl = session
        .get_acl(&args.path)
        .map_err(|err| ShellError::remote("getacl failed", err))?;
    BracketList(&acl).write_report(out)?;
    Ok(())
}

pub(super) fn set_acl<S, W>(session: &S, args: &SetAclArgs, out: &mut W) -> Result<(), ShellError>
where
    S: Session + ?Sized,
    W: Write,
{
    let stat = session
        .set_acl(&args.path, &args.acl, ANY_VERSION)
        .map_err(|err| ShellError::remote("setacl failed", err))?;
    StatusReport::local(&stat).write_report(out)?;
    Ok(())
}
