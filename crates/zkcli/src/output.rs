//! Output formatting for shell commands.
//!
//! Every layout here is scraped by scripts, so field names, order and
//! number formatting are fixed.

use std::fmt::Display;
use std::io::{self, Write};

use chrono::{DateTime, Local, TimeZone};

use crate::session::NodeStat;

/// Help block printed for unknown verbs.
///
/// Several listed verbs are not implemented by the dispatcher.
pub const HELP_TEXT: &str = "ZooKeeper -server host:port cmd args
\tstat path [watch]
\tset path data [version]
\tls path [watch]
\tdelquota [-n|-b] path
\tls2 path [watch]
\tsetAcl path acl
\tsetquota -n|-b val path
\thistory
\tredo cmdno
\tprintwatches on|off
\tdelete path [version]
\tsync path
\tlistquota path
\trmr path
\tget path [watch]
\tcreate [-s] [-e] path data acl
\taddauth scheme auth
\tquit
\tgetAcl path
\tclose
\tconnect host:port";

/// Trait for values with a fixed human-readable layout.
pub trait Report {
    /// Write the value in its report layout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()>;
}

/// Writes [`HELP_TEXT`] followed by a newline.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_help<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{HELP_TEXT}")
}

/// Formats a counter as `%02x` does: lowercase, at least two characters,
/// sign before the digits.
#[must_use]
pub fn hex(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let width = 2 - sign.len();
    format!("{sign}{:0>width$x}", value.unsigned_abs())
}

/// Renders epoch milliseconds in `zone`.
///
/// Values outside the representable range fall back to the raw number.
pub fn timestamp<Tz>(millis: i64, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |utc| {
            utc.with_timezone(zone)
                .format("%Y-%m-%d %H:%M:%S%.f %z")
                .to_string()
        },
    )
}

/// Node status report.
#[derive(Debug, Clone)]
pub struct StatusReport<'a, Tz: TimeZone> {
    stat: &'a NodeStat,
    zone: Tz,
}

impl<'a> StatusReport<'a, Local> {
    /// Report with timestamps in the local zone.
    #[must_use]
    pub const fn local(stat: &'a NodeStat) -> Self {
        Self { stat, zone: Local }
    }
}

impl<'a, Tz: TimeZone> StatusReport<'a, Tz> {
    /// Report with timestamps in `zone`.
    #[must_use]
    pub fn in_zone(stat: &'a NodeStat, zone: Tz) -> Self {
        Self { stat, zone }
    }
}

impl<Tz> Report for StatusReport<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let stat = self.stat;
        writeln!(writer, "dataLength = {}", stat.data_length)?;
        writeln!(writer, "cZxid = 0x{}", hex(stat.czxid))?;
        writeln!(writer, "ctime = {}", timestamp(stat.ctime, &self.zone))?;
        writeln!(writer, "mZxid = 0x{}", hex(stat.mzxid))?;
        writeln!(writer, "mtime = {}", timestamp(stat.mtime, &self.zone))?;
        writeln!(writer, "pZxid = 0x{}", hex(stat.pzxid))?;
        writeln!(writer, "cversion = 0x{}", hex(i64::from(stat.cversion)))?;
        writeln!(writer, "dataversion = 0x{}", hex(i64::from(stat.version)))?;
        writeln!(writer, "aclVersion = 0x{}", hex(i64::from(stat.aversion)))?;
        writeln!(writer, "ephemeralOwner = 0x{}", hex(stat.ephemeral_owner))?;
        writeln!(writer, "numChildren = {}", stat.num_children)?;
        Ok(())
    }
}

/// Bracketed, space-separated list: `[a b c]`.
#[derive(Debug, Clone, Copy)]
pub struct BracketList<'a, T>(pub &'a [T]);

impl<T: Display> Report for BracketList<'_, T> {
    fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "[")?;
        for (index, item) in self.0.iter().enumerate() {
            if index > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{item}")?;
        }
        writeln!(writer, "]")
    }
}
