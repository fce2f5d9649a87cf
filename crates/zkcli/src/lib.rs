//! # zkcli
//!
//! Interactive command shell for a ZooKeeper-style coordination service.
//!
//! Reads one command per line, performs a single remote call per command
//! and prints the result in a fixed human-readable layout:
//! - Node management: `create`, `delete`, `ls`, `get`, `set`
//! - Access control: `getAcl`, `setAcl`, `addauth`
//!
//! # Architecture
//!
//! ```text
//! stdin ──► shell::run ──► commands::dispatch ──► Session ──► zk::ZkSession
//!                               │                                   │
//!                               ▼                                   ▼
//!                          output (stdout)                 events::EventListener
//! ```
//!
//! Handlers only see the [`Session`] trait. [`zk::ZkSession`] implements it
//! on top of the `zookeeper` crate, and session notifications flow through
//! a channel to a background [`events::EventListener`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod acl;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod invocation;
pub mod output;
pub mod session;
pub mod shell;
pub mod zk;

#[cfg(test)]
mod testing;

pub use acl::{AclEntry, Perms};
pub use commands::{Command, Verb};
pub use config::ShellConfig;
pub use error::{ArgumentError, CliError, ConfigError, RemoteError, ShellError, UsageError};
pub use invocation::Invocation;
pub use session::{CreateMode, NodeStat, Session};
pub use zk::ZkSession;
