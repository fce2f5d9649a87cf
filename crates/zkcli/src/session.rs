//! The coordination-service session seen by command handlers.
//!
//! Handlers never talk to the client library directly. They receive a
//! [`Session`] and issue exactly one call per command, which keeps them
//! testable against a recording session.

use crate::acl::AclEntry;
use crate::error::RemoteError;

/// Version argument meaning "skip the version check".
pub const ANY_VERSION: i32 = -1;

/// How a node is created. These are the two modes `create` can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMode {
    /// Deleted when the creating session ends.
    Ephemeral,
    /// Outlives the session, with a server-assigned sequence suffix.
    PersistentSequential,
}

/// Metadata snapshot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeStat {
    /// Transaction id of the create.
    pub czxid: i64,
    /// Transaction id of the last data change.
    pub mzxid: i64,
    /// Creation time, epoch milliseconds.
    pub ctime: i64,
    /// Last modification time, epoch milliseconds.
    pub mtime: i64,
    /// Data version.
    pub version: i32,
    /// Children version.
    pub cversion: i32,
    /// ACL version.
    pub aversion: i32,
    /// Owning session id for ephemeral nodes, zero otherwise.
    pub ephemeral_owner: i64,
    /// Length of the data payload in bytes.
    pub data_length: i32,
    /// Number of children.
    pub num_children: i32,
    /// Transaction id of the last child change.
    pub pzxid: i64,
}

/// Operations the shell issues against the coordination service.
pub trait Session {
    /// Creates a node and returns the path the server assigned.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the service.
    fn create(
        &self,
        path: &str,
        data: &[u8],
        mode: CreateMode,
        acl: &[AclEntry],
    ) -> Result<String, RemoteError>;

    /// Deletes a node. A version of [`ANY_VERSION`] skips the version check.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the service.
    fn delete(&self, path: &str, version: i32) -> Result<(), RemoteError>;

    /// Lists the names of the immediate children of a node.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the service.
    fn children(&self, path: &str) -> Result<Vec<String>, RemoteError>;

    /// Reads a node's payload and status.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the service.
    fn get_data(&self, path: &str) -> Result<(Vec<u8>, NodeStat), RemoteError>;

    /// Replaces a node's payload.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the service.
    fn set_data(&self, path: &str, data: &[u8], version: i32) -> Result<NodeStat, RemoteError>;

    /// Reads a node's ACL.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the service.
    fn get_acl(&self, path: &str) -> Result<Vec<AclEntry>, RemoteError>;

    /// Replaces a node's ACL.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the service.
    fn set_acl(&self, path: &str, acl: &[AclEntry], version: i32) -> Result<NodeStat, RemoteError>;

    /// Adds an authentication credential to the session.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the service.
    fn add_auth(&self, scheme: &str, credential: &[u8]) -> Result<(), RemoteError>;
}
