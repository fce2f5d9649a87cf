//! Recording session used by handler and REPL tests.

use std::cell::RefCell;

use crate::acl::AclEntry;
use crate::error::RemoteError;
use crate::session::{CreateMode, NodeStat, Session};

/// A session call as the handler issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Create {
        path: String,
        data: Vec<u8>,
        mode: CreateMode,
        acl: Vec<AclEntry>,
    },
    Delete {
        path: String,
        version: i32,
    },
    Children {
        path: String,
    },
    GetData {
        path: String,
    },
    SetData {
        path: String,
        data: Vec<u8>,
        version: i32,
    },
    GetAcl {
        path: String,
    },
    SetAcl {
        path: String,
        acl: Vec<AclEntry>,
        version: i32,
    },
    AddAuth {
        scheme: String,
        credential: Vec<u8>,
    },
}

/// Records every call and answers with canned values, or fails them all.
#[derive(Debug, Default)]
pub(crate) struct RecordingSession {
    calls: RefCell<Vec<Call>>,
    failure: Option<RemoteError>,
    pub(crate) stat: NodeStat,
    pub(crate) data: Vec<u8>,
    pub(crate) children: Vec<String>,
    pub(crate) acl: Vec<AclEntry>,
}

impl RecordingSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            failure: Some(RemoteError::new(message)),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record<T>(&self, call: Call, value: T) -> Result<T, RemoteError> {
        self.calls.borrow_mut().push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(value),
        }
    }
}

impl Session for RecordingSession {
    fn create(
        &self,
        path: &str,
        data: &[u8],
        mode: CreateMode,
        acl: &[AclEntry],
    ) -> Result<String, RemoteError> {
        let created = if mode == CreateMode::PersistentSequential {
            format!("{path}0000000001")
        } else {
            path.to_string()
        };
        self.record(
            Call::Create {
                path: path.to_string(),
                data: data.to_vec(),
                mode,
                acl: acl.to_vec(),
            },
            created,
        )
    }

    fn delete(&self, path: &str, version: i32) -> Result<(), RemoteError> {
        self.record(
            Call::Delete {
                path: path.to_string(),
                version,
            },
            (),
        )
    }

    fn children(&self, path: &str) -> Result<Vec<String>, RemoteError> {
        self.record(
            Call::Children {
                path: path.to_string(),
            },
            self.children.clone(),
        )
    }

    fn get_data(&self, path: &str) -> Result<(Vec<u8>, NodeStat), RemoteError> {
        self.record(
            Call::GetData {
                path: path.to_string(),
            },
            (self.data.clone(), self.stat),
        )
    }

    fn set_data(&self, path: &str, data: &[u8], version: i32) -> Result<NodeStat, RemoteError> {
        self.record(
            Call::SetData {
                path: path.to_string(),
                data: data.to_vec(),
                version,
            },
            self.stat,
        )
    }

    fn get_acl(&self, path: &str) -> Result<Vec<AclEntry>, RemoteError> {
        self.record(
            Call::GetAcl {
                path: path.to_string(),
            },
            self.acl.clone(),
        )
    }

    fn set_acl(&self, path: &str, acl: &[AclEntry], version: i32) -> Result<NodeStat, RemoteError> {
        self.record(
            Call::SetAcl {
                path: path.to_string(),
                acl: acl.to_vec(),
                version,
            },
            self.stat,
        )
    }

    fn add_auth(&self, scheme: &str, credential: &[u8]) -> Result<(), RemoteError> {
        self.record(
            Call::AddAuth {
                scheme: scheme.to_string(),
                credential: credential.to_vec(),
            },
            (),
        )
    }
}

/// Runs `f` against an in-memory writer and returns what it wrote.
pub(crate) fn capture<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>),
{
    let mut buf = Vec::new();
    f(&mut buf);
    String::from_utf8(buf).unwrap()
}
