//! [`Session`] backed by the `zookeeper` client library.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use tracing::{debug, info};
use zookeeper::{Acl, Permission, Stat, WatchedEvent, ZkError, ZkState, ZooKeeper};

use crate::acl::{AclEntry, Perms};
use crate::error::RemoteError;
use crate::events::{EventSender, SessionEvent};
use crate::session::{CreateMode, NodeStat, Session};

/// Permission bits shared by both representations.
const PERMISSION_BITS: [(Perms, Permission); 5] = [
    (Perms::READ, Permission::READ),
    (Perms::WRITE, Permission::WRITE),
    (Perms::CREATE, Permission::CREATE),
    (Perms::DELETE, Permission::DELETE),
    (Perms::ADMIN, Permission::ADMIN),
];

/// A live connection to the coordination service.
pub struct ZkSession {
    inner: ZooKeeper,
}

impl ZkSession {
    /// Connects to `address`, waits up to `timeout` for the session to be
    /// established and forwards every session event to `events`.
    ///
    /// # Errors
    ///
    /// Returns an error when the address is rejected, the server ends the
    /// session, or no session is established within `timeout`.
    pub fn connect(
        address: &str,
        timeout: Duration,
        events: EventSender,
    ) -> Result<Self, RemoteError> {
        info!(address, timeout_ms = timeout.as_millis(), "connecting");
        let watch_events = events.clone();
        let watcher = move |event: WatchedEvent| {
            // The receiver is gone once the listener has shut down.
            if watch_events.send(watch_event(&event)).is_err() {
                debug!("event listener stopped, dropping session event");
            }
        };
        let inner = ZooKeeper::connect(address, timeout, watcher).map_err(remote)?;

        let (states_tx, states_rx) = mpsc::channel();
        inner.add_listener(move |state: ZkState| {
            // Nobody waits on the state channel after startup.
            let _ = states_tx.send(state);
            if events.send(state_event(state)).is_err() {
                debug!("event listener stopped, dropping state change");
            }
        });

        match await_connected(&states_rx, timeout) {
            Ok(state) => {
                info!(address, ?state, "session established");
                Ok(Self { inner })
            }
            Err(err) => {
                if let Err(close_err) = inner.close() {
                    debug!(error = %remote(close_err), "closing unestablished session");
                }
                Err(err)
            }
        }
    }

    /// Closes the session.
    ///
    /// # Errors
    ///
    /// Returns the library's error when the close request fails.
    pub fn close(&self) -> Result<(), RemoteError> {
        self.inner.close().map_err(remote)
    }
}

/// Blocks until `states` reports a usable session, a terminal state, or
/// `timeout` elapses.
fn await_connected(states: &Receiver<ZkState>, timeout: Duration) -> Result<ZkState, RemoteError> {
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match states.recv_timeout(remaining) {
            Ok(state @ (ZkState::Connected | ZkState::ConnectedReadOnly)) => return Ok(state),
            Ok(state @ (ZkState::Closed | ZkState::AuthFailed)) => {
                debug!(?state, "session ended before it was established");
                return Err(RemoteError::new(format!("{state:?}")));
            }
            Ok(state) => debug!(?state, "session state changed"),
            Err(RecvTimeoutError::Timeout) => {
                return Err(RemoteError::new(format!(
                    "no session established within {}ms",
                    timeout.as_millis()
                )));
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(RemoteError::new(format!("{:?}", ZkError::ConnectionLoss)));
            }
        }
    }
}

impl Session for ZkSession {
    fn create(
        &self,
        path: &str,
        data: &[u8],
        mode: CreateMode,
        acl: &[AclEntry],
    ) -> Result<String, RemoteError> {
        self.inner
            .create(path, data.to_vec(), to_acl(acl), to_create_mode(mode))
            .map_err(remote)
    }

    fn delete(&self, path: &str, version: i32) -> Result<(), RemoteError> {
        self.inner.delete(path, Some(version)).map_err(remote)
    }

    fn children(&self, path: &str) -> Result<Vec<String>, RemoteError> {
        self.inner.get_children(path, false).map_err(remote)
    }

    fn get_data(&self, path: &str) -> Result<(Vec<u8>, NodeStat), RemoteError> {
        let (data, stat) = self.inner.get_data(path, false).map_err(remote)?;
        Ok((data, node_stat(&stat)))
    }

    fn set_data(&self, path: &str, data: &[u8], version: i32) -> Result<NodeStat, RemoteError> {
        self.inner
            .set_data(path, data.to_vec(), Some(version))
            .map(|stat| node_stat(&stat))
            .map_err(remote)
    }

    fn get_acl(&self, path: &str) -> Result<Vec<AclEntry>, RemoteError> {
        let (acl, _stat) = self.inner.get_acl(path).map_err(remote)?;
        Ok(acl.iter().map(from_acl).collect())
    }

    fn set_acl(&self, path: &str, acl: &[AclEntry], version: i32) -> Result<NodeStat, RemoteError> {
        self.inner
            .set_acl(path, to_acl(acl), Some(version))
            .map(|stat| node_stat(&stat))
            .map_err(remote)
    }

    fn add_auth(&self, scheme: &str, credential: &[u8]) -> Result<(), RemoteError> {
        self.inner
            .add_auth(scheme, credential.to_vec())
            .map_err(remote)
    }
}

fn remote(err: ZkError) -> RemoteError {
    RemoteError::new(format!("{err:?}"))
}

fn watch_event(event: &WatchedEvent) -> SessionEvent {
    SessionEvent {
        kind: format!("{:?}", event.event_type),
        state: format!("{:?}", event.keeper_state),
        path: event.path.clone(),
    }
}

fn state_event(state: ZkState) -> SessionEvent {
    SessionEvent {
        kind: "StateChange".to_string(),
        state: format!("{state:?}"),
        path: None,
    }
}

const fn to_create_mode(mode: CreateMode) -> zookeeper::CreateMode {
    match mode {
        CreateMode::Ephemeral => zookeeper::CreateMode::Ephemeral,
        CreateMode::PersistentSequential => zookeeper::CreateMode::PersistentSequential,
    }
}

fn to_permission(perms: Perms) -> Permission {
    PERMISSION_BITS
        .iter()
        .filter(|(ours, _)| perms.contains(*ours))
        .fold(Permission::NONE, |acc, (_, theirs)| acc | *theirs)
}

fn from_permission(permission: Permission) -> Perms {
    PERMISSION_BITS
        .iter()
        .filter(|(_, theirs)| permission & *theirs == *theirs)
        .fold(Perms::NONE, |acc, (ours, _)| acc | *ours)
}

fn to_acl(entries: &[AclEntry]) -> Vec<Acl> {
    entries
        .iter()
        .map(|entry| Acl {
            perms: to_permission(entry.perms),
            scheme: entry.scheme.clone(),
            id: entry.id.clone(),
        })
        .collect()
}

fn from_acl(acl: &Acl) -> AclEntry {
    AclEntry {
        perms: from_permission(acl.perms),
        scheme: acl.scheme.clone(),
        id: acl.id.clone(),
    }
}

const fn node_stat(stat: &Stat) -> NodeStat {
    NodeStat {
        czxid: stat.czxid,
        mzxid: stat.mzxid,
        ctime: stat.ctime,
        mtime: stat.mtime,
        version: stat.version,
        cversion: stat.cversion,
        aversion: stat.aversion,
        ephemeral_owner: stat.ephemeral_owner,
        data_length: stat.data_length,
        num_children: stat.num_children,
        pzxid: stat.pzxid,
    }
}
