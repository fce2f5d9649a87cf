//! Session event listener.
//!
//! The client library reports connection state changes and watch triggers
//! through a callback on its own thread. The callback pushes a
//! [`SessionEvent`] into an unbounded channel and a tokio task drains it,
//! logging each event and optionally echoing it to stdout. The listener
//! shares nothing with the command path.

use std::fmt;
use std::io::{self, Write};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A notification delivered by the client library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    /// Event type, for example `None` for a pure state change.
    pub kind: String,
    /// Session state when the event fired.
    pub state: String,
    /// Node the event refers to, if any.
    pub path: Option<String>,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event: {} state: {}", self.kind, self.state)?;
        if let Some(path) = &self.path {
            write!(f, " path: {path}")?;
        }
        Ok(())
    }
}

/// Producer half handed to the client library's watcher.
pub type EventSender = mpsc::UnboundedSender<SessionEvent>;

/// Receiver half consumed by the listener.
pub type EventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

/// Creates the event channel.
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Feeds events to `on_event` until shutdown is signalled or every sender
/// is dropped. Returns the number of events handled.
///
/// Shutdown wins over pending events.
pub async fn drain_events<F>(
    mut events: EventReceiver,
    mut shutdown: oneshot::Receiver<()>,
    mut on_event: F,
) -> usize
where
    F: FnMut(&SessionEvent),
{
    let mut handled = 0;
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            event = events.recv() => match event {
                Some(event) => {
                    on_event(&event);
                    handled += 1;
                }
                None => break,
            },
        }
    }
    handled
}

/// Background task draining session events.
#[derive(Debug)]
pub struct EventListener {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<usize>,
}

impl EventListener {
    /// Spawns the listener on `runtime`. With `echo` set, events are also
    /// written to stdout.
    #[must_use]
    pub fn spawn(runtime: &Handle, events: EventReceiver, echo: bool) -> Self {
        let (shutdown, shutdown_rx) = oneshot::channel();
        let task = runtime.spawn(drain_events(events, shutdown_rx, move |event| {
            info!(
                kind = %event.kind,
                state = %event.state,
                path = event.path.as_deref().unwrap_or(""),
                "session event"
            );
            if echo {
                if let Err(err) = writeln!(io::stdout().lock(), "{event}") {
                    warn!(error = %err, "failed to echo session event");
                }
            }
        }));
        Self { shutdown, task }
    }

    /// Stops the listener and waits for it. Returns the number of events it
    /// handled.
    pub async fn shutdown(self) -> usize {
        // Already finished if the task saw the channel close first.
        let _ = self.shutdown.send(());
        match self.task.await {
            Ok(handled) => handled,
            Err(err) => {
                warn!(error = %err, "event listener task failed");
                0
            }
        }
    }
}
