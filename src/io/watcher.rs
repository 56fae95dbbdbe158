use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::file_io::{DocError, read_and_parse};
use crate::model::section::TodoSection;

/// Messages sent from a watch instance to the TUI event loop.
/// Each instance sends at most one.
#[derive(Debug)]
pub enum WatchMessage {
    /// The file changed and was re-parsed.
    Updated(Vec<TodoSection>),
    /// The file changed but could not be read.
    ReadFailed(DocError),
    /// The change subscription itself failed. Watching stops until re-armed.
    SubscriptionFailed(DocError),
}

/// One-shot file watcher, re-armed by the consumer after every message.
///
/// At most one watch instance is in flight at a time. `poll()` should be
/// called each tick; after it returns a message the watcher is disarmed and
/// `arm()` must be called again to keep watching.
pub struct DocWatcher {
    path: PathBuf,
    debounce: Duration,
    tx: Sender<WatchMessage>,
    rx: Receiver<WatchMessage>,
    armed: bool,
}

impl DocWatcher {
    pub fn new(path: &Path, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        DocWatcher {
            path: path.to_path_buf(),
            debounce,
            tx,
            rx,
            armed: false,
        }
    }

    /// Start a watch instance unless one is already in flight.
    pub fn arm(&mut self) {
        if self.armed {
            return;
        }
        self.armed = true;
        spawn_watch(&self.path, self.debounce, self.tx.clone());
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Non-blocking poll for the in-flight instance's message.
    pub fn poll(&mut self) -> Option<WatchMessage> {
        let msg = self.rx.try_recv().ok()?;
        self.armed = false;
        Some(msg)
    }

    /// Block until the in-flight instance delivers, or the timeout passes.
    pub fn wait(&mut self, timeout: Duration) -> Option<WatchMessage> {
        let msg = self.rx.recv_timeout(timeout).ok()?;
        self.armed = false;
        Some(msg)
    }
}

/// Subscribe to `path` and hand the subscription to a worker thread that
/// delivers exactly one message, then drops the subscription.
/// Registration failures are delivered immediately.
fn spawn_watch(path: &Path, debounce: Duration, tx: Sender<WatchMessage>) {
    let (event_tx, event_rx) = mpsc::channel();
    let watcher = RecommendedWatcher::new(
        move |result: notify::Result<Event>| {
            let _ = event_tx.send(result);
        },
        Config::default(),
    )
    .and_then(|mut w| {
        w.watch(path, RecursiveMode::NonRecursive)?;
        Ok(w)
    });

    let watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not subscribe to file changes");
            let _ = tx.send(WatchMessage::SubscriptionFailed(DocError::Watch(e)));
            return;
        }
    };

    tracing::debug!(path = %path.display(), "watch armed");
    let path = path.to_path_buf();
    thread::spawn(move || {
        let msg = wait_for_change(&path, debounce, &event_rx);
        drop(watcher);
        if let Some(msg) = msg {
            let _ = tx.send(msg);
        }
    });
}

/// Wait for a write/create burst to settle, then read and parse the file.
///
/// Every relevant event pushes the deadline `debounce` into the future.
/// Returns `None` only if the event source goes away.
fn wait_for_change(
    path: &Path,
    debounce: Duration,
    events: &Receiver<notify::Result<Event>>,
) -> Option<WatchMessage> {
    let mut deadline: Option<Instant> = None;
    loop {
        let received = match deadline {
            None => events.recv().map_err(|_| RecvTimeoutError::Disconnected),
            Some(at) => events.recv_timeout(at.saturating_duration_since(Instant::now())),
        };

        match received {
            Ok(Ok(event)) => {
                if is_content_change(&event.kind) {
                    tracing::trace!(kind = ?event.kind, "change event");
                    deadline = Some(Instant::now() + debounce);
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "watch subscription error");
                return Some(WatchMessage::SubscriptionFailed(DocError::Watch(e)));
            }
            Err(RecvTimeoutError::Timeout) => {
                return Some(match read_and_parse(path) {
                    Ok(sections) => {
                        tracing::info!(path = %path.display(), sections = sections.len(), "file reloaded");
                        WatchMessage::Updated(sections)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "reload failed");
                        WatchMessage::ReadFailed(e)
                    }
                });
            }
            Err(RecvTimeoutError::Disconnected) => return None,
        }
    }
}

/// Writes and creates trigger a reload; access and removal do not.
fn is_content_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}
