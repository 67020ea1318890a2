//! Store change notification
//!
//! Mutations on [`crate::PhotoDb`] and [`crate::FolderDb`] broadcast a
//! [`StoreEvent`] to every subscriber. Subscribers drain their receiver on
//! whatever thread owns the session state, so callbacks never run on the
//! mutating thread.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;

/// What part of the store changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    PhotosChanged,
    FoldersChanged,
}

/// Broadcast hub for store change events
#[derive(Clone, Default)]
pub struct StoreNotifier {
    subscribers: Arc<Mutex<Vec<Sender<StoreEvent>>>>,
}

impl StoreNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber; events are delivered over the returned channel
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Broadcast an event to all live subscribers, dropping disconnected ones
    pub fn notify(&self, event: StoreEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(event).is_ok());
        tracing::trace!("Notified {} subscribers: {:?}", subscribers.len(), event);
    }
}
