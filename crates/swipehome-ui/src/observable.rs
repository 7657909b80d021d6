//! Observable home session with automatic change notifications.
//!
//! Mutation = notification. Every method that changes the session also
//! broadcasts a fresh [`HomeSnapshot`], so a renderer cannot miss a frame.

use std::time::Duration;

use parking_lot::Mutex;
use swipehome_core::{AxisError, CardState, MenuState, Viewport};
use tokio::sync::watch;

use crate::model::{HomeSession, HomeSnapshot, ScrollOutcome};

// =============================================================================
// ObservableHome
// =============================================================================

/// A [`HomeSession`] that broadcasts its snapshot after every mutation.
///
/// ## Thread Safety
///
/// Uses `parking_lot::Mutex` for the session (never poisons) and
/// `tokio::sync::watch` for broadcasts. The lock is released before sending.
pub struct ObservableHome {
    inner: Mutex<HomeSession>,
    tx: watch::Sender<HomeSnapshot>,
    rx: watch::Receiver<HomeSnapshot>,
}

impl ObservableHome {
    pub fn new(session: HomeSession) -> Self {
        let (tx, rx) = watch::channel(session.snapshot());
        Self {
            inner: Mutex::new(session),
            tx,
            rx,
        }
    }

    /// Run `f` against the session, then broadcast.
    fn mutate<R>(&self, f: impl FnOnce(&mut HomeSession) -> R) -> R {
        let (result, snapshot) = {
            let mut inner = self.inner.lock();
            let result = f(&mut inner);
            (result, inner.snapshot())
        };
        let _ = self.tx.send(snapshot);
        result
    }

    // =========================================================================
    // Mutation Methods (all broadcast automatically)
    // =========================================================================

    pub fn toggle_menu(&self) {
        self.mutate(|s| s.toggle_menu());
    }

    pub fn drag_menu(&self, delta: f32) -> f32 {
        self.mutate(|s| s.drag_menu(delta))
    }

    pub fn release_menu(&self, velocity: f32) -> Option<MenuState> {
        self.mutate(|s| s.release_menu(velocity))
    }

    pub fn drag_card(&self, delta: f32) -> f32 {
        self.mutate(|s| s.drag_card(delta))
    }

    pub fn release_card(&self, velocity: f32) -> Option<CardState> {
        self.mutate(|s| s.release_card(velocity))
    }

    pub fn scroll(&self, delta: f32) -> ScrollOutcome {
        self.mutate(|s| s.scroll(delta))
    }

    pub fn fling(&self, velocity: f32) -> ScrollOutcome {
        self.mutate(|s| s.fling(velocity))
    }

    /// Advance one frame. Broadcasts only if something moved.
    pub fn tick(&self, dt: Duration) -> bool {
        let (moved, snapshot) = {
            let mut inner = self.inner.lock();
            let moved = inner.tick(dt);
            (moved, moved.then(|| inner.snapshot()))
        };
        if let Some(snapshot) = snapshot {
            let _ = self.tx.send(snapshot);
        }
        moved
    }

    /// Apply new viewport measurements. Broadcasts only if they were accepted.
    pub fn resize(&self, viewport: Viewport) -> Result<(), AxisError> {
        let snapshot = {
            let mut inner = self.inner.lock();
            inner.resize(viewport)?;
            inner.snapshot()
        };
        let _ = self.tx.send(snapshot);
        Ok(())
    }

    pub fn dispose(&self) {
        self.mutate(|s| s.dispose());
    }

    // =========================================================================
    // Query Methods
    // =========================================================================

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<HomeSnapshot> {
        self.rx.clone()
    }

    pub fn snapshot(&self) -> HomeSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.lock().is_animating()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.lock().is_disposed()
    }
}
