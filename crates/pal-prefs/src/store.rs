//! Shared package-manager preference.
//!
//! [`PreferenceStore`] is the single owner of the current choice. Every
//! component showing commands subscribes to it; a change made through
//! [`set`](PreferenceStore::set) is persisted and delivered to all
//! subscribers before `set` returns. Changes written by another window
//! arrive through [`apply_external`](PreferenceStore::apply_external) or
//! [`reconcile`](PreferenceStore::reconcile).
//!
//! Storage failures are logged and the in-memory value stays
//! authoritative. [`try_set`](PreferenceStore::try_set) additionally
//! reports a failed write to the caller.

use std::sync::{Arc, Mutex, Weak};

use crate::backend::PreferenceBackend;
use crate::error::PreferenceError;
use crate::manager::PackageManager;

/// Storage key of the package-manager choice.
pub const STORAGE_KEY: &str = "paljs-docs-package-manager";

type Listener = Arc<dyn Fn(PackageManager) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

struct State {
    current: PackageManager,
    loaded: bool,
}

/// Persisted, broadcast package-manager preference.
pub struct PreferenceStore {
    backend: Arc<dyn PreferenceBackend>,
    key: String,
    default: PackageManager,
    state: Mutex<State>,
    listeners: Arc<Mutex<Listeners>>,
}

/// Registration returned by [`PreferenceStore::subscribe`].
///
/// The callback stays registered until the guard is dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    listeners: Weak<Mutex<Listeners>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .lock()
                .unwrap()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl PreferenceStore {
    /// Create a store over `backend` using [`STORAGE_KEY`] and `pnpm`.
    ///
    /// The value is the default until [`load`](Self::load) runs.
    pub fn new(backend: Arc<dyn PreferenceBackend>) -> Self {
        Self {
            backend,
            key: STORAGE_KEY.to_owned(),
            default: PackageManager::default(),
            state: Mutex::new(State {
                current: PackageManager::default(),
                loaded: false,
            }),
            listeners: Arc::default(),
        }
    }

    /// Use a different storage key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Use a different default choice.
    #[must_use]
    pub fn with_default(mut self, default: PackageManager) -> Self {
        self.default = default;
        self.state.get_mut().unwrap().current = default;
        self
    }

    /// Storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored choice and mark the store loaded.
    ///
    /// Missing, unknown or unreadable values keep the current choice.
    /// Subscribers are notified if the choice changed.
    pub fn load(&self) -> PackageManager {
        let stored = match self.backend.load(&self.key) {
            Ok(value) => value.and_then(|value| self.parse_stored(&value)),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to load package manager preference");
                None
            }
        };

        let changed = {
            let mut state = self.state.lock().unwrap();
            state.loaded = true;
            match stored {
                Some(manager) => replace(&mut state.current, manager),
                None => false,
            }
        };

        let current = self.get();
        if changed {
            self.notify(current);
        }
        current
    }

    /// Current choice.
    pub fn get(&self) -> PackageManager {
        self.state.lock().unwrap().current
    }

    /// Whether [`load`](Self::load) has run.
    pub fn is_loaded(&self) -> bool {
        self.state.lock().unwrap().loaded
    }

    /// Change the choice, persist it and notify subscribers.
    ///
    /// Subscribers are called synchronously, only if the value changed.
    /// A failed write is logged; the new value still applies.
    pub fn set(&self, manager: PackageManager) {
        if let Err(e) = self.try_set(manager) {
            tracing::warn!(key = %self.key, error = %e, "Failed to save package manager preference");
        }
    }

    /// Like [`set`](Self::set), but returns the write error.
    ///
    /// The new value applies and subscribers are notified even when the
    /// write fails.
    pub fn try_set(&self, manager: PackageManager) -> Result<(), PreferenceError> {
        let changed = replace(&mut self.state.lock().unwrap().current, manager);
        let saved = self.backend.save(&self.key, manager.as_str());

        if changed {
            self.notify(manager);
        }
        saved
    }

    /// Register `callback` for every later change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(PackageManager) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock().unwrap();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(callback)));

        Subscription {
            listeners: Arc::downgrade(&self.listeners),
            id,
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().unwrap().entries.len()
    }

    /// Apply a change made by another window.
    ///
    /// Changes to other keys are ignored. `None` means the value was
    /// removed and resets to the default; unknown values are ignored.
    /// Returns whether the choice changed.
    pub fn apply_external(&self, key: &str, value: Option<&str>) -> bool {
        if key != self.key {
            return false;
        }
        let manager = match value {
            Some(value) => match self.parse_stored(value) {
                Some(manager) => manager,
                None => return false,
            },
            None => self.default,
        };
        self.apply(manager)
    }

    /// Re-read the backend and apply any change.
    ///
    /// Returns whether the choice changed.
    pub fn reconcile(&self) -> bool {
        match self.backend.load(&self.key) {
            Ok(value) => self.apply_external(&self.key, value.as_deref()),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to reconcile package manager preference");
                false
            }
        }
    }

    fn apply(&self, manager: PackageManager) -> bool {
        let changed = replace(&mut self.state.lock().unwrap().current, manager);
        if changed {
            tracing::debug!(package_manager = %manager, "Package manager changed externally");
            self.notify(manager);
        }
        changed
    }

    fn parse_stored(&self, value: &str) -> Option<PackageManager> {
        match value.parse() {
            Ok(manager) => Some(manager),
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "Ignoring stored preference");
                None
            }
        }
    }

    /// Call every subscriber with the lock released.
    fn notify(&self, manager: PackageManager) {
        let callbacks: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap()
            .entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(manager);
        }
    }
}

/// Store `new` into `slot`; returns whether it differed.
fn replace(slot: &mut PackageManager, new: PackageManager) -> bool {
    let changed = *slot != new;
    *slot = new;
    changed
}
