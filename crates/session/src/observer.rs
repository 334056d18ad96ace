//! Auth state observer: provider notifications → reconciled `AuthState`.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use planboard_auth::{AuthState, IdentityProvider, Session, SessionChange, UserRecord};
use planboard_events::Subscription;
use planboard_store::{SessionStore, cached_user, clear_session, save_session};

type Listener = Box<dyn FnMut(&AuthState) + Send>;

struct ListenerEntry {
    id: u64,
    callback: Listener,
}

/// Maintains the single authoritative `AuthState` for the application.
///
/// # Invariants
/// - All `token`/`user` store writes flow through reconciliation here (the
///   explicit sign-out action in [`SessionManager`] is the one other
///   permitted writer).
/// - Each notification is fully reconciled — store write completed — before
///   listeners are invoked, and notifications are processed in provider
///   emission order.
/// - Listeners fire once per actual transition, not once per poll.
///
/// Listener callbacks must not subscribe or unsubscribe synchronously from
/// within the callback; defer that to the next turn of the event loop.
pub struct AuthStateObserver {
    state: Mutex<AuthState>,
    store: Arc<dyn SessionStore>,
    changes: Mutex<Subscription<SessionChange>>,
    listeners: Arc<Mutex<Vec<ListenerEntry>>>,
    next_listener_id: AtomicU64,
}

impl AuthStateObserver {
    /// Subscribe to `provider` for the observer's lifetime.
    pub fn attach(provider: &dyn IdentityProvider, store: Arc<dyn SessionStore>) -> Self {
        Self::with_subscription(provider.subscribe_session_changes(), store)
    }

    /// Build from an already-established subscription (tests, bridges).
    pub fn with_subscription(
        changes: Subscription<SessionChange>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            state: Mutex::new(AuthState::Unknown),
            store,
            changes: Mutex::new(changes),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(0),
        }
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> AuthState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register a transition listener.
    ///
    /// Fires synchronously exactly once with the current snapshot
    /// (`Unknown` before first resolution), then once per transition until
    /// the returned guard unsubscribes. Dropping the guard unsubscribes.
    pub fn subscribe(
        &self,
        mut listener: impl FnMut(&AuthState) + Send + 'static,
    ) -> ListenerGuard {
        listener(&self.snapshot());

        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ListenerEntry {
                id,
                callback: Box::new(listener),
            });

        ListenerGuard {
            listeners: Arc::clone(&self.listeners),
            id,
            active: AtomicBool::new(true),
        }
    }

    /// Drain queued provider notifications, reconciling each in order.
    ///
    /// Returns the number of actual state transitions applied (duplicate
    /// notifications reconcile the store but do not re-notify).
    pub fn reconcile_pending(&self) -> usize {
        let mut transitions = 0;
        loop {
            let change = {
                let changes = self.changes.lock().unwrap_or_else(PoisonError::into_inner);
                match changes.try_recv() {
                    Ok(change) => change,
                    Err(_) => break,
                }
            };
            if self.reconcile(change) {
                transitions += 1;
            }
        }
        transitions
    }

    fn reconcile(&self, change: SessionChange) -> bool {
        let new_state = match change {
            SessionChange::SignedIn(session) => {
                AuthState::Authenticated(self.persist_signed_in(session))
            }
            SessionChange::SignedOut => {
                // The provider is authoritative: a merely-locally-cached
                // token does not outrank a provider-confirmed signed-out
                // state, so the store is cleared unconditionally.
                if let Err(err) = clear_session(self.store.as_ref()) {
                    tracing::warn!(error = %err, "failed to clear persisted session");
                }
                AuthState::Unauthenticated
            }
        };

        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state == new_state {
                return false;
            }
            tracing::debug!(from = %state, to = %new_state, "auth state transition");
            *state = new_state.clone();
        }

        self.notify(&new_state);
        true
    }

    fn persist_signed_in(&self, mut session: Session) -> Session {
        let cached = match cached_user(self.store.as_ref()) {
            Ok(cached) => cached,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable cached user profile");
                None
            }
        };

        // Prefer provider-supplied profile fields; fall back to the cache.
        if session.display_name.is_none() {
            session.display_name = cached.as_ref().map(|c| c.name.clone());
        }

        let record = UserRecord::for_session(&session, cached.as_ref());
        if let Err(err) = save_session(self.store.as_ref(), &session, &record) {
            tracing::warn!(error = %err, "failed to persist session");
        }

        session
    }

    fn notify(&self, state: &AuthState) {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        for entry in listeners.iter_mut() {
            (entry.callback)(state);
        }
    }
}

/// Disposer for a registered listener.
///
/// `unsubscribe` is idempotent; dropping the guard also unsubscribes.
pub struct ListenerGuard {
    listeners: Arc<Mutex<Vec<ListenerEntry>>>,
    id: u64,
    active: AtomicBool,
}

impl ListenerGuard {
    pub fn unsubscribe(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|entry| entry.id != self.id);
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
