//! Process cache and application context.
//!
//! [`AppContext`] is the explicit context object the application root owns
//! and hands to every consumer; there is no process-wide singleton. It holds
//! the authoritative in-process copies of the roster, leave list, and meal
//! override map, the signed-in identity, and the subscribe/notify registry
//! consumers use to re-render on change.
//!
//! Data flows one way in (store → cache → subscribers) and one way out via
//! the action methods (action → adapter write → cache merge → notify). The
//! cache is last-write-wins against the remote store: a sync tick and a local
//! action can race, and the design accepts the 30-second staleness bound
//! instead of conflict resolution.

mod actions;
mod session;
mod sync;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use mockable::Clock;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::domain::leave::Leave;
use crate::domain::meal::MealOverrideMap;
use crate::domain::ports::{DocumentStore, SessionStore};
use crate::domain::user::{default_roster, User};
use crate::repo::{LeaveRepository, MealRepository, UserRepository};

pub use actions::{LeaveRequest, NewUser};

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Value snapshot of the cache, taken under one read lock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheSnapshot {
    pub current_user: Option<User>,
    pub users: Vec<User>,
    pub leaves: Vec<Leave>,
    pub meal_overrides: MealOverrideMap,
}

#[derive(Debug, Default)]
struct CacheState {
    current_user: Option<User>,
    users: Vec<User>,
    leaves: Vec<Leave>,
    meal_overrides: MealOverrideMap,
}

/// Handle returned by [`AppContext::subscribe`]; pass it back to
/// [`AppContext::unsubscribe`] to remove exactly that registration.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
}

/// The application context: cache, session, repositories, and sync loop.
///
/// Mutation happens under a single write lock per operation (replace a whole
/// collection or merge one record), so subscribers never observe torn state
/// between notifications. Listeners run synchronously, in registration
/// order, after every mutation.
pub struct AppContext {
    cache: RwLock<CacheState>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    sync_task: Mutex<Option<JoinHandle<()>>>,
    users_repo: UserRepository,
    leaves_repo: LeaveRepository,
    meals_repo: MealRepository,
    session_store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    config: ClientConfig,
}

impl AppContext {
    /// Wire a context over its adapters.
    ///
    /// Returns an `Arc` because the sync loop holds a second reference to the
    /// context for the lifetime of its task.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        session_store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        config: ClientConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            cache: RwLock::new(CacheState::default()),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(1),
            sync_task: Mutex::new(None),
            users_repo: UserRepository::new(Arc::clone(&store)),
            leaves_repo: LeaveRepository::new(Arc::clone(&store)),
            meals_repo: MealRepository::new(store),
            session_store,
            clock,
            config,
        })
    }

    /// One full sequential load of all three repositories, replacing cache
    /// contents wholesale, then a notify. Safe to call before any session
    /// exists; the sync loop calls it on every tick.
    pub async fn refresh(&self) {
        let users = self.users_repo.load().await;
        let leaves = self.leaves_repo.load().await;
        let meal_overrides = self.meals_repo.load().await;
        {
            let mut cache = self.write();
            cache.users = users;
            cache.leaves = leaves;
            cache.meal_overrides = meal_overrides;
        }
        self.notify();
    }

    /// First full load at process start.
    pub async fn initialize(&self) {
        self.refresh().await;
    }

    /// Register a change listener, invoked after every cache mutation or
    /// sync refresh. Registrations are independent; dropping one never
    /// affects the others.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.lock_listeners().push((id, Arc::new(listener)));
        Subscription { id }
    }

    /// Remove one registration. Unknown handles are ignored.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.lock_listeners()
            .retain(|(id, _)| *id != subscription.id);
    }

    /// The signed-in identity, if any.
    pub fn current_user(&self) -> Option<User> {
        self.read().current_user.clone()
    }

    /// Cached roster; falls back to the default roster while the cache is
    /// still empty so the login screen always has accounts to check against.
    pub fn users(&self) -> Vec<User> {
        let cache = self.read();
        if cache.users.is_empty() {
            default_roster()
        } else {
            cache.users.clone()
        }
    }

    /// Cached leave list, newest submission first.
    pub fn leaves(&self) -> Vec<Leave> {
        self.read().leaves.clone()
    }

    /// Cached meal override map, keyed by `{userId}_{date}`.
    pub fn meal_overrides(&self) -> MealOverrideMap {
        self.read().meal_overrides.clone()
    }

    /// Consistent snapshot of the whole cache.
    pub fn snapshot(&self) -> CacheSnapshot {
        let cache = self.read();
        CacheSnapshot {
            current_user: cache.current_user.clone(),
            users: cache.users.clone(),
            leaves: cache.leaves.clone(),
            meal_overrides: cache.meal_overrides.clone(),
        }
    }

    /// Today's calendar date in the process-local timezone.
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    pub(crate) fn notify(&self) {
        // Snapshot the registrations so a listener can subscribe or
        // unsubscribe from inside its callback without deadlocking.
        let listeners: Vec<Listener> = self
            .lock_listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(u64, Listener)>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_sync_task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.sync_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        if let Some(task) = self.lock_sync_task().take() {
            task.abort();
        }
    }
}
