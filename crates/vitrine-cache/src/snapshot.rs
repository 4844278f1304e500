//! Time-stamped snapshots that expire lazily on read.

use std::marker::PhantomData;
use std::time::Duration;

use crate::{Cache, CacheError, Clock, KvStore, SystemClock};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Default lifetime of a stored snapshot.
pub const DEFAULT_SNAPSHOT_TTL: Duration = Duration::from_secs(15 * 60);

/// A payload stamped with the time it was written.
///
/// The payload's fields are flattened next to `timestamp`, so a snapshot of
/// `{ "quantity": 2 }` is stored as `{ "quantity": 2, "timestamp": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// The saved payload.
    #[serde(flatten)]
    pub data: T,
    /// Write time in epoch milliseconds.
    pub timestamp: i64,
}

/// Result of reading a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotRead<T> {
    /// Nothing was stored.
    Missing,
    /// A snapshot existed but was too old; it has been deleted.
    Expired {
        /// How old the discarded snapshot was.
        age: Duration,
    },
    /// A snapshot inside its lifetime.
    Fresh(Snapshot<T>),
}

impl<T> SnapshotRead<T> {
    /// The payload, if fresh.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Fresh(snapshot) => Some(snapshot.data),
            _ => None,
        }
    }
}

/// Reads and writes a single snapshot key.
///
/// # Example
///
/// ```rust,ignore
/// let snapshots = SnapshotStore::<PageState, _>::new(MemoryStore::new(), "productPageData");
/// snapshots.save(&state)?;
/// let restored = snapshots.load()?.into_data();
/// ```
pub struct SnapshotStore<T, S, C = SystemClock> {
    cache: Cache<S>,
    clock: C,
    key: String,
    ttl: Duration,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, S> SnapshotStore<T, S, SystemClock>
where
    S: KvStore,
{
    /// Create a store on the system clock with the default lifetime.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self::with_clock(store, SystemClock, key)
    }
}

impl<T, S, C> SnapshotStore<T, S, C>
where
    S: KvStore,
    C: Clock,
{
    /// Create a store on an explicit clock.
    pub fn with_clock(store: S, clock: C, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            clock,
            key: key.into(),
            ttl: DEFAULT_SNAPSHOT_TTL,
            _phantom: PhantomData,
        }
    }

    /// Override the snapshot lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The snapshot lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current time according to this store's clock.
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Remove the stored snapshot.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }

    /// Whether a snapshot written at `timestamp` is still usable at `now`.
    ///
    /// Snapshots stamped in the future count as fresh.
    pub fn is_fresh(&self, timestamp: i64, now: i64) -> bool {
        let ttl = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        now.saturating_sub(timestamp) < ttl
    }
}

impl<T, S, C> SnapshotStore<T, S, C>
where
    T: Serialize + DeserializeOwned,
    S: KvStore,
    C: Clock,
{
    /// Read the snapshot, deleting it if it has expired.
    ///
    /// A value that does not decode is reported as
    /// [`CacheError::SerializeError`] and left in place.
    pub fn load(&self) -> Result<SnapshotRead<T>, CacheError> {
        let Some(snapshot) = self.cache.get::<Snapshot<T>>(&self.key)? else {
            return Ok(SnapshotRead::Missing);
        };

        let now = self.clock.now_millis();
        if self.is_fresh(snapshot.timestamp, now) {
            return Ok(SnapshotRead::Fresh(snapshot));
        }

        self.cache.delete(&self.key)?;
        let age = u64::try_from(now.saturating_sub(snapshot.timestamp)).unwrap_or(0);
        Ok(SnapshotRead::Expired {
            age: Duration::from_millis(age),
        })
    }

    /// Write a full snapshot stamped with the current time.
    ///
    /// Returns the timestamp that was written.
    pub fn save(&self, data: &T) -> Result<i64, CacheError> {
        let timestamp = self.clock.now_millis();
        let snapshot = SnapshotRef { data, timestamp };
        self.cache.set(&self.key, &snapshot)?;
        Ok(timestamp)
    }
}

/// Borrowing twin of [`Snapshot`] so saves don't clone the payload.
#[derive(Serialize)]
struct SnapshotRef<'a, T> {
    #[serde(flatten)]
    data: &'a T,
    timestamp: i64,
}
