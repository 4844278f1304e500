//! Key-value persistence for Vitrine.
//!
//! Provides the [`KvStore`] port the product page persists through, a typed
//! [`Cache`] with automatic JSON serialization, and [`SnapshotStore`], which
//! stamps saved state and discards it once it is older than its lifetime.
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_cache::{MemoryStore, SnapshotStore};
//!
//! let snapshots = SnapshotStore::<PageState, _>::new(MemoryStore::new(), "productPageData");
//! snapshots.save(&state)?;
//!
//! // Within 15 minutes this yields the saved state; afterwards the key is
//! // deleted and `None` comes back.
//! let restored = snapshots.load()?.into_data();
//! ```

mod clock;
mod error;
mod file;
mod kv;
mod snapshot;
#[cfg(target_arch = "wasm32")]
mod spin;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CacheError;
pub use file::FileStore;
pub use kv::Cache;
pub use snapshot::{Snapshot, SnapshotRead, SnapshotStore, DEFAULT_SNAPSHOT_TTL};
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStore;
pub use store::{KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, Clock, KvStore, MemoryStore, SnapshotStore};
}
