//! Data backing the product page: the catalog entry and the persisted snapshot.

mod sample;
mod snapshot;

pub use sample::*;
pub use snapshot::*;
