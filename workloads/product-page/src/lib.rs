//! Product detail page.
//!
//! A single page with:
//! - An image gallery with clamped navigation and a full-screen overlay
//! - Size and color selection, a quantity stepper and a favorite flag
//! - A CEP field that resolves a shipping address through a [`PostalLookup`]
//! - A snapshot of all of the above, restored on mount for 15 minutes
//!
//! # Example
//!
//! ```rust,ignore
//! let options = PageOptions::default();
//! let mut page = ProductPage::mount_with_options(
//!     sample_product(),
//!     FileStore::open("snapshots.json")?,
//!     SystemClock,
//!     &options,
//!     StructuredLogger::new("productPageData"),
//! );
//! page.select_size("42");
//! page.edit_postal_code("01310100");
//! page.search_postal_code(&options.lookup_client()).await?;
//! println!("{}", page.render());
//! ```
//!
//! [`PostalLookup`]: vitrine_data::PostalLookup

mod data;
mod error;
mod options;
mod page;
pub mod sections;
mod shipping;
mod state;

pub use data::*;
pub use error::LookupError;
pub use options::{PageOptions, ResponseOrdering, DEFAULT_STORAGE_KEY, DEFAULT_TTL_MINUTES};
pub use page::ProductPage;
pub use shipping::{Completion, LookupTicket, ShippingState};
pub use state::SelectionState;
