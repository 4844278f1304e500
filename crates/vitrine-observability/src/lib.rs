//! Observability for the Vitrine product page.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with a correlation id
//! - `LogBuilder` - Fluent field builder
//! - `LogSink` - Where entries go (stderr, an in-memory buffer, nowhere)

mod logging;

pub use logging::*;
