//! Data access layer for the product page.
//!
//! This crate provides:
//! - `FetchClient` - JSON GET over a pluggable `HttpTransport`
//! - `ReqwestTransport` / `SpinTransport` - native and Spin transports
//! - `PostalLookup` - CEP to address resolution, with `ViaCepClient`

mod client;
mod postal;
mod transport;

pub use client::*;
pub use postal::*;
pub use transport::*;
