//! Commerce domain types for the Vitrine product page.
//!
//! - **Catalog**: products with images, sizes and colors
//! - **Money**: cent-based amounts with BRL formatting and installments
//! - **Postal**: CEP normalization and validation
//! - **Address / Shipping**: resolved destinations and delivery estimates
//!
//! # Example
//!
//! ```rust
//! use vitrine_commerce::prelude::*;
//!
//! let code = PostalCode::parse("01310-100").unwrap();
//! assert_eq!(code.as_str(), "01310100");
//!
//! for option in standard_options() {
//!     println!("{}: {}", option.name, option.estimate());
//! }
//! ```

pub mod address;
pub mod catalog;
pub mod money;
pub mod postal;
pub mod shipping;

pub use address::Address;
pub use catalog::{ColorOption, Product};
pub use money::Money;
pub use postal::{
    format_postal_code, postal_code_digits, PostalCode, PostalCodeError, POSTAL_CODE_DIGITS,
};
pub use shipping::{standard_options, ShippingOption};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::address::Address;
    pub use crate::catalog::{ColorOption, Product};
    pub use crate::money::Money;
    pub use crate::postal::{format_postal_code, PostalCode, PostalCodeError};
    pub use crate::shipping::{standard_options, ShippingOption};
}
