//! CEP input and the lookup that turns it into an address.
//!
//! A lookup runs in three steps so the page stays borrowable while the
//! request is in flight:
//!
//! 1. [`ShippingState::begin_lookup`] validates the input, raises the
//!    loading flag and hands out a [`LookupTicket`].
//! 2. The caller resolves the ticket's code with any
//!    [`vitrine_data::PostalLookup`].
//! 3. [`ShippingState::complete_lookup`] applies the outcome according to the
//!    [`ResponseOrdering`] policy.

use vitrine_commerce::{format_postal_code, Address, PostalCode};
use vitrine_data::LookupOutcome;

use crate::error::LookupError;
use crate::options::ResponseOrdering;

/// Receipt for a lookup that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    token: u64,
    code: PostalCode,
}

impl LookupTicket {
    /// Issue order. Editing the field also advances the counter, so tokens
    /// are increasing but not contiguous.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// The validated code to resolve.
    pub fn code(&self) -> &PostalCode {
        &self.code
    }
}

/// What happened to a completed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The outcome was written to the state.
    Applied,
    /// A newer lookup was issued since; the outcome was dropped.
    Stale,
}

/// CEP field, resolved address and lookup status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingState {
    postal_code: String,
    address: Option<Address>,
    error: Option<LookupError>,
    loading: bool,
    issued: u64,
}

impl ShippingState {
    /// Empty field, no address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a saved field and address without touching lookup status.
    pub fn restore(postal_code: &str, address: Option<Address>) -> Self {
        Self {
            postal_code: format_postal_code(postal_code),
            address,
            ..Self::default()
        }
    }

    /// The field as displayed, e.g. `01310-100`.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn error(&self) -> Option<&LookupError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Label of the lookup button.
    pub fn action_label(&self) -> &'static str {
        if self.loading {
            "Buscando..."
        } else {
            "Calcular"
        }
    }

    /// Replace the field with the normalized form of `input`.
    ///
    /// A change to the field drops the address resolved for the previous
    /// code and supersedes any lookup in flight: under
    /// [`ResponseOrdering::LastRequestWins`] its completion is stale.
    /// Returns whether anything changed.
    pub fn edit_postal_code(&mut self, input: &str) -> bool {
        let formatted = format_postal_code(input);
        if formatted == self.postal_code {
            return false;
        }
        self.postal_code = formatted;
        self.address = None;
        self.issued += 1;
        self.loading = false;
        true
    }

    /// Validate the field and start a lookup.
    ///
    /// On a bad digit count the error is recorded and returned, and loading
    /// is left untouched: nothing was sent.
    pub fn begin_lookup(&mut self) -> Result<LookupTicket, LookupError> {
        let code = match PostalCode::parse(&self.postal_code) {
            Ok(code) => code,
            Err(err) => {
                let err = LookupError::from(err);
                self.error = Some(err.clone());
                return Err(err);
            }
        };

        self.issued += 1;
        self.loading = true;
        self.error = None;
        Ok(LookupTicket {
            token: self.issued,
            code,
        })
    }

    /// Apply a finished lookup.
    pub fn complete_lookup(
        &mut self,
        ticket: &LookupTicket,
        outcome: LookupOutcome,
        ordering: ResponseOrdering,
    ) -> Completion {
        if ordering == ResponseOrdering::LastRequestWins && ticket.token != self.issued {
            return Completion::Stale;
        }

        match outcome {
            LookupOutcome::Found(address) => {
                self.address = Some(address);
                self.error = None;
            }
            LookupOutcome::NotFound => {
                self.address = None;
                self.error = Some(LookupError::NotFound);
            }
            LookupOutcome::Failed(err) => {
                self.address = None;
                self.error = Some(LookupError::Failed(err));
            }
        }
        self.loading = false;
        Completion::Applied
    }
}
