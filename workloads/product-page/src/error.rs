//! Errors shown next to the CEP field.

use thiserror::Error;
use vitrine_commerce::PostalCodeError;
use vitrine_data::FetchError;

/// Why a shipping lookup produced no address.
///
/// The display strings are the messages the page shows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The input did not hold exactly eight digits; no request was sent.
    #[error(transparent)]
    InvalidPostalCode(#[from] PostalCodeError),

    /// The service does not know the code.
    #[error("CEP não encontrado")]
    NotFound,

    /// The request or its decoding failed.
    #[error("Erro ao buscar CEP")]
    Failed(#[source] FetchError),
}

impl LookupError {
    /// Whether the request reached the lookup service.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::InvalidPostalCode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let invalid = LookupError::from(PostalCodeError::WrongLength { digits: 7 });
        assert_eq!(invalid.to_string(), "CEP deve conter 8 dígitos");
        assert!(!invalid.is_remote());

        assert_eq!(LookupError::NotFound.to_string(), "CEP não encontrado");

        let failed = LookupError::Failed(FetchError::Connection("refused".to_string()));
        assert_eq!(failed.to_string(), "Erro ao buscar CEP");
        assert!(failed.is_remote());
    }
}
