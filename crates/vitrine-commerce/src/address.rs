//! Address types.

use serde::{Deserialize, Deserializer, Serialize};

/// A street-level address resolved from a postal code.
///
/// Missing or null fields read as empty strings; lookups can leave any of
/// them blank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Address {
    /// Street name (logradouro).
    #[serde(deserialize_with = "null_as_empty")]
    pub street: String,
    /// Neighborhood (bairro).
    #[serde(deserialize_with = "null_as_empty")]
    pub neighborhood: String,
    /// City (localidade).
    #[serde(deserialize_with = "null_as_empty")]
    pub city: String,
    /// State code (UF), e.g. "SP".
    #[serde(deserialize_with = "null_as_empty")]
    pub state: String,
    /// Postal code as returned by the lookup, usually `DDDDD-DDD`.
    #[serde(rename = "cep", deserialize_with = "null_as_empty")]
    pub postal_code: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Address {
    /// Create a new address.
    pub fn new(
        street: impl Into<String>,
        neighborhood: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            neighborhood: neighborhood.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
        }
    }

    /// "Street, Neighborhood".
    pub fn street_line(&self) -> String {
        format!("{}, {}", self.street, self.neighborhood)
    }

    /// "City - UF".
    pub fn city_line(&self) -> String {
        format!("{} - {}", self.city, self.state)
    }

    /// Format as multi-line.
    pub fn multi_line(&self) -> String {
        format!(
            "{}\n{}\nCEP: {}",
            self.street_line(),
            self.city_line(),
            self.postal_code
        )
    }
}
