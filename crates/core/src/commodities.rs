//! Commodity kinds tracked by the application.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

/// A precious metal tracked by rates and investments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Commodity {
    Gold,
    Silver,
}

impl Commodity {
    /// Storage form, also used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Commodity::Gold => "GOLD",
            Commodity::Silver => "SILVER",
        }
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Commodity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GOLD" => Ok(Commodity::Gold),
            "SILVER" => Ok(Commodity::Silver),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown commodity: {}",
                other
            )))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_storage_form() {
        for c in [Commodity::Gold, Commodity::Silver] {
            assert_eq!(c.as_str().parse::<Commodity>().unwrap(), c);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("gold".parse::<Commodity>().unwrap(), Commodity::Gold);
        assert!("platinum".parse::<Commodity>().is_err());
    }
}
