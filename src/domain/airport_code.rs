use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A user supplied airport code, normalized to upper case
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AirportCode(String);

impl AirportCode {
    /// Case-insensitive comparison against another code
    pub fn same_as(&self, other: &AirportCode) -> bool {
        self.0 == other.0
    }
}

impl FromStr for AirportCode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::ParsingError("Airport code cannot be empty".into()));
        }

        // Normalize
        Ok(Self(value.to_uppercase()))
    }
}

impl AsRef<str> for AirportCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.0
    }
}
