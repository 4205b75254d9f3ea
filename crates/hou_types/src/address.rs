use crate::constants::ADDRESS_PREFIX;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of raw bytes in an account identifier.
pub const ADDRESS_BYTES: usize = 32;

/// Errors that can occur when parsing a Houston address string.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("missing the {0:?} address prefix")]
    MissingPrefix(&'static str),
    #[error("expected {0} hex characters after the prefix")]
    PayloadLength(usize),
    #[error("address payload is not valid hexadecimal")]
    PayloadHex(#[from] hex::FromHexError),
}

/// Account identifier used to key balances, pools, and user records.
///
/// Rendered as [`ADDRESS_PREFIX`] followed by 64 hex characters. Parsing is
/// the only way to build one from text, so an `Address` in hand is always
/// well formed. Serialises to/from the text form in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; ADDRESS_BYTES]);

impl Address {
    /// Parse the text form, validating prefix, length, and hex payload.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let payload = text
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or(AddressError::MissingPrefix(ADDRESS_PREFIX))?;
        if payload.len() != 2 * ADDRESS_BYTES {
            return Err(AddressError::PayloadLength(2 * ADDRESS_BYTES));
        }

        let mut bytes = [0u8; ADDRESS_BYTES];
        hex::decode_to_slice(payload, &mut bytes)?;
        Ok(Address(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ADDRESS_PREFIX, hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    fn from(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Address(bytes)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}
