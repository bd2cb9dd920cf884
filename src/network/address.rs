//! Hardware (MAC) address normalization.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of hexadecimal digits in a canonical hardware address.
const CANONICAL_LEN: usize = 12;

/// Error returned when a string cannot be normalized into a [`NetworkAddress`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input does not reduce to exactly 12 hexadecimal digits.
    #[error("Invalid MAC address format: '{input}'")]
    Format {
        /// The rejected input, as given by the caller.
        input: String,
    },
}

/// A hardware address in canonical form.
///
/// Built from a string of hex octets separated by `:` or `-` in any case.
/// Separators are stripped and the result upper-cased; exactly 12 hex digits
/// must remain.
///
/// # Equality
///
/// Equality, ordering and hashing use the integer value, so two addresses
/// written with different separators or case compare equal.
///
/// # Examples
///
/// ```
/// use wlan_iface::network::NetworkAddress;
///
/// let mac = NetworkAddress::new("aa:bb:cc-dd:ee:ff").unwrap();
/// assert_eq!(mac.string(), "AABBCCDDEEFF");
/// assert_eq!(mac.hex(), mac.string());
/// assert_eq!(mac.integer(), 0xAABB_CCDD_EEFF);
/// ```
#[derive(Clone)]
pub struct NetworkAddress {
    canonical: String,
    value: u64,
}

impl NetworkAddress {
    /// Normalizes and validates `input`.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Format`] when the input does not reduce to
    /// exactly 12 hexadecimal digits. Input is never truncated or padded.
    pub fn new(input: &str) -> Result<Self, AddressError> {
        let canonical: String = input
            .chars()
            .filter(|c| !matches!(c, ':' | '-'))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if canonical.len() != CANONICAL_LEN || !canonical.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::Format {
                input: input.to_string(),
            });
        }

        let value = u64::from_str_radix(&canonical, 16).map_err(|_| AddressError::Format {
            input: input.to_string(),
        })?;

        Ok(Self { canonical, value })
    }

    /// Returns the canonical 12-character uppercase form.
    #[must_use]
    pub fn string(&self) -> &str {
        &self.canonical
    }

    /// Returns the canonical form under its hex name.
    ///
    /// Always identical to [`NetworkAddress::string`]; both accessors exist
    /// for callers that compare either one.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.canonical
    }

    /// Returns the big-endian integer value (first octet most significant).
    #[must_use]
    pub const fn integer(&self) -> u64 {
        self.value
    }

    /// Returns the six octets in transmission order.
    #[must_use]
    pub fn octets(&self) -> [u8; 6] {
        let bytes = self.value.to_be_bytes();
        [bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7]]
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl fmt::Debug for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NetworkAddress(string={}, integer={})",
            self.canonical, self.value
        )
    }
}

impl PartialEq for NetworkAddress {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for NetworkAddress {}

impl PartialOrd for NetworkAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NetworkAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for NetworkAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl FromStr for NetworkAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for NetworkAddress {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for NetworkAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

impl<'de> Deserialize<'de> for NetworkAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "address_tests.rs"]
mod tests;
