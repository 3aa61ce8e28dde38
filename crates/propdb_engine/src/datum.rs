//! Opaque byte-string keys and values.

use std::fmt;

/// An opaque byte string with explicit length, used for both keys and
/// values.
///
/// A `Datum` owns its bytes; it carries no meaning at this layer beyond
/// byte equality. Absence (a key not found, iteration exhausted) is
/// represented as `Option<Datum>` being `None`, never as an empty datum.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Datum(Vec<u8>);

impl Datum {
    /// Creates a datum from owned bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the datum's bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the datum holds zero bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the datum, returning its bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Datum {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Datum {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for Datum {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keys are usually printable; fall back to escaped bytes otherwise.
        match std::str::from_utf8(&self.0) {
            Ok(s) => write!(f, "Datum({s:?})"),
            Err(_) => write!(f, "Datum({:02x?})", self.0),
        }
    }
}
