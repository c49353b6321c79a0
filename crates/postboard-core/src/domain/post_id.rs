use std::fmt;
use std::str::FromStr;

/// Number of bytes in a post identifier.
pub const POST_ID_LEN: usize = 12;

/// Opaque post identifier assigned by the store on creation.
///
/// Twelve bytes, rendered as 24 hex characters. This is the shape of a
/// document store object id, so identifiers round-trip through the
/// store without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId([u8; POST_ID_LEN]);

/// Returned when a string is not a well-formed post identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid post id (expected 24 hex characters)")]
pub struct InvalidPostId(pub String);

impl PostId {
    pub const fn from_bytes(bytes: [u8; POST_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; POST_ID_LEN] {
        self.0
    }
}

impl FromStr for PostId {
    type Err = InvalidPostId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != POST_ID_LEN * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidPostId(s.to_string()));
        }

        let mut bytes = [0u8; POST_ID_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            // All ASCII at this point, so byte slicing is on char boundaries.
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| InvalidPostId(s.to_string()))?;
        }

        Ok(Self(bytes))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
