use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed 20-byte content-addressable key identifier.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; 20]);

impl Digest {
    pub const LEN: usize = 20;

    pub fn from_bytes(b: &[u8]) -> Option<Self> {
        if b.len() != Self::LEN {
            return None;
        }
        let mut out = [0u8; Self::LEN];
        out.copy_from_slice(b);
        Some(Digest(out))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}
