use serde::de::Visitor;
use serde::{Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// An opaque serialized record payload, with its ownership mode encoded in
/// the type so a hand-off mistake is a compile error rather than a
/// use-after-free.
///
/// `HandOff` is how a freshly-pickled record arrives: the message becomes
/// its sole owner. `Retained` is how an ack's record survives being
/// promoted to "current best" (entry.4.4.3 step 7): a cheap `Arc::clone`,
/// not a fresh heap copy, once the first retain has paid for the one
/// conversion.
#[derive(Clone, Debug)]
pub enum Pickle {
    HandOff(Vec<u8>),
    Retained(Arc<[u8]>),
}

impl Pickle {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Pickle::HandOff(v) => v,
            Pickle::Retained(a) => a,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// A pickle shorter than this is treated as absent (spec.md §3, §4.5).
    pub const MIN_LEN: usize = 2;

    pub fn is_present(&self) -> bool {
        self.len() >= Self::MIN_LEN
    }

    /// Promote to the cheaply-cloneable retained form, for storing as the
    /// entry's best-so-far candidate.
    pub fn retain(&self) -> Pickle {
        match self {
            Pickle::HandOff(v) => Pickle::Retained(Arc::from(v.as_slice())),
            Pickle::Retained(a) => Pickle::Retained(Arc::clone(a)),
        }
    }
}

impl Serialize for Pickle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.as_bytes())
    }
}

impl<'de> serde::Deserialize<'de> for Pickle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BufVisitor;
        impl<'de> Visitor<'de> for BufVisitor {
            type Value = Pickle;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a record pickle byte buffer")
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Pickle, E> {
                Ok(Pickle::HandOff(v))
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Pickle, E> {
                Ok(Pickle::HandOff(v.to_vec()))
            }
        }
        deserializer.deserialize_byte_buf(BufVisitor)
    }
}
