use serde::{Deserialize, Serialize};

/// The `INFO` bitfield: tombstone / binless-pickle flags. Omitted from the
/// wire entirely when zero (spec.md §6).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct InfoFlags(pub u32);

impl InfoFlags {
    pub const TOMBSTONE: InfoFlags = InfoFlags(1 << 0);
    pub const BINLESS_PICKLE: InfoFlags = InfoFlags(1 << 1);

    pub fn has(self, flag: InfoFlags) -> bool {
        self.0 & flag.0 != 0
    }

    pub fn union(self, other: InfoFlags) -> InfoFlags {
        InfoFlags(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
