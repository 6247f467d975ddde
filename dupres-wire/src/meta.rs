use serde::{Deserialize, Serialize};

/// A record's revision and recency: the two inputs the arbiter compares.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub generation: u16,
    pub last_update_time: u64,
}

impl Meta {
    pub fn new(generation: u16, last_update_time: u64) -> Self {
        Meta {
            generation,
            last_update_time,
        }
    }
}
