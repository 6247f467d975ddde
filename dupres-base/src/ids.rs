use serde::{Deserialize, Serialize};

/// Namespace index, echoed between request and ack.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct NsId(pub u32);

/// Coordinator-local transaction id, unique within the coordinator and used
/// to disambiguate successive transactions on the same key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Tid(pub u32);

/// A peer node in the fabric. Opaque identity; the fabric is an external
/// collaborator so this core never interprets it beyond equality/ordering.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct PeerId(pub u64);
