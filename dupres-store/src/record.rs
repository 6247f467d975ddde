use dupres_wire::{InfoFlags, Meta, Pickle};

/// A record as read from the local store.
#[derive(Clone, Debug)]
pub struct StoredRecord {
    pub meta: Meta,
    pub pickle: Pickle,
    pub set_name: Option<String>,
    pub key: Option<Vec<u8>>,
    pub void_time: Option<u32>,
    pub info: InfoFlags,
}

/// A record as described by a remote ack, ready to be installed locally if
/// it wins under the arbiter.
#[derive(Clone, Debug)]
pub struct RemoteRecord {
    pub meta: Meta,
    pub pickle: Pickle,
    pub set_name: Option<String>,
    pub key: Option<Vec<u8>>,
    pub void_time: Option<u32>,
}
