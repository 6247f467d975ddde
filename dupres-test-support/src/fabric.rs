use std::sync::Mutex;

use dupres_base::PeerId;
use dupres_coordinator::Fabric;
use dupres_wire::FabricMsg;

/// Records every message handed to it instead of putting it on a wire.
#[derive(Default)]
pub struct MockFabric {
    sent: Mutex<Vec<(PeerId, FabricMsg)>>,
}

impl MockFabric {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(PeerId, FabricMsg)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn take_sent(&self) -> Vec<(PeerId, FabricMsg)> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

impl Fabric for MockFabric {
    fn send(&self, peer: PeerId, msg: FabricMsg) {
        self.sent.lock().unwrap().push((peer, msg));
    }
}
