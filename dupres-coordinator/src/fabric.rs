use dupres_base::PeerId;
use dupres_wire::FabricMsg;

/// The inter-node transport: an external collaborator this core only ever
/// hands completed messages to. The coordinator never owns a transport of
/// its own — it is handed one.
pub trait Fabric: Send + Sync {
    fn send(&self, peer: PeerId, msg: FabricMsg);
}
