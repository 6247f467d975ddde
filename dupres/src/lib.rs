//! The duplicate-resolution core's public facade (spec.md §6): the four
//! entry points a transaction pipeline and fabric dispatcher call into.
//! `Origin` is the opaque client-origin handle the pipeline owns; this
//! crate only ever moves it, never inspects it.

use std::sync::Arc;
use std::time::Duration;

pub use dupres_arbiter::Policy;
pub use dupres_base::{Digest, NsId, PeerId, Tid};
pub use dupres_coordinator::{DestNodes, DupResCallbacks, Entry, Fabric, RetryConfig};
pub use dupres_store::{RecordStore, Reservation};
pub use dupres_wire::{DupAck, DupReq, FabricMsg, Meta, ResultCode};

use dupres_coordinator::Coordinator;

pub struct DupRes<Origin, S, F, C> {
    store: Arc<S>,
    coordinator: Coordinator<Origin, S, F, C>,
}

impl<Origin, S, F, C> DupRes<Origin, S, F, C>
where
    S: RecordStore,
    F: Fabric,
    C: DupResCallbacks<Origin>,
{
    pub fn new(store: Arc<S>, fabric: Arc<F>, callbacks: Arc<C>) -> Self {
        let coordinator = Coordinator::new(Arc::clone(&store), fabric, callbacks);
        DupRes { store, coordinator }
    }

    /// Spec.md §4.4.1: compose the outbound `DUP_REQ`.
    pub fn make_message(
        &self,
        namespace: String,
        ns_id: NsId,
        digest: Digest,
        tid: Tid,
        cluster_key: u64,
        local_meta: Option<Meta>,
    ) -> DupReq {
        dupres_coordinator::make_message(namespace, ns_id, digest, tid, cluster_key, local_meta)
    }

    /// Spec.md §4.4.2: move the transaction descriptor's resources into a
    /// fresh rw-request entry and publish it.
    pub fn setup_rw(
        &self,
        origin: Origin,
        req: DupReq,
        reservation: Reservation,
        dest_nodes: DestNodes,
        retry: RetryConfig,
        now_ms: u64,
    ) -> Arc<Entry<Origin>> {
        self.coordinator
            .setup_rw(origin, req, reservation, dest_nodes, retry, now_ms)
    }

    /// Spec.md §4.3: answer a peer's `DUP_REQ` from the local store.
    pub fn handle_request(&self, peer: PeerId, req: &DupReq) -> DupAck {
        dupres_responder::handle_request(peer, req, self.store.as_ref())
    }

    /// Spec.md §4.4.3: process one peer's ack.
    pub fn handle_ack(&self, peer: PeerId, ack: DupAck, policy: Policy) {
        self.coordinator.handle_ack(peer, ack, policy)
    }

    /// Spec.md §4.4.4: retransmit/timeout sweep, driven by an external
    /// timer thread.
    pub fn scan_retransmit(&self, now_ms: u64) {
        self.coordinator.scan_retransmit(now_ms)
    }

    pub fn in_flight_count(&self) -> usize {
        self.coordinator.in_flight_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupres_store::{MemStore, StoredRecord};
    use dupres_test_support::{MockFabric, RecordingCallbacks};
    use dupres_wire::Pickle;

    fn digest(b: u8) -> Digest {
        Digest::from_bytes(&[b; 20]).unwrap()
    }

    #[test]
    fn full_round_trip_request_then_ack_installs_record() {
        let responder_store = Arc::new(MemStore::new());
        let d = digest(1);
        responder_store.put(
            d,
            StoredRecord {
                meta: Meta::new(7, 1234),
                pickle: Pickle::HandOff(vec![5, 5, 5]),
                set_name: None,
                key: None,
                void_time: None,
                info: Default::default(),
            },
        );
        let responder = DupRes::new(
            Arc::clone(&responder_store),
            Arc::new(MockFabric::new()),
            Arc::new(RecordingCallbacks::<u64>::new()),
        );

        let coordinator_store = Arc::new(MemStore::new());
        let coordinator = DupRes::new(
            Arc::clone(&coordinator_store),
            Arc::new(MockFabric::new()),
            Arc::new(RecordingCallbacks::<u64>::new()),
        );

        let req = coordinator.make_message("test".to_string(), NsId(0), d, Tid(1), 0, None);
        let reservation = coordinator_store.reserve(d).unwrap();
        coordinator.setup_rw(
            1u64,
            req.clone(),
            reservation,
            [PeerId(1)].into_iter().collect(),
            RetryConfig {
                retry_interval: Duration::from_millis(10),
                timeout: Duration::from_secs(1),
            },
            0,
        );

        let ack = responder.handle_request(PeerId(0), &req);
        assert_eq!(ack.result, ResultCode::Ok);

        coordinator.handle_ack(PeerId(1), ack, Policy::GenerationThenTime);

        assert_eq!(coordinator_store.get(d).unwrap().unwrap().meta.generation, 7);
        assert_eq!(coordinator.in_flight_count(), 0);
    }
}
