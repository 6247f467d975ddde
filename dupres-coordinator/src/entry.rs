use smallvec::SmallVec;
use std::sync::Mutex;

use dupres_base::{Digest, NsId, PeerId, Tid};
use dupres_store::Reservation;
use dupres_wire::{DupAck, DupReq, ResultCode};

/// Small, usually-inline storage for the duplicate set: almost every
/// namespace runs with two or three replicas, so four inline slots avoid a
/// heap allocation per transaction in the common case. Unlike a peer-sized
/// count straight off the wire, this capacity is chosen locally from the
/// reservation's own duplicate list, never from untrusted input.
pub type DestNodes = SmallVec<[PeerId; 4]>;

/// One in-flight read/write transaction awaiting duplicate resolution
/// (spec.md §4.2/§4.4). `Origin` is the opaque client-origin handle moved
/// in at setup; this crate never interprets it.
pub struct Entry<Origin> {
    pub ns_id: NsId,
    pub digest: Digest,
    inner: Mutex<Inner<Origin>>,
}

pub(crate) struct Inner<Origin> {
    pub tid: Tid,
    pub from: Option<Origin>,
    pub reservation: Option<Reservation>,
    pub req: DupReq,
    pub dest_nodes: DestNodes,
    pub dest_complete: SmallVec<[bool; 4]>,
    pub best: Option<DupAck>,
    pub xmit_ms: u64,
    pub retry_interval_ms: u64,
    pub end_time_ms: u64,
    pub dup_res_complete: bool,
    pub result_code: Option<ResultCode>,
}

impl<Origin> Entry<Origin> {
    pub(crate) fn new(
        tid: Tid,
        from: Origin,
        req: DupReq,
        reservation: Reservation,
        dest_nodes: DestNodes,
        retry_interval_ms: u64,
        now_ms: u64,
        end_time_ms: u64,
    ) -> Self {
        let n = dest_nodes.len();
        Entry {
            ns_id: req.ns_id,
            digest: req.digest,
            inner: Mutex::new(Inner {
                tid,
                from: Some(from),
                reservation: Some(reservation),
                req,
                dest_nodes,
                dest_complete: SmallVec::from_elem(false, n),
                best: None,
                xmit_ms: now_ms + retry_interval_ms,
                retry_interval_ms,
                end_time_ms,
                dup_res_complete: false,
                result_code: None,
            }),
        }
    }

    pub(crate) fn lock(&self) -> std::sync::MutexGuard<'_, Inner<Origin>> {
        self.inner.lock().unwrap()
    }

    pub fn tid(&self) -> Tid {
        self.lock().tid
    }

    pub fn is_complete(&self) -> bool {
        self.lock().dup_res_complete
    }
}

impl<Origin> Inner<Origin> {
    pub(crate) fn index_of(&self, peer: PeerId) -> Option<usize> {
        self.dest_nodes.iter().position(|&p| p == peer)
    }

    pub(crate) fn all_complete(&self) -> bool {
        self.dest_complete.iter().all(|&c| c)
    }
}
