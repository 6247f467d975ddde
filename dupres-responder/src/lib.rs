use dupres_arbiter::{resolve, Winner};
use dupres_base::{NsId, PeerId, Tid};
use dupres_store::{RecordStore, StoreError};
use dupres_wire::{DupAck, DupReq, Meta, Pickle, ResultCode};

/// Answers one peer's `DUP_REQ` against the local store (spec.md §4.3).
///
/// Holds no state of its own beyond the scoped reservation: every exit path,
/// including the early-return ones, releases it by falling out of scope.
pub fn handle_request(
    _peer: PeerId,
    req: &DupReq,
    store: &dyn RecordStore,
) -> DupAck {
    let ns_id = req.ns_id;
    let digest = req.digest;
    let tid = req.tid;

    let reservation = match store.reserve(digest) {
        Ok(r) => r,
        Err(err) => {
            tracing::warn!(?err, "reserve failed while handling dup_req");
            return DupAck::bad_request(ns_id, digest, tid);
        }
    };

    let record = match store.get(digest) {
        Ok(Some(record)) => record,
        Ok(None) => {
            drop(reservation);
            return DupAck::simple(ns_id, digest, tid, ResultCode::NotFound);
        }
        Err(StoreError(code)) => {
            drop(reservation);
            return DupAck::simple(ns_id, digest, tid, ResultCode::Storage(code));
        }
    };

    if let Some(local_meta) = req.local_meta {
        let winner = resolve(
            policy_for(ns_id),
            local_meta.generation,
            local_meta.last_update_time,
            record.meta.generation,
            record.meta.last_update_time,
        );
        match winner {
            Winner::Left | Winner::Equal => {
                let result = if matches!(winner, Winner::Equal) {
                    ResultCode::RecordExists
                } else {
                    ResultCode::Generation
                };
                drop(reservation);
                return DupAck::simple(ns_id, digest, tid, result);
            }
            Winner::Right => {}
        }
    }

    let ack = DupAck {
        ns_id,
        digest,
        tid,
        result: ResultCode::Ok,
        meta: Some(Meta::new(record.meta.generation, record.meta.last_update_time)),
        record: Some(Pickle::HandOff(record.pickle.as_bytes().to_vec())),
        set_name: record.set_name.clone(),
        key: record.key.clone(),
        void_time: if record.void_time.unwrap_or(0) != 0 {
            record.void_time
        } else {
            None
        },
        info: if record.info.is_empty() {
            None
        } else {
            Some(record.info)
        },
    };

    // Bin-count/read-handle steps from the source protocol collapse into the
    // single `store.get` above: this core never opens bins itself.
    drop(reservation);
    ack
}

/// Placeholder for the namespace-to-policy lookup (an external collaborator
/// in the real system, spec.md §1). Every namespace uses the default policy
/// until per-namespace configuration lands.
fn policy_for(_ns_id: NsId) -> dupres_arbiter::Policy {
    dupres_arbiter::Policy::GenerationThenTime
}
