use std::sync::Arc;
use std::time::Duration;

use dupres_arbiter::{resolve, Policy, Winner};
use dupres_base::{NsId, PeerId, Tid};
use dupres_store::{RecordStore, Reservation};
use dupres_wire::{DupAck, DupReq, FabricMsg, ResultCode};

use crate::apply::apply_winner;
use crate::callbacks::DupResCallbacks;
use crate::entry::{DestNodes, Entry};
use crate::fabric::Fabric;
use crate::table::Table;

/// How long to wait before resending, and how long to wait before giving
/// up: a plain value passed in by the pipeline, not a global.
#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    pub retry_interval: Duration,
    pub timeout: Duration,
}

/// The coordinator side of duplicate resolution (spec.md §4.4): owns the
/// in-flight table and drives every entry through setup, ack handling, and
/// retransmit/timeout.
pub struct Coordinator<Origin, S, F, C> {
    table: Table<Origin>,
    store: Arc<S>,
    fabric: Arc<F>,
    callbacks: Arc<C>,
}

impl<Origin, S, F, C> Coordinator<Origin, S, F, C>
where
    S: RecordStore,
    F: Fabric,
    C: DupResCallbacks<Origin>,
{
    pub fn new(store: Arc<S>, fabric: Arc<F>, callbacks: Arc<C>) -> Self {
        Coordinator {
            table: Table::default(),
            store,
            fabric,
            callbacks,
        }
    }

    pub fn in_flight_count(&self) -> usize {
        self.table.len()
    }

    /// Moves the transaction descriptor's resources into a fresh rw-request
    /// entry and publishes it to the in-flight table (spec.md §4.4.2).
    /// Sends the initial request to every destination node.
    #[allow(clippy::too_many_arguments)]
    pub fn setup_rw(
        &self,
        origin: Origin,
        req: DupReq,
        reservation: Reservation,
        dest_nodes: DestNodes,
        retry: RetryConfig,
        now_ms: u64,
    ) -> Arc<Entry<Origin>> {
        let tid = req.tid;
        let retry_interval_ms = retry.retry_interval.as_millis() as u64;
        let end_time_ms = now_ms + retry.timeout.as_millis() as u64;

        for &peer in dest_nodes.iter() {
            self.fabric.send(peer, FabricMsg::DupReq(req.clone()));
        }

        let entry = Arc::new(Entry::new(
            tid,
            origin,
            req,
            reservation,
            dest_nodes,
            retry_interval_ms,
            now_ms,
            end_time_ms,
        ));
        self.table.insert(Arc::clone(&entry));
        entry
    }

    /// Processes one peer's ack (spec.md §4.4.3).
    pub fn handle_ack(&self, peer: PeerId, mut ack: DupAck, policy: Policy) {
        let ns_id = ack.ns_id;
        let digest = ack.digest;
        let tid = ack.tid;

        let entry = match self.table.lookup(ns_id, digest) {
            Some(e) => e,
            None => {
                tracing::warn!(?ns_id, "ack for unknown or already-removed transaction");
                return;
            }
        };

        let mut inner = entry.lock();

        // Step 1: prior or already-finished transaction on this key.
        if inner.tid != tid || inner.dup_res_complete {
            return;
        }

        // Step 2: unrecognized duplicate peer.
        let i = match inner.index_of(peer) {
            Some(i) => i,
            None => {
                tracing::warn!(?peer, "ack from peer not in this transaction's duplicate set");
                return;
            }
        };

        // Step 3/4: idempotence.
        if inner.dest_complete[i] {
            return;
        }
        inner.dest_complete[i] = true;

        // Step 5: parse ack meta. An `OK` ack missing a usable
        // `(generation, last_update_time)` (or with `generation == 0`, which
        // spec.md §4.4.3 step 5 treats as absent) is downgraded to
        // `UnknownFail` here, ahead of both the retry decision and
        // incorporate-candidate, so it can never become `best` or bypass
        // this guard by arriving first.
        if ack.result == ResultCode::Ok && !ack.meta.is_some_and(|m| m.generation > 0) {
            ack.result = ResultCode::UnknownFail;
        }

        // Step 6: retry decision, on the now-normalized result.
        if self.callbacks.should_retry(ack.result) {
            let from = match inner.from.take() {
                Some(from) => from,
                None => return, // timeout thread already owns completion
            };
            inner.dup_res_complete = true;
            drop(inner);
            self.table.remove(ns_id, digest);
            self.callbacks.restart(from, ns_id, digest, tid);
            return;
        }

        // Step 7: incorporate candidate.
        let candidate_wins = match &inner.best {
            None => true,
            Some(current) => match (ack_rank(&ack), ack_rank(current)) {
                (Some(c), Some(b)) => {
                    matches!(resolve(policy, c.0, c.1, b.0, b.1), Winner::Left)
                }
                (Some(_), None) => true,
                (None, _) => false,
            },
        };
        if candidate_wins {
            inner.best = Some(ack.into_retained());
        }

        // Step 8: completion check.
        if !inner.all_complete() {
            return;
        }

        // Step 9: apply. A benign non-apply outcome (`RecordExists` /
        // `Generation`, e.g. from a correctly pre-checked peer) is mapped to
        // `Ok` here too, not only on the apply path in apply.rs — both mean
        // "the local copy already dominates," a successful no-op (spec.md
        // §7, §4.5, scenario S2).
        let result = match inner.best.clone() {
            Some(best) if best.result == ResultCode::Ok => {
                apply_winner(self.store.as_ref(), digest, &best, policy)
            }
            Some(best) => match best.result {
                ResultCode::RecordExists | ResultCode::Generation => ResultCode::Ok,
                other => other,
            },
            None => ResultCode::UnknownFail,
        };
        inner.result_code = Some(result);

        // Step 10: timeout race — whichever thread clears `from` first owns
        // completion.
        let from = match inner.from.take() {
            Some(from) => from,
            None => return,
        };

        // Step 11/12/13: invoke completion callback, remove if requested.
        inner.dup_res_complete = true;
        drop(inner);
        let remove = self.callbacks.on_complete(from, ns_id, digest, tid, result);
        if remove {
            self.table.remove(ns_id, digest);
        }
    }

    /// Scans every in-flight entry, resending requests past their `xmit_ms`
    /// deadline and expiring those past `end_time_ms` (spec.md §4.4.4).
    pub fn scan_retransmit(&self, now_ms: u64) {
        for entry in self.table.snapshot() {
            let mut inner = entry.lock();
            if inner.dup_res_complete {
                continue;
            }

            if now_ms > inner.end_time_ms {
                let from = match inner.from.take() {
                    Some(from) => from,
                    None => continue, // an ack-handler thread is already completing it
                };
                inner.dup_res_complete = true;
                let tid = inner.tid;
                drop(inner);
                self.callbacks.on_timeout(from, entry.ns_id, entry.digest, tid);
                self.table.remove(entry.ns_id, entry.digest);
                continue;
            }

            if now_ms >= inner.xmit_ms {
                let req = inner.req.clone();
                for (i, &peer) in inner.dest_nodes.iter().enumerate() {
                    if !inner.dest_complete[i] {
                        self.fabric.send(peer, FabricMsg::DupReq(req.clone()));
                    }
                }
                inner.xmit_ms += inner.retry_interval_ms;
            }
        }
    }
}

/// The `(generation, last_update_time)` this ack can be compared on, or
/// `None` if it carries no usable result to rank (spec.md §4.4.3 step 5).
fn ack_rank(ack: &DupAck) -> Option<(u16, u64)> {
    if ack.result != ResultCode::Ok {
        return None;
    }
    let meta = ack.meta?;
    if meta.generation == 0 {
        return None;
    }
    Some((meta.generation, meta.last_update_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupres_base::Digest;

    #[test]
    fn ack_rank_rejects_non_ok_and_zero_generation() {
        let mut ack = DupAck::simple(NsId(0), Digest::from_bytes(&[1; 20]).unwrap(), Tid(1), ResultCode::NotFound);
        assert!(ack_rank(&ack).is_none());
        ack.result = ResultCode::Ok;
        assert!(ack_rank(&ack).is_none()); // no meta
        ack.meta = Some(dupres_wire::Meta::new(0, 5));
        assert!(ack_rank(&ack).is_none()); // generation 0
        ack.meta = Some(dupres_wire::Meta::new(3, 5));
        assert_eq!(ack_rank(&ack), Some((3, 5)));
    }
}
