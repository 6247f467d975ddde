use dupres_base::{Digest, NsId, Tid};
use dupres_wire::ResultCode;

/// The pipeline-side reactions to a duplicate-resolution transaction ending,
/// restarting, or timing out. `Origin` is the opaque client-origin handle
/// the pipeline moved into the entry at setup (spec.md §4.4.2); this crate
/// never inspects it, only moves it around.
pub trait DupResCallbacks<Origin>: Send + Sync {
    /// Whether `result` indicates cluster state stale enough that the whole
    /// transaction should restart from the top rather than be treated as
    /// this peer's final outcome (spec.md §4.4.3 step 6).
    fn should_retry(&self, result: ResultCode) -> bool;

    /// The retry decision fired: hand `origin` back to the pipeline with a
    /// restart flag set, for a fresh transaction on `(ns_id, digest)`.
    fn restart(&self, origin: Origin, ns_id: NsId, digest: Digest, tid: Tid);

    /// All acks arrived (or the best one failed) and winner application (if
    /// any) has run; `result` is the client-visible mapped result. Returns
    /// whether the entry should be removed from the in-flight table — false
    /// if it has transitioned into a follow-on phase that keeps it
    /// discoverable (spec.md §4.4.3 step 12).
    fn on_complete(&self, origin: Origin, ns_id: NsId, digest: Digest, tid: Tid, result: ResultCode) -> bool;

    /// The retransmit/timeout thread expired `end_time` before completion
    /// (spec.md §4.4.4).
    fn on_timeout(&self, origin: Origin, ns_id: NsId, digest: Digest, tid: Tid);
}
