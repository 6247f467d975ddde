use dupres_base::{Digest, NsId, Tid};
use dupres_wire::{DupReq, Meta};

/// Composes the outbound `DUP_REQ` for a transaction descriptor (spec.md
/// §4.4.1). `cluster_key` is a legacy compatibility field, unused by
/// current peers but still sent for old-peer wire compatibility.
pub fn make_message(
    namespace: String,
    ns_id: NsId,
    digest: Digest,
    tid: Tid,
    cluster_key: u64,
    local_meta: Option<Meta>,
) -> DupReq {
    DupReq {
        namespace,
        ns_id,
        digest,
        tid,
        cluster_key,
        local_meta,
    }
}
