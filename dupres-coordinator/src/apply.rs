use dupres_arbiter::Policy;
use dupres_base::Digest;
use dupres_store::{RecordStore, RemoteRecord};
use dupres_wire::{DupAck, InfoFlags, ResultCode};

/// Winner application (spec.md §4.5): install the best ack's record if it's
/// better than (or as good as) what's stored locally.
///
/// Benign "already as good" outcomes (`RecordExists`, `Generation`) are
/// mapped to `Ok` here — from the coordinator's perspective both mean the
/// transaction succeeded as a no-op.
pub fn apply_winner(store: &dyn RecordStore, digest: Digest, best: &DupAck, policy: Policy) -> ResultCode {
    let pickle = match &best.record {
        Some(p) if p.is_present() => p,
        _ => return ResultCode::UnknownFail,
    };

    let info = best.info.unwrap_or_default();
    if info.has(InfoFlags::BINLESS_PICKLE) {
        return ResultCode::UnknownFail;
    }

    let meta = match best.meta {
        Some(m) => m,
        None => return ResultCode::UnknownFail,
    };

    let remote = RemoteRecord {
        meta,
        pickle: pickle.clone(),
        set_name: best.set_name.clone(),
        key: best.key.clone(),
        void_time: best.void_time,
    };

    match store.replace_if_better(digest, &remote, policy) {
        ResultCode::RecordExists | ResultCode::Generation => ResultCode::Ok,
        other => other,
    }
}
