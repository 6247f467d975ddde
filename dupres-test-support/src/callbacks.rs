use std::collections::HashSet;
use std::sync::Mutex;

use dupres_base::{Digest, NsId, Tid};
use dupres_coordinator::DupResCallbacks;
use dupres_wire::ResultCode;

/// A `DupResCallbacks` that records every completion, timeout, and restart
/// it is invoked with, for assertion in tests. `retry_on` names the result
/// codes that should trigger a transaction restart.
pub struct RecordingCallbacks<Origin> {
    retry_on: HashSet<ResultCodeKey>,
    completions: Mutex<Vec<(NsId, Digest, Tid, ResultCode)>>,
    timeouts: Mutex<Vec<(NsId, Digest, Tid)>>,
    restarts: Mutex<Vec<(Origin, NsId, Digest, Tid)>>,
}

/// `ResultCode` has a `Storage(u32)` payload variant, so it can't sit in a
/// `HashSet` directly; this mirrors just enough of it to do so.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
enum ResultCodeKey {
    NotFound,
    Generation,
    UnknownFail,
}

fn key_of(rc: ResultCode) -> Option<ResultCodeKey> {
    match rc {
        ResultCode::NotFound => Some(ResultCodeKey::NotFound),
        ResultCode::Generation => Some(ResultCodeKey::Generation),
        ResultCode::UnknownFail => Some(ResultCodeKey::UnknownFail),
        _ => None,
    }
}

impl<Origin> Default for RecordingCallbacks<Origin> {
    fn default() -> Self {
        RecordingCallbacks {
            retry_on: HashSet::new(),
            completions: Mutex::new(Vec::new()),
            timeouts: Mutex::new(Vec::new()),
            restarts: Mutex::new(Vec::new()),
        }
    }
}

impl<Origin> RecordingCallbacks<Origin> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retrying_on(mut self, codes: &[ResultCode]) -> Self {
        self.retry_on = codes.iter().copied().filter_map(key_of).collect();
        self
    }

    pub fn completions(&self) -> Vec<(NsId, Digest, Tid, ResultCode)> {
        self.completions.lock().unwrap().clone()
    }

    pub fn timeouts(&self) -> Vec<(NsId, Digest, Tid)> {
        self.timeouts.lock().unwrap().clone()
    }

    pub fn restart_count(&self) -> usize {
        self.restarts.lock().unwrap().len()
    }
}

impl<Origin: Send> DupResCallbacks<Origin> for RecordingCallbacks<Origin> {
    fn should_retry(&self, result: ResultCode) -> bool {
        key_of(result).is_some_and(|k| self.retry_on.contains(&k))
    }

    fn restart(&self, origin: Origin, ns_id: NsId, digest: Digest, tid: Tid) {
        self.restarts.lock().unwrap().push((origin, ns_id, digest, tid));
    }

    fn on_complete(&self, _origin: Origin, ns_id: NsId, digest: Digest, tid: Tid, result: ResultCode) -> bool {
        self.completions.lock().unwrap().push((ns_id, digest, tid, result));
        true
    }

    fn on_timeout(&self, _origin: Origin, ns_id: NsId, digest: Digest, tid: Tid) {
        self.timeouts.lock().unwrap().push((ns_id, digest, tid));
    }
}
