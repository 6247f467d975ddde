use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dupres_base::{Digest, NsId};

use crate::entry::Entry;

/// The in-flight transaction table, keyed by `(ns_id, digest)` (spec.md
/// §4.2, §5). `lookup` hands back a cloned `Arc`, which stands in for the
/// spec's "lookup-and-reference with incremented refcount" — the clone
/// itself is the reference; it drops when the caller is done.
pub(crate) struct Table<Origin> {
    entries: Mutex<HashMap<(NsId, Digest), Arc<Entry<Origin>>>>,
}

impl<Origin> Default for Table<Origin> {
    fn default() -> Self {
        Table {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<Origin> Table<Origin> {
    pub(crate) fn insert(&self, entry: Arc<Entry<Origin>>) {
        self.entries.lock().unwrap().insert((entry.ns_id, entry.digest), entry);
    }

    pub(crate) fn lookup(&self, ns_id: NsId, digest: Digest) -> Option<Arc<Entry<Origin>>> {
        self.entries.lock().unwrap().get(&(ns_id, digest)).cloned()
    }

    pub(crate) fn remove(&self, ns_id: NsId, digest: Digest) {
        self.entries.lock().unwrap().remove(&(ns_id, digest));
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<Entry<Origin>>> {
        self.entries.lock().unwrap().values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}
