use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dupres_arbiter::{resolve, Policy, Winner};
use dupres_base::{Digest, Result as BaseResult};
use dupres_wire::ResultCode;

use crate::record::{RemoteRecord, StoredRecord};
use crate::reservation::Reservation;
use crate::store::{RecordStore, StoreResult};

/// A minimal in-memory record store, used by tests across the workspace.
/// Not a production storage engine — the real one is an external
/// collaborator this crate never has to implement.
#[derive(Default)]
pub struct MemStore {
    records: Mutex<HashMap<Digest, StoredRecord>>,
    active_reservations: Arc<AtomicUsize>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, digest: Digest, record: StoredRecord) {
        self.records.lock().unwrap().insert(digest, record);
    }

    /// Number of reservations currently held. Used to check the "every
    /// acquired reservation is released exactly once" invariant in tests.
    pub fn active_reservations(&self) -> usize {
        self.active_reservations.load(Ordering::SeqCst)
    }
}

impl RecordStore for MemStore {
    fn reserve(&self, digest: Digest) -> BaseResult<Reservation> {
        self.active_reservations.fetch_add(1, Ordering::SeqCst);
        let counter = Arc::clone(&self.active_reservations);
        Ok(Reservation::new(digest, move |_| {
            counter.fetch_sub(1, Ordering::SeqCst);
        }))
    }

    fn get(&self, digest: Digest) -> StoreResult<Option<StoredRecord>> {
        Ok(self.records.lock().unwrap().get(&digest).cloned())
    }

    fn replace_if_better(
        &self,
        digest: Digest,
        candidate: &RemoteRecord,
        policy: Policy,
    ) -> ResultCode {
        let mut records = self.records.lock().unwrap();
        let current = records.get(&digest);
        let winner = match current {
            None => Winner::Left, // no local record: candidate trivially wins
            Some(stored) => resolve(
                policy,
                candidate.meta.generation,
                candidate.meta.last_update_time,
                stored.meta.generation,
                stored.meta.last_update_time,
            ),
        };
        match winner {
            Winner::Left => {
                records.insert(
                    digest,
                    StoredRecord {
                        meta: candidate.meta,
                        pickle: candidate.pickle.clone(),
                        set_name: candidate.set_name.clone(),
                        key: candidate.key.clone(),
                        void_time: candidate.void_time,
                        info: Default::default(),
                    },
                );
                ResultCode::Ok
            }
            Winner::Equal => ResultCode::RecordExists,
            Winner::Right => ResultCode::Generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupres_wire::Pickle;

    fn digest(b: u8) -> Digest {
        Digest::from_bytes(&[b; 20]).unwrap()
    }

    fn remote(generation: u16, last_update_time: u64) -> RemoteRecord {
        RemoteRecord {
            meta: dupres_wire::Meta::new(generation, last_update_time),
            pickle: Pickle::HandOff(vec![1, 2]),
            set_name: None,
            key: None,
            void_time: None,
        }
    }

    #[test]
    fn reservation_release_decrements_counter() {
        let store = MemStore::new();
        assert_eq!(store.active_reservations(), 0);
        {
            let _r = store.reserve(digest(1)).unwrap();
            assert_eq!(store.active_reservations(), 1);
        }
        assert_eq!(store.active_reservations(), 0);
    }

    #[test]
    fn replace_installs_strictly_better_candidate() {
        let store = MemStore::new();
        let d = digest(2);
        store.put(
            d,
            StoredRecord {
                meta: dupres_wire::Meta::new(3, 100),
                pickle: Pickle::HandOff(vec![0, 0]),
                set_name: None,
                key: None,
                void_time: None,
                info: Default::default(),
            },
        );
        let rc = store.replace_if_better(d, &remote(5, 200), Policy::GenerationThenTime);
        assert_eq!(rc, ResultCode::Ok);
        assert_eq!(store.get(d).unwrap().unwrap().meta.generation, 5);
    }

    #[test]
    fn replace_rejects_worse_candidate() {
        let store = MemStore::new();
        let d = digest(3);
        store.put(
            d,
            StoredRecord {
                meta: dupres_wire::Meta::new(9, 900),
                pickle: Pickle::HandOff(vec![0, 0]),
                set_name: None,
                key: None,
                void_time: None,
                info: Default::default(),
            },
        );
        let rc = store.replace_if_better(d, &remote(2, 100), Policy::GenerationThenTime);
        assert_eq!(rc, ResultCode::Generation);
        assert_eq!(store.get(d).unwrap().unwrap().meta.generation, 9);
    }
}
