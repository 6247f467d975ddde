use std::fmt;

use dupres_arbiter::Policy;
use dupres_base::{Digest, Result as BaseResult};

use crate::record::{RemoteRecord, StoredRecord};
use crate::reservation::Reservation;

/// A storage error, carrying the positive error code the responder forwards
/// verbatim as the ack's `RESULT` (spec.md §4.3 step 6).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StoreError(pub u32);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage error {}", self.0)
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// The on-disk record store and partition ownership, as seen by this core.
/// Real storage engines, partition rebalancing, and the tree's internal
/// locking are all external collaborators (spec.md §1); this trait is the
/// whole of the core's contract with them.
pub trait RecordStore: Send + Sync {
    /// Reserve the partition holding `digest`. Failing to acquire a
    /// reservation is an infrastructure error, not a `RESULT` code.
    fn reserve(&self, digest: Digest) -> BaseResult<Reservation>;

    /// Read the current record for `digest`, if any.
    fn get(&self, digest: Digest) -> StoreResult<Option<StoredRecord>>;

    /// Install `candidate` if it's better than (or equal to) what's stored,
    /// per `policy`. Returns `Ok`, a benign "already as good" code
    /// (`RecordExists` / `Generation`), or a fatal code — never a bare Rust
    /// error, since from the coordinator's perspective every outcome here
    /// is a `RESULT` value to propagate (spec.md §4.5).
    fn replace_if_better(
        &self,
        digest: Digest,
        candidate: &RemoteRecord,
        policy: Policy,
    ) -> dupres_wire::ResultCode;
}
