mod mem;
mod record;
mod reservation;
mod store;

pub use mem::MemStore;
pub use record::{RemoteRecord, StoredRecord};
pub use reservation::Reservation;
pub use store::{RecordStore, StoreError, StoreResult};
