mod callbacks;
mod fabric;
pub mod model;

pub use callbacks::RecordingCallbacks;
pub use fabric::MockFabric;
pub use dupres_store::MemStore;
