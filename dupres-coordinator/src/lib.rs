mod apply;
mod callbacks;
mod coordinator;
mod entry;
mod fabric;
mod request;
mod table;

pub use apply::apply_winner;
pub use callbacks::DupResCallbacks;
pub use coordinator::{Coordinator, RetryConfig};
pub use entry::{DestNodes, Entry};
pub use fabric::Fabric;
pub use request::make_message;
