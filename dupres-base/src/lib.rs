mod digest;
mod error;
mod ids;

pub use digest::Digest;
pub use error::{err, Error, Result};
pub use ids::{NsId, PeerId, Tid};
