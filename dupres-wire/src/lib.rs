mod codec;
mod info;
mod message;
mod meta;
mod pickle;
mod result_code;

pub use codec::{decode, encode};
pub use info::InfoFlags;
pub use message::{DupAck, DupReq, FabricMsg};
pub use meta::Meta;
pub use pickle::Pickle;
pub use result_code::ResultCode;
