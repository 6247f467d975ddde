use serde::{Deserialize, Serialize};

use dupres_base::{Digest, NsId, Tid};

use crate::info::InfoFlags;
use crate::meta::Meta;
use crate::pickle::Pickle;
use crate::result_code::ResultCode;

/// `DUP_REQ`: the coordinator's outbound request for a key undergoing
/// duplicate resolution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DupReq {
    pub namespace: String,
    pub ns_id: NsId,
    pub digest: Digest,
    pub tid: Tid,
    /// Legacy compatibility field, ignored by current peers (spec.md §9
    /// open question). Kept for the wire-compatibility window with
    /// pre-reconfiguration peer versions; drop once that window closes.
    pub cluster_key: u64,
    /// Present iff the coordinator holds a local copy of the record.
    pub local_meta: Option<Meta>,
}

/// `DUP_ACK`: a peer's reply to a `DUP_REQ`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DupAck {
    pub ns_id: NsId,
    pub digest: Digest,
    pub tid: Tid,
    pub result: ResultCode,
    pub meta: Option<Meta>,
    pub record: Option<Pickle>,
    pub set_name: Option<String>,
    pub key: Option<Vec<u8>>,
    pub void_time: Option<u32>,
    pub info: Option<InfoFlags>,
}

impl DupAck {
    /// A best-effort error ack for a malformed request, preserving whatever
    /// identity fields could be extracted. Spec.md §4.3 step 1 and §9's
    /// second open question: the source used `UNKNOWN_FAIL` here without
    /// being sure it was the right code; that behavior is preserved.
    pub fn bad_request(ns_id: NsId, digest: Digest, tid: Tid) -> Self {
        DupAck {
            ns_id,
            digest,
            tid,
            result: ResultCode::UnknownFail,
            meta: None,
            record: None,
            set_name: None,
            key: None,
            void_time: None,
            info: None,
        }
    }

    pub fn simple(ns_id: NsId, digest: Digest, tid: Tid, result: ResultCode) -> Self {
        DupAck {
            ns_id,
            digest,
            tid,
            result,
            meta: None,
            record: None,
            set_name: None,
            key: None,
            void_time: None,
            info: None,
        }
    }

    /// Makes a copy of this ack whose pickle (if any) is in the cheaply
    /// cloneable retained form, for storing as an entry's best candidate.
    pub fn into_retained(mut self) -> Self {
        self.record = self.record.map(|p| p.retain());
        self
    }
}

/// The envelope every fabric send/receive moves: a typed request or ack.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum FabricMsg {
    DupReq(DupReq),
    DupAck(DupAck),
}

impl FabricMsg {
    pub fn as_dup_req(&self) -> Option<&DupReq> {
        match self {
            FabricMsg::DupReq(r) => Some(r),
            FabricMsg::DupAck(_) => None,
        }
    }

    pub fn as_dup_ack(&self) -> Option<&DupAck> {
        match self {
            FabricMsg::DupAck(a) => Some(a),
            FabricMsg::DupReq(_) => None,
        }
    }

    pub fn into_dup_ack(self) -> Option<DupAck> {
        match self {
            FabricMsg::DupAck(a) => Some(a),
            FabricMsg::DupReq(_) => None,
        }
    }
}
