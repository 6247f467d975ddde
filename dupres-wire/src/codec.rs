use dupres_base::Result;

use crate::message::FabricMsg;

/// Encode a message to its on-the-wire byte form. Mirrors the teacher's
/// `Node::send_msg`: the caller owns the returned buffer and is responsible
/// for handing it to the fabric.
pub fn encode(msg: &FabricMsg) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec(msg)?)
}

/// Decode a message received from the fabric. A malformed buffer is a
/// caller-visible error; callers treat it as a bad request (responder side)
/// or drop it with a warning (coordinator side) per spec.md §4.1.
pub fn decode(buf: &[u8]) -> Result<FabricMsg> {
    Ok(rmp_serde::from_slice(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{DupAck, DupReq};
    use crate::meta::Meta;
    use crate::pickle::Pickle;
    use dupres_base::{Digest, NsId, Tid};
    use proptest::prelude::*;

    #[test]
    fn round_trips_dup_req() {
        let req = DupReq {
            namespace: "test".to_string(),
            ns_id: NsId(1),
            digest: Digest([9u8; 20]),
            tid: Tid(42),
            cluster_key: 0,
            local_meta: Some(Meta::new(3, 100)),
        };
        let encoded = encode(&FabricMsg::DupReq(req.clone())).unwrap();
        let decoded = decode(&encoded).unwrap();
        match decoded {
            FabricMsg::DupReq(d) => {
                assert_eq!(d.ns_id, req.ns_id);
                assert_eq!(d.digest, req.digest);
                assert_eq!(d.tid, req.tid);
                assert_eq!(d.local_meta, req.local_meta);
            }
            FabricMsg::DupAck(_) => panic!("expected DupReq"),
        }
    }

    #[test]
    fn round_trips_dup_ack_with_pickle() {
        let ack = DupAck {
            ns_id: NsId(1),
            digest: Digest([1u8; 20]),
            tid: Tid(7),
            result: crate::result_code::ResultCode::Ok,
            meta: Some(Meta::new(5, 200)),
            record: Some(Pickle::HandOff(vec![1, 2, 3, 4])),
            set_name: Some("users".to_string()),
            key: Some(vec![0xde, 0xad]),
            void_time: None,
            info: None,
        };
        let encoded = encode(&FabricMsg::DupAck(ack)).unwrap();
        let decoded = decode(&encoded).unwrap().into_dup_ack().unwrap();
        assert_eq!(decoded.record.unwrap().as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(decoded.set_name.as_deref(), Some("users"));
    }

    #[test]
    fn decode_garbage_is_an_error() {
        assert!(decode(&[0xff, 0xff, 0xff]).is_err());
    }

    proptest! {
        #[test]
        fn dup_ack_round_trips_for_any_fields(
            ns_id in any::<u32>(),
            digest_bytes in proptest::array::uniform20(any::<u8>()),
            tid in any::<u32>(),
            generation in any::<u16>(),
            last_update_time in any::<u64>(),
            pickle_bytes in proptest::collection::vec(any::<u8>(), 0..32),
            void_time in any::<u32>(),
        ) {
            let ack = DupAck {
                ns_id: NsId(ns_id),
                digest: Digest(digest_bytes),
                tid: Tid(tid),
                result: crate::result_code::ResultCode::Ok,
                meta: Some(Meta::new(generation, last_update_time)),
                record: Some(Pickle::HandOff(pickle_bytes.clone())),
                set_name: None,
                key: None,
                void_time: if void_time == 0 { None } else { Some(void_time) },
                info: None,
            };
            let encoded = encode(&FabricMsg::DupAck(ack.clone())).unwrap();
            let decoded = decode(&encoded).unwrap().into_dup_ack().unwrap();
            prop_assert_eq!(decoded.ns_id, ack.ns_id);
            prop_assert_eq!(decoded.digest, ack.digest);
            prop_assert_eq!(decoded.tid, ack.tid);
            prop_assert_eq!(decoded.meta, ack.meta);
            prop_assert_eq!(decoded.record.unwrap().as_bytes(), pickle_bytes.as_slice());
            prop_assert_eq!(decoded.void_time, ack.void_time);
        }
    }
}
