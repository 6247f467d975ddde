use serde::{Deserialize, Serialize, Serializer};

/// The `RESULT` field's taxonomy (spec.md §7). `Storage` carries the
/// positive equivalent of whatever negative error value the record store
/// raised; it has no fixed wire value of its own.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResultCode {
    Ok,
    NotFound,
    RecordExists,
    Generation,
    UnknownFail,
    Storage(u32),
}

const WIRE_OK: u32 = 0;
const WIRE_NOT_FOUND: u32 = 2;
const WIRE_GENERATION: u32 = 3;
const WIRE_RECORD_EXISTS: u32 = 5;
const WIRE_UNKNOWN_FAIL: u32 = 255;

impl ResultCode {
    pub fn is_ok(self) -> bool {
        matches!(self, ResultCode::Ok)
    }

    pub fn to_wire(self) -> u32 {
        match self {
            ResultCode::Ok => WIRE_OK,
            ResultCode::NotFound => WIRE_NOT_FOUND,
            ResultCode::Generation => WIRE_GENERATION,
            ResultCode::RecordExists => WIRE_RECORD_EXISTS,
            ResultCode::UnknownFail => WIRE_UNKNOWN_FAIL,
            ResultCode::Storage(code) => code,
        }
    }

    pub fn from_wire(v: u32) -> Self {
        match v {
            WIRE_OK => ResultCode::Ok,
            WIRE_NOT_FOUND => ResultCode::NotFound,
            WIRE_GENERATION => ResultCode::Generation,
            WIRE_RECORD_EXISTS => ResultCode::RecordExists,
            WIRE_UNKNOWN_FAIL => ResultCode::UnknownFail,
            other => ResultCode::Storage(other),
        }
    }
}

impl Serialize for ResultCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.to_wire())
    }
}

impl<'de> Deserialize<'de> for ResultCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = u32::deserialize(deserializer)?;
        Ok(ResultCode::from_wire(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        for rc in [
            ResultCode::Ok,
            ResultCode::NotFound,
            ResultCode::Generation,
            ResultCode::RecordExists,
            ResultCode::UnknownFail,
            ResultCode::Storage(17),
        ] {
            assert_eq!(ResultCode::from_wire(rc.to_wire()), rc);
        }
    }
}
