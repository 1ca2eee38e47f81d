use serde::Deserialize;

use super::load_error::{LoadError, LoadErrorImpl};
use crate::op_proto::OpProto;

/// Top-level structure of a JSON registry dump.
#[derive(Deserialize)]
struct RegistryDump {
    ops: Vec<OpProto>,
}

/// Read operator metadata from a JSON registry dump.
pub fn read_ops(data: &[u8]) -> Result<Vec<OpProto>, LoadError> {
    let dump: RegistryDump = serde_json::from_slice(data).map_err(LoadErrorImpl::JsonParseFailed)?;
    Ok(dump.ops)
}

#[cfg(test)]
mod tests {
    use super::read_ops;
    use crate::op_proto::AttrType;
    use crate::op_registry::LoadErrorKind;

    #[test]
    fn test_read_ops() {
        let json = br#"{
            "ops": [
                {
                    "type": "uniform_random",
                    "comment": "UniformRandom Operator.",
                    "outputs": [{"name": "Out", "comment": "Output tensor"}],
                    "attrs": [
                        {"name": "min", "type": "float", "comment": "(float, default -1.0) Minimum value"},
                        {"name": "shape", "type": "longs"}
                    ]
                },
                {"type": "sum", "inputs": [{"name": "X"}], "outputs": [{"name": "Out"}]}
            ]
        }"#;
        let ops = read_ops(json).unwrap();

        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].op_type, "uniform_random");
        assert!(ops[0].inputs.is_empty());
        assert_eq!(ops[0].attrs[1].attr_type, AttrType::Longs);
        assert_eq!(ops[0].attrs[1].comment, "");
        assert_eq!(ops[1].inputs[0].name, "X");
    }

    #[test]
    fn test_read_ops_invalid() {
        for json in [
            &br#"{"ops": [{"inputs": []}]}"#[..],
            br#"{"ops": [{"type": "x", "attrs": [{"name": "a", "type": "tensor"}]}]}"#,
            br#"[1, 2"#,
        ] {
            let err = read_ops(json).unwrap_err();
            assert_eq!(err.kind(), LoadErrorKind::ParseError);
        }
    }
}
