//! Decoding of Protocol Buffers registry dumps.
//!
//! The messages follow the operator registry's `framework.proto` schema:
//!
//! ```proto
//! message OpProto {
//!   message Var {
//!     required string name = 1;
//!     required string comment = 2;
//!     optional bool duplicable = 3;
//!     optional bool intermediate = 4;
//!     optional bool dispensable = 5;
//!   }
//!   message Attr {
//!     required string name = 1;
//!     required AttrType type = 2;
//!     required string comment = 3;
//!     optional bool generated = 4;
//!   }
//!   required string type = 1;
//!   repeated Var inputs = 2;
//!   repeated Var outputs = 3;
//!   repeated Attr attrs = 4;
//!   required string comment = 5;
//! }
//! ```
//!
//! Fields that the generator has no use for (eg. `duplicable`) are skipped.

use super::load_error::{LoadError, LoadErrorImpl};
use crate::op_proto::{AttrProto, AttrType, OpProto, VarProto};
use crate::protobuf::{DecodeMessage, DelimitedMessages, Fields, ProtobufError};

impl OpProto {
    const TYPE: u64 = 1;
    const INPUTS: u64 = 2;
    const OUTPUTS: u64 = 3;
    const ATTRS: u64 = 4;
    const COMMENT: u64 = 5;
}

impl DecodeMessage for OpProto {
    fn decode_fields(mut fields: Fields<'_>) -> Result<Self, ProtobufError> {
        let mut op = OpProto::default();
        while let Some(field) = fields.next()? {
            match field.number() {
                Self::TYPE => op.op_type = field.read_string()?.to_string(),
                Self::INPUTS => op.inputs.push(VarProto::decode_field(&field)?),
                Self::OUTPUTS => op.outputs.push(VarProto::decode_field(&field)?),
                Self::ATTRS => op.attrs.push(AttrProto::decode_field(&field)?),
                Self::COMMENT => op.comment = field.read_string()?.to_string(),
                _ => {}
            }
        }
        Ok(op)
    }
}

impl VarProto {
    const NAME: u64 = 1;
    const COMMENT: u64 = 2;
}

impl DecodeMessage for VarProto {
    fn decode_fields(mut fields: Fields<'_>) -> Result<Self, ProtobufError> {
        let mut var = VarProto::default();
        while let Some(field) = fields.next()? {
            match field.number() {
                Self::NAME => var.name = field.read_string()?.to_string(),
                Self::COMMENT => var.comment = field.read_string()?.to_string(),
                _ => {}
            }
        }
        Ok(var)
    }
}

impl AttrProto {
    const NAME: u64 = 1;
    const TYPE: u64 = 2;
    const COMMENT: u64 = 3;
    const GENERATED: u64 = 4;
}

impl DecodeMessage for AttrProto {
    fn decode_fields(mut fields: Fields<'_>) -> Result<Self, ProtobufError> {
        // `type` is a required field, but `INT` is the enum's default value.
        let mut attr = AttrProto::new("", AttrType::Int, "");
        while let Some(field) = fields.next()? {
            match field.number() {
                Self::NAME => attr.name = field.read_string()?.to_string(),
                Self::TYPE => attr.attr_type = field.get_enum(AttrType::from_code)?,
                Self::COMMENT => attr.comment = field.read_string()?.to_string(),
                Self::GENERATED => attr.generated = field.get_bool()?,
                _ => {}
            }
        }
        Ok(attr)
    }
}

/// Read operator metadata from a stream of length-delimited `OpProto`
/// messages.
pub fn read_ops(data: &[u8]) -> Result<Vec<OpProto>, LoadError> {
    DelimitedMessages::new(data)
        .enumerate()
        .map(|(index, msg)| {
            msg.and_then(OpProto::decode)
                .map_err(|error| {
                    LoadError::from(LoadErrorImpl::ProtobufParseFailed { index, error })
                })
        })
        .collect()
}
