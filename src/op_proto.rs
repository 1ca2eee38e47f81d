use std::fmt::{Display, Formatter};

use serde::Deserialize;

/// Type of an operator attribute, as declared in the operator registry.
///
/// The discriminants match the wire values of the registry's `AttrType`
/// Protocol Buffers enum.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    Int = 0,
    Float = 1,
    String = 2,
    Ints = 3,
    Floats = 4,
    Strings = 5,
    Boolean = 6,
    Booleans = 7,
    Block = 8,
    Long = 9,
    Blocks = 10,
    Longs = 11,
}

impl AttrType {
    /// Convert a Protocol Buffers enum value to an attribute type.
    pub fn from_code(code: u64) -> Option<AttrType> {
        use AttrType::*;

        let ty = match code {
            0 => Int,
            1 => Float,
            2 => String,
            3 => Ints,
            4 => Floats,
            5 => Strings,
            6 => Boolean,
            7 => Booleans,
            8 => Block,
            9 => Long,
            10 => Blocks,
            11 => Longs,
            _ => return None,
        };
        Some(ty)
    }

    /// Return the name used for this type in registry dumps and docstrings.
    pub fn name(self) -> &'static str {
        match self {
            AttrType::Int => "int",
            AttrType::Float => "float",
            AttrType::String => "string",
            AttrType::Ints => "ints",
            AttrType::Floats => "floats",
            AttrType::Strings => "strings",
            AttrType::Boolean => "boolean",
            AttrType::Booleans => "booleans",
            AttrType::Block => "block",
            AttrType::Long => "long",
            AttrType::Blocks => "blocks",
            AttrType::Longs => "longs",
        }
    }
}

impl Display for AttrType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Description of an operator input or output.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct VarProto {
    pub name: String,

    #[serde(default)]
    pub comment: String,
}

impl VarProto {
    pub fn new(name: &str, comment: &str) -> VarProto {
        VarProto {
            name: name.to_string(),
            comment: comment.to_string(),
        }
    }
}

/// Description of an operator attribute.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AttrProto {
    pub name: String,

    #[serde(rename = "type")]
    pub attr_type: AttrType,

    /// Free-text documentation. By convention this starts with a
    /// parenthesized summary such as `(float, default 1.0)`.
    #[serde(default)]
    pub comment: String,

    /// Whether the registry added this attribute automatically rather than
    /// the operator declaring it.
    #[serde(default)]
    pub generated: bool,
}

impl AttrProto {
    pub fn new(name: &str, attr_type: AttrType, comment: &str) -> AttrProto {
        AttrProto {
            name: name.to_string(),
            attr_type,
            comment: comment.to_string(),
            generated: false,
        }
    }
}

/// Metadata for an operator, as held in an operator registry.
///
/// Inputs, outputs and attributes are kept in declaration order. Generated
/// wrappers list parameters in this order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct OpProto {
    /// Operator type name, eg. `gaussian_random`.
    #[serde(rename = "type")]
    pub op_type: String,

    #[serde(default)]
    pub inputs: Vec<VarProto>,

    #[serde(default)]
    pub outputs: Vec<VarProto>,

    #[serde(default)]
    pub attrs: Vec<AttrProto>,

    /// Multi-line operator documentation, which may contain `$...$` and
    /// `$$...$$` math markup.
    #[serde(default)]
    pub comment: String,
}

impl OpProto {
    pub fn new(op_type: &str) -> OpProto {
        OpProto {
            op_type: op_type.to_string(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, name: &str, comment: &str) -> Self {
        self.inputs.push(VarProto::new(name, comment));
        self
    }

    pub fn with_output(mut self, name: &str, comment: &str) -> Self {
        self.outputs.push(VarProto::new(name, comment));
        self
    }

    pub fn with_attr(mut self, name: &str, attr_type: AttrType, comment: &str) -> Self {
        self.attrs.push(AttrProto::new(name, attr_type, comment));
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use opwrap_testing::TestCases;

    use super::{AttrType, OpProto};

    #[test]
    fn test_attr_type_from_code() {
        #[derive(Debug)]
        struct Case {
            code: u64,
            expected: Option<AttrType>,
        }

        let cases = [
            Case {
                code: 0,
                expected: Some(AttrType::Int),
            },
            Case {
                code: 1,
                expected: Some(AttrType::Float),
            },
            Case {
                code: 5,
                expected: Some(AttrType::Strings),
            },
            Case {
                code: 11,
                expected: Some(AttrType::Longs),
            },
            Case {
                code: 12,
                expected: None,
            },
        ];

        cases.test_each(|case| {
            assert_eq!(AttrType::from_code(case.code), case.expected);
        })
    }

    #[test]
    fn test_attr_type_codes_match_discriminants() {
        for code in 0..12 {
            let ty = AttrType::from_code(code).unwrap();
            assert_eq!(ty as u64, code);
        }
    }

    #[test]
    fn test_deserialize_op_proto() {
        let json = r#"{
            "type": "scale",
            "inputs": [{"name": "X", "comment": "Input tensor"}],
            "outputs": [{"name": "Out"}],
            "attrs": [
                {"name": "scale", "type": "float", "comment": "(float, default 1.0) Scale"},
                {"name": "op_role", "type": "int", "generated": true}
            ]
        }"#;
        let op: OpProto = serde_json::from_str(json).unwrap();

        assert_eq!(op.op_type, "scale");
        assert_eq!(op.inputs[0].name, "X");
        assert_eq!(op.outputs[0].comment, "");
        assert_eq!(op.attrs[0].attr_type, AttrType::Float);
        assert!(!op.attrs[0].generated);
        assert!(op.attrs[1].generated);
        assert_eq!(op.comment, "");
    }

    #[test]
    fn test_attr_type_display() {
        assert_eq!(AttrType::Floats.to_string(), "floats");
        assert_eq!(AttrType::Boolean.to_string(), "boolean");
    }
}
