use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::comment::CommentFormatter;
use crate::op_registry::{OpProtoSource, RegistryError};
use crate::render::FragmentRenderer;
use crate::template;

/// Errors that occur when generating a wrapper.
#[derive(Debug)]
pub enum GenerateError {
    /// The operator could not be found in the registry.
    RegistryError(RegistryError),

    /// A regex failed to compile or match.
    ///
    /// The patterns are fixed, so this indicates a bug or a backtracking
    /// limit being hit on unusual input.
    RegexError(Box<fancy_regex::Error>),
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RegistryError(err) => write!(f, "registry error: {}", err),
            Self::RegexError(err) => write!(f, "regex error: {}", err),
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RegistryError(err) => Some(err),
            Self::RegexError(err) => Some(err),
        }
    }
}

impl From<RegistryError> for GenerateError {
    fn from(val: RegistryError) -> Self {
        GenerateError::RegistryError(val)
    }
}

impl From<fancy_regex::Error> for GenerateError {
    fn from(val: fancy_regex::Error) -> Self {
        GenerateError::RegexError(Box::new(val))
    }
}

/// Generates Python wrapper functions for operators.
///
/// A generator compiles its patterns once and can then be used for any
/// number of operators.
///
/// ```
/// use opwrap::{OpProto, OpRegistry, WrapperGenerator};
///
/// let registry = OpRegistry::with_ops([OpProto::new("relu")
///     .with_input("X", "Input tensor")
///     .with_output("Out", "")
///     .with_comment("Relu Operator.")]);
///
/// let generator = WrapperGenerator::new().unwrap();
/// let code = generator.generate(&registry, "relu").unwrap();
/// assert!(code.contains("def relu(x):"));
/// ```
pub struct WrapperGenerator {
    comments: CommentFormatter,
    renderer: FragmentRenderer,
}

impl WrapperGenerator {
    pub fn new() -> Result<WrapperGenerator, GenerateError> {
        Ok(WrapperGenerator {
            comments: CommentFormatter::new()?,
            renderer: FragmentRenderer::new()?,
        })
    }

    /// Generate the wrapper function for `op_type`, looking up its metadata
    /// in `registry`.
    pub fn generate<R: OpProtoSource + ?Sized>(
        &self,
        registry: &R,
        op_type: &str,
    ) -> Result<String, GenerateError> {
        let op = registry.get_op_proto(op_type)?;
        let comment = self.comments.format(&op.comment)?;
        let fragments = self.renderer.render(op)?;
        Ok(template::assemble(&op.op_type, &comment, &fragments))
    }
}

/// Generate the wrapper function for `op_type` using a new
/// [`WrapperGenerator`].
pub fn generate_wrapper<R: OpProtoSource + ?Sized>(
    registry: &R,
    op_type: &str,
) -> Result<String, GenerateError> {
    WrapperGenerator::new()?.generate(registry, op_type)
}

#[cfg(test)]
mod tests {
    use opwrap_testing::assert_text_eq;

    use super::{generate_wrapper, GenerateError, WrapperGenerator};
    use crate::op_proto::{AttrType, OpProto};
    use crate::op_registry::{OpProtoSource, OpRegistry, RegistryError};

    #[test]
    fn test_generate_single_input() {
        let registry = OpRegistry::with_ops([OpProto::new("op_name")
            .with_input("X", "input tensor")
            .with_output("Out", "")]);

        let code = generate_wrapper(&registry, "op_name").unwrap();

        let expected = r#"
def op_name(x):
    """

    Args:
        x (Type): input tensor

    Returns:
        output(${out_type}): ${out_comment}

    """

    helper = LayerHelper('op_name', **locals())
    out = helper.create_tmp_variable(dtype=helper.input_dtype('X'))
    helper.append_op(
        type='op_name',
        inputs={'X': x},
        outputs={'Out': out},
        attrs={})

    return out
"#;
        assert_text_eq(&code, expected);
    }

    #[test]
    fn test_generate_with_math_comment() {
        let registry = OpRegistry::with_ops([OpProto::new("Softsign")
            .with_input("X", "Input of Softsign operator")
            .with_output("Out", "Output of Softsign operator")
            .with_attr("op_role", AttrType::Int, "(int, default 0) The role of this operator")
            .with_comment(
                "\nSoftsign Activation Operator.\n\n$$out = \\frac{x}{1 + |x|}$$\n\nApplied to $x$ elementwise.\n",
            )]);

        let generator = WrapperGenerator::new().unwrap();
        let code = generator.generate(&registry, "Softsign").unwrap();

        let expected = r#"
def Softsign(x):
    """
    Softsign Activation Operator.
    $$out = \frac{x}{1 + |x|}$$
    Applied to :math:`x` elementwise.

    Args:
        x (Type): Input of Softsign operator

    Returns:
        output(${out_type}): ${out_comment}

    """

    helper = LayerHelper('Softsign', **locals())
    out = helper.create_tmp_variable(dtype=helper.input_dtype('X'))
    helper.append_op(
        type='Softsign',
        inputs={'X': x},
        outputs={'Out': out},
        attrs={})

    return out
"#;
        assert_text_eq(&code, expected);
    }

    #[test]
    fn test_generate_unknown_operator() {
        let registry = OpRegistry::new();
        let err = generate_wrapper(&registry, "missing").unwrap_err();

        match err {
            GenerateError::RegistryError(RegistryError::UnknownOperator { name }) => {
                assert_eq!(name, "missing");
            }
            other => panic!("unexpected error {}", other),
        }
    }

    #[test]
    fn test_generate_keeps_blank_line_before_args() {
        let registry = OpRegistry::with_ops([OpProto::new("shape")
            .with_input("Input", "(Tensor), The input tensor.")
            .with_output("Out", "")
            .with_comment("\nShape Operator.\n\nReturn the shape of the input.\n")]);

        let code = generate_wrapper(&registry, "shape").unwrap();

        let lines: Vec<_> = code.lines().collect();
        let args_pos = lines.iter().position(|line| *line == "    Args:").unwrap();
        assert_eq!(
            &lines[args_pos - 3..args_pos],
            ["    Shape Operator.", "    Return the shape of the input.", ""]
        );
    }

    #[test]
    fn test_generate_error_display() {
        let err = GenerateError::from(RegistryError::UnknownOperator {
            name: "missing".into(),
        });
        assert_eq!(
            err.to_string(),
            "registry error: operator \"missing\" is not registered"
        );

        let regex_err = fancy_regex::Regex::new("(").unwrap_err();
        let expected = format!("regex error: {}", regex_err);
        let err = GenerateError::from(regex_err);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_generate_with_custom_source() {
        struct SingleOp(OpProto);

        impl OpProtoSource for SingleOp {
            fn get_op_proto(&self, op_type: &str) -> Result<&OpProto, RegistryError> {
                if op_type == self.0.op_type {
                    Ok(&self.0)
                } else {
                    Err(RegistryError::UnknownOperator {
                        name: op_type.to_string(),
                    })
                }
            }
        }

        let source = SingleOp(OpProto::new("sum").with_input("X", "").with_output("Out", ""));
        let code = generate_wrapper(&source, "sum").unwrap();
        assert!(code.contains("def sum(x):"));

        // Generation works through a trait object too.
        let source: &dyn OpProtoSource = &source;
        assert!(generate_wrapper(source, "other").is_err());
    }
}
