//! Rendering of the operator-specific fragments of a wrapper function.

use fancy_regex::Regex;

use crate::naming::NameNormalizer;
use crate::op_proto::{AttrProto, OpProto, VarProto};

/// Attributes which the framework adds to every operator for its own
/// bookkeeping. These are never exposed in generated wrappers.
pub const FILTERED_ATTRS: [&str; 3] = ["op_role", "op_role_var", "op_namescope"];

/// Return true if attribute `name` is excluded from generated wrappers.
pub fn is_filtered_attr(name: &str) -> bool {
    FILTERED_ATTRS.contains(&name)
}

/// Number of spaces per indentation level in generated code.
const INDENT_WIDTH: usize = 4;

/// Return whitespace for indentation level `level`.
pub fn indent(level: usize) -> String {
    " ".repeat(level * INDENT_WIDTH)
}

/// Operator-specific pieces of a generated wrapper function.
///
/// Each fragment is complete on its own, with separators only between
/// entries, so it can be interpolated into the function template as-is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WrapperFragments {
    /// Parameter list, eg. `x, scale=1.0`.
    pub args: String,

    /// Docstring lines for inputs and attributes.
    pub input_comments: String,

    /// Docstring lines for outputs, with `${name_type}` and `${name_comment}`
    /// placeholders.
    pub output_comments: String,

    /// Statements which create a variable for each output.
    pub output_holders: String,

    /// `inputs={...}` argument for `append_op`, or empty if there are no
    /// inputs.
    pub inputs: String,

    /// `outputs={...}` argument for `append_op`, or empty if there are no
    /// outputs.
    pub outputs: String,

    /// `attrs={...}` argument for `append_op`.
    pub attrs: String,

    /// Comma-separated output variables to return.
    pub return_binding: String,
}

/// Descriptor with a registry name.
trait RegistryName {
    fn registry_name(&self) -> &str;
}

impl RegistryName for VarProto {
    fn registry_name(&self) -> &str {
        &self.name
    }
}

impl RegistryName for AttrProto {
    fn registry_name(&self) -> &str {
        &self.name
    }
}

/// An input, output or attribute paired with its Python identifier.
struct Named<'a, T> {
    proto: &'a T,
    py_name: String,
}

/// Renders [`WrapperFragments`] for an operator.
pub struct FragmentRenderer {
    normalizer: NameNormalizer,

    /// Matches the `(type, default VALUE)` summary at the start of attribute
    /// comments.
    default_value: Regex,
}

impl FragmentRenderer {
    pub fn new() -> Result<FragmentRenderer, fancy_regex::Error> {
        Ok(FragmentRenderer {
            normalizer: NameNormalizer::new()?,
            default_value: Regex::new(r"\(.+, default (.+)\(?\)")?,
        })
    }

    /// Extract the default value of an attribute from its comment.
    ///
    /// This is a heuristic. The value capture is greedy and runs up to the
    /// last closing parenthesis on the line, so comments with more
    /// parenthesized text after the summary produce a mangled value. A comment
    /// that doesn't match yields `None`.
    pub fn attr_default<'a>(&self, comment: &'a str) -> Result<Option<&'a str>, fancy_regex::Error> {
        let caps = self.default_value.captures(comment)?;
        Ok(caps.and_then(|caps| caps.get(1)).map(|m| m.as_str()))
    }

    /// Render the fragments for `op`.
    pub fn render(&self, op: &OpProto) -> Result<WrapperFragments, fancy_regex::Error> {
        let inputs = self.named(&op.inputs)?;
        let outputs = self.named(&op.outputs)?;
        let attrs: Vec<&AttrProto> = op
            .attrs
            .iter()
            .filter(|attr| !is_filtered_attr(&attr.name))
            .collect();
        let attrs = self.named(attrs)?;

        log::debug!(
            "rendering {}: {} inputs, {} outputs, {} attributes ({} filtered)",
            op.op_type,
            inputs.len(),
            outputs.len(),
            attrs.len(),
            op.attrs.len() - attrs.len(),
        );

        Ok(WrapperFragments {
            args: self.func_args(&op.op_type, &inputs, &attrs)?,
            input_comments: input_comments(&inputs, &attrs),
            output_comments: output_comments(&outputs),
            output_holders: output_holders(&inputs, &outputs, &attrs),
            inputs: keyword_map("inputs", &inputs),
            outputs: keyword_map("outputs", &outputs),
            attrs: format!("attrs={{{}}}", keyword_entries(&attrs)),
            return_binding: join(outputs.iter().map(|out| out.py_name.clone())),
        })
    }

    fn named<'a, T: RegistryName + 'a>(
        &self,
        protos: impl IntoIterator<Item = &'a T>,
    ) -> Result<Vec<Named<'a, T>>, fancy_regex::Error> {
        protos
            .into_iter()
            .map(|proto| {
                self.normalizer
                    .normalize(proto.registry_name())
                    .map(|py_name| Named { proto, py_name })
            })
            .collect()
    }

    fn func_args(
        &self,
        op_type: &str,
        inputs: &[Named<VarProto>],
        attrs: &[Named<AttrProto>],
    ) -> Result<String, fancy_regex::Error> {
        let mut args: Vec<String> = inputs.iter().map(|input| input.py_name.clone()).collect();
        for attr in attrs {
            match self.attr_default(&attr.proto.comment)? {
                Some(default) => args.push(format!("{}={}", attr.py_name, default)),
                None => {
                    log::debug!(
                        "no default value found for attribute \"{}\" of {}",
                        attr.proto.name,
                        op_type
                    );
                    args.push(attr.py_name.clone());
                }
            }
        }
        Ok(join(args))
    }
}

fn input_comments(inputs: &[Named<VarProto>], attrs: &[Named<AttrProto>]) -> String {
    let input_lines = inputs.iter().map(|input| {
        format!(
            "{}{} (Type): {}",
            indent(2),
            input.py_name,
            doc_text(&input.proto.comment)
        )
    });
    let attr_lines = attrs.iter().map(|attr| {
        format!(
            "{}{} ({}): {}",
            indent(2),
            attr.py_name,
            attr.proto.attr_type,
            doc_text(&attr.proto.comment)
        )
    });
    input_lines.chain(attr_lines).collect::<Vec<_>>().join("\n")
}

fn output_comments(outputs: &[Named<VarProto>]) -> String {
    outputs
        .iter()
        .map(|out| {
            format!(
                "{}output(${{{name}_type}}): ${{{name}_comment}}",
                indent(2),
                name = out.py_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a statement creating each output variable.
///
/// The data type is taken from the first input. Operators without inputs
/// (eg. random number generators) use their `dtype` attribute if they have
/// one.
fn output_holders(
    inputs: &[Named<VarProto>],
    outputs: &[Named<VarProto>],
    attrs: &[Named<AttrProto>],
) -> String {
    let dtype = if let Some(first) = inputs.first() {
        format!("helper.input_dtype('{}')", first.proto.name)
    } else if let Some(attr) = attrs.iter().find(|attr| attr.proto.name == "dtype") {
        attr.py_name.clone()
    } else {
        "'float32'".to_string()
    };

    outputs
        .iter()
        .map(|out| {
            format!(
                "{}{} = helper.create_tmp_variable(dtype={})",
                indent(1),
                out.py_name,
                dtype
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a `{keyword}={...}` argument, or an empty string if `items` is
/// empty.
fn keyword_map<T: RegistryName>(keyword: &str, items: &[Named<T>]) -> String {
    if items.is_empty() {
        return String::new();
    }
    format!("{}={{{}}}", keyword, keyword_entries(items))
}

fn keyword_entries<T: RegistryName>(items: &[Named<T>]) -> String {
    join(
        items
            .iter()
            .map(|item| format!("'{}': {}", item.proto.registry_name(), item.py_name)),
    )
}

fn join(items: impl IntoIterator<Item = String>) -> String {
    items.into_iter().collect::<Vec<_>>().join(", ")
}

/// Collapse a possibly multi-line registry comment onto one line.
fn doc_text(comment: &str) -> String {
    comment
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
