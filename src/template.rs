use crate::render::{indent, WrapperFragments};

/// Assemble the Python source for a wrapper function around `op_type`.
///
/// `comment` is the operator documentation produced by
/// [`CommentFormatter::format`](crate::comment::CommentFormatter::format). It
/// is interpolated as-is, so a comment ending in a paragraph break leaves a
/// blank line before `Args:`. Trailing whitespace is removed from every line
/// of the output. Empty
/// `inputs` and `outputs` fragments are left out of the `append_op` call.
/// The emitted code is not checked for validity.
pub fn assemble(op_type: &str, comment: &str, fragments: &WrapperFragments) -> String {
    let WrapperFragments {
        args,
        input_comments,
        output_comments,
        output_holders,
        inputs,
        outputs,
        attrs,
        return_binding,
    } = fragments;

    let type_arg = format!("type='{}'", op_type);
    let append_op_args = [&type_arg, inputs, outputs, attrs]
        .into_iter()
        .filter(|arg| !arg.is_empty())
        .map(|arg| format!("{}{}", indent(2), arg))
        .collect::<Vec<_>>()
        .join(",\n");

    let output_holders = if output_holders.is_empty() {
        String::new()
    } else {
        format!("{}\n", output_holders)
    };

    let return_binding = if return_binding.is_empty() {
        "None"
    } else {
        return_binding.as_str()
    };

    let code = format!(
        r#"
def {op_type}({args}):
    """
    {comment}
    Args:
{input_comments}

    Returns:
{output_comments}

    """

    helper = LayerHelper('{op_type}', **locals())
{output_holders}    helper.append_op(
{append_op_args})

    return {return_binding}
"#
    );

    let mut trimmed: String = code
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    trimmed.push('\n');
    trimmed
}

#[cfg(test)]
mod tests {
    use opwrap_testing::assert_text_eq;

    use super::assemble;
    use crate::render::WrapperFragments;

    #[test]
    fn test_assemble() {
        let fragments = WrapperFragments {
            args: "x, scale=1.0".into(),
            input_comments: "        x (Type): Input tensor\n        scale (float): (float, default 1.0) Scale"
                .into(),
            output_comments: "        output(${out_type}): ${out_comment}".into(),
            output_holders: "    out = helper.create_tmp_variable(dtype=helper.input_dtype('X'))"
                .into(),
            inputs: "inputs={'X': x}".into(),
            outputs: "outputs={'Out': out}".into(),
            attrs: "attrs={'scale': scale}".into(),
            return_binding: "out".into(),
        };

        let code = assemble("scale", "Scale operator. \n    Multiplies by $s$. ", &fragments);

        let expected = r#"
def scale(x, scale=1.0):
    """
    Scale operator.
    Multiplies by $s$.
    Args:
        x (Type): Input tensor
        scale (float): (float, default 1.0) Scale

    Returns:
        output(${out_type}): ${out_comment}

    """

    helper = LayerHelper('scale', **locals())
    out = helper.create_tmp_variable(dtype=helper.input_dtype('X'))
    helper.append_op(
        type='scale',
        inputs={'X': x},
        outputs={'Out': out},
        attrs={'scale': scale})

    return out
"#;
        assert_eq!(code, expected);
    }

    #[test]
    fn test_assemble_omits_empty_fragments() {
        let fragments = WrapperFragments {
            attrs: "attrs={}".into(),
            ..Default::default()
        };

        let code = assemble("noop", "", &fragments);

        let expected = r#"
def noop():
    """

    Args:


    Returns:


    """

    helper = LayerHelper('noop', **locals())
    helper.append_op(
        type='noop',
        attrs={})

    return None
"#;
        assert_text_eq(&code, expected);
        assert!(code.lines().all(|line| line.trim_end() == line));
    }

    #[test]
    fn test_assemble_keeps_final_paragraph_break() {
        let fragments = WrapperFragments {
            args: "input".into(),
            attrs: "attrs={}".into(),
            ..Default::default()
        };

        // Formatted comment of "\nShape Operator.\n\nReturn the shape of the input.\n".
        let comment = "Shape Operator. \n    Return the shape of the input. \n    ";
        let code = assemble("shape", comment, &fragments);

        let lines: Vec<_> = code.lines().collect();
        let args_pos = lines.iter().position(|line| *line == "    Args:").unwrap();
        assert_eq!(lines[args_pos - 2], "    Return the shape of the input.");
        assert_eq!(lines[args_pos - 1], "");
    }
}
