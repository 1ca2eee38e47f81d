use fancy_regex::Regex;

use crate::substitute::{group, replace_all};

/// Indentation inserted after a paragraph break in a formatted comment.
///
/// This matches the indentation of docstring text in generated functions.
pub const PARAGRAPH_INDENT: &str = "    ";

/// Converts operator documentation from the registry into docstring text.
///
/// Registry comments are wrapped at arbitrary points and use `$...$` and
/// `$$...$$` for math. Formatting joins the lines of each paragraph into one
/// line and converts math markup to reStructuredText.
pub struct CommentFormatter {
    two_dollar: Regex,
    single_dollar: Regex,
    two_bang: Regex,
}

impl CommentFormatter {
    pub fn new() -> Result<CommentFormatter, fancy_regex::Error> {
        Ok(CommentFormatter {
            two_dollar: Regex::new(r"\$\$([^\$]+)\$\$")?,
            single_dollar: Regex::new(r"\$([^\$]+)\$")?,
            two_bang: Regex::new(r"!!([^!]+)!!")?,
        })
    }

    /// Convert math markup in `text`.
    ///
    /// Inline math (`$x$`) becomes a ``:math:`x` `` role. Block math
    /// (`$$x$$`) is left as-is. Block math spans are swapped to `!!x!!` while
    /// inline math is converted, so the inline pattern can't match inside
    /// them.
    pub fn escape_math(&self, text: &str) -> Result<String, fancy_regex::Error> {
        let text = replace_all(&self.two_dollar, text, |caps| {
            format!("!!{}!!", group(caps, 1))
        })?;
        let text = replace_all(&self.single_dollar, &text, |caps| {
            format!(":math:`{}`", group(caps, 1))
        })?;
        replace_all(&self.two_bang, &text, |caps| format!("$${}$$", group(caps, 1)))
    }

    /// Format a multi-line registry comment for use in a docstring.
    ///
    /// Each non-blank line is trimmed, math-escaped and followed by a space.
    /// Blank lines end the current paragraph with a newline and
    /// [`PARAGRAPH_INDENT`]. Blank lines before the first paragraph are
    /// dropped. Trailing whitespace is left in place.
    pub fn format(&self, comment: &str) -> Result<String, fancy_regex::Error> {
        let mut formatted = String::new();
        for line in comment.split('\n') {
            let line = line.trim();
            if !line.is_empty() {
                formatted.push_str(&self.escape_math(line)?);
                formatted.push(' ');
            } else if !formatted.is_empty() {
                formatted.push('\n');
                formatted.push_str(PARAGRAPH_INDENT);
            }
        }
        Ok(formatted)
    }
}

#[cfg(test)]
mod tests {
    use opwrap_testing::TestCases;

    use super::CommentFormatter;

    #[test]
    fn test_escape_math() {
        #[derive(Debug)]
        struct Case<'a> {
            text: &'a str,
            expected: &'a str,
        }

        let cases = [
            Case {
                text: "$$a+b$$",
                expected: "$$a+b$$",
            },
            Case {
                text: "$x$",
                expected: ":math:`x`",
            },
            Case {
                text: "no math here",
                expected: "no math here",
            },
            Case {
                text: "Out = $$\\frac{X}{Y}$$ where $X$ and $Y$ are inputs",
                expected: "Out = $$\\frac{X}{Y}$$ where :math:`X` and :math:`Y` are inputs",
            },
            // An unpaired dollar sign is left alone.
            Case {
                text: "costs $5",
                expected: "costs $5",
            },
            Case {
                text: "",
                expected: "",
            },
        ];

        cases.test_each(|case| {
            let formatter = CommentFormatter::new().unwrap();
            assert_eq!(formatter.escape_math(case.text).unwrap(), case.expected);
        })
    }

    #[test]
    fn test_format() {
        #[derive(Debug)]
        struct Case<'a> {
            comment: &'a str,
            expected: &'a str,
        }

        let cases = [
            Case {
                comment: "",
                expected: "",
            },
            Case {
                comment: "One line.",
                expected: "One line. ",
            },
            Case {
                comment: "\n\nGaussianRandom Operator.\n\nUsed to initialize tensors\n  with gaussian random generator.\n",
                expected: "GaussianRandom Operator. \n    Used to initialize tensors with gaussian random generator. \n    ",
            },
            Case {
                comment: "Computes $$Out = X^2$$.\n\n\nWhere $X$ is the input.",
                expected: "Computes $$Out = X^2$$. \n    \n    Where :math:`X` is the input. ",
            },
        ];

        cases.test_each(|case| {
            let formatter = CommentFormatter::new().unwrap();
            assert_eq!(formatter.format(case.comment).unwrap(), case.expected);
        })
    }
}
