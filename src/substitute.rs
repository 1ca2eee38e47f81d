//! Regex substitution helpers.

use fancy_regex::{Captures, Regex};

/// Replace each non-overlapping match of `regex` in `text` with the string
/// returned by `replacement`.
///
/// Matches are found left to right, resuming the search after the end of the
/// previous match.
pub fn replace_all(
    regex: &Regex,
    text: &str,
    mut replacement: impl FnMut(&Captures) -> String,
) -> Result<String, fancy_regex::Error> {
    let mut output = String::with_capacity(text.len());
    let mut last_end = 0;

    for caps in regex.captures_iter(text) {
        let caps = caps?;
        let Some(matched) = caps.get(0) else {
            continue;
        };
        output.push_str(&text[last_end..matched.start()]);
        output.push_str(&replacement(&caps));
        last_end = matched.end();
    }
    output.push_str(&text[last_end..]);

    Ok(output)
}

/// Return the text of capture group `index`, or an empty string if the group
/// did not participate in the match.
pub fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map(|m| m.as_str()).unwrap_or_default()
}
