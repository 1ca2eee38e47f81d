use fancy_regex::{Captures, Regex};

use crate::substitute::{group, replace_all};

/// Converts registry identifiers such as `GaussianRandom` or `InputDimIdx`
/// into lowercase snake case names (`gaussian_random`, `input_dim_idx`).
///
/// Conversion happens in two passes. The first inserts an underscore before
/// each capitalized word that follows another character. The second inserts
/// an underscore between a lowercase letter or digit and a following
/// uppercase letter. The result is then lowercased.
///
/// Names which are already lowercase are returned unchanged.
pub struct NameNormalizer {
    word_start: Regex,
    lower_upper: Regex,
}

impl NameNormalizer {
    pub fn new() -> Result<NameNormalizer, fancy_regex::Error> {
        Ok(NameNormalizer {
            word_start: Regex::new("(.)([A-Z][a-z]+)")?,
            lower_upper: Regex::new("([a-z0-9])([A-Z])")?,
        })
    }

    /// Convert `name` to snake case.
    pub fn normalize(&self, name: &str) -> Result<String, fancy_regex::Error> {
        let name = replace_all(&self.word_start, name, split_words)?;
        let name = replace_all(&self.lower_upper, &name, split_words)?;
        Ok(name.to_lowercase())
    }
}

fn split_words(caps: &Captures) -> String {
    format!("{}_{}", group(caps, 1), group(caps, 2))
}
