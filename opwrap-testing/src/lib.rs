//! Internal testing utilities for the opwrap crates.

use std::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe};

/// Utility for creating parametrized (aka. table-driven) tests.
///
/// Create a `Debug` struct, conventionally named `Case`, holding the inputs
/// and expected output of one case, collect the cases into an array or `Vec`
/// and call `test_each` with the test body. All cases are run even if earlier
/// ones panic. If any case fails, `test_each` panics with the number of
/// failures and their debug representations.
///
/// ```
/// use opwrap_testing::TestCases;
///
/// #[derive(Debug)]
/// struct Case {
///     name: &'static str,
///     expected_len: usize,
/// }
///
/// let cases = [
///     Case { name: "X", expected_len: 1 },
///     Case { name: "Out", expected_len: 3 },
/// ];
///
/// cases.test_each(|case| {
///     assert_eq!(case.name.len(), case.expected_len);
/// });
/// ```
///
/// Cases and any values captured by the test closure must be
/// [unwind safe](https://doc.rust-lang.org/std/panic/fn.catch_unwind.html).
/// Values which are not, such as registries with interior caches, should be
/// created inside the closure instead.
pub trait TestCases {
    /// The data for a single test case.
    type Case;

    /// Call test function `test` with each test case in `self`, catching any panics.
    fn test_each(self, test: impl Fn(&Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe;

    /// Variant of [`test_each`](TestCases::test_each) which passes test cases
    /// to the test function by value.
    ///
    /// Each case is formatted before the test function is called so that it
    /// can be reported if the test fails.
    fn test_each_value(self, test: impl Fn(Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe;
}

impl<I: IntoIterator> TestCases for I {
    type Case = I::Item;

    fn test_each(self, test: impl Fn(&I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe,
    {
        let failures: Vec<_> = self
            .into_iter()
            .filter(|case| std::panic::catch_unwind(|| test(case)).is_err())
            .collect();
        assert_eq!(
            failures.len(),
            0,
            "{} test cases failed: {:?}",
            failures.len(),
            failures
        );
    }

    fn test_each_value(self, test: impl Fn(I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe,
    {
        let mut failures = Vec::new();
        for case in self {
            let test = &test;
            let case_str = format!("{:?}", case);
            if std::panic::catch_unwind(move || test(case)).is_err() {
                failures.push(case_str);
            }
        }
        assert_eq!(
            failures.len(),
            0,
            "{} test cases failed: {:?}",
            failures.len(),
            failures
        );
    }
}

/// Compare two blocks of generated source text line by line.
///
/// Trailing whitespace on each line and blank lines at the start and end of
/// either block are ignored. On mismatch, the error names the first differing
/// line (1-based, counted after leading blank lines are dropped).
pub fn compare_text(actual: &str, expected: &str) -> Result<(), String> {
    let actual = significant_lines(actual);
    let expected = significant_lines(expected);

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        if a != e {
            return Err(format!(
                "Text differs at line {}.\n  actual:   {:?}\n  expected: {:?}",
                i + 1,
                a,
                e
            ));
        }
    }

    if actual.len() != expected.len() {
        return Err(format!(
            "Line counts do not match. Actual {} expected {}",
            actual.len(),
            expected.len()
        ));
    }

    Ok(())
}

/// Panicking variant of [`compare_text`].
#[track_caller]
pub fn assert_text_eq(actual: &str, expected: &str) {
    if let Err(err) = compare_text(actual, expected) {
        panic!("{}\n--- actual ---\n{}", err, actual);
    }
}

fn significant_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map(|pos| pos + 1)
        .unwrap_or(start);
    lines[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::{assert_text_eq, compare_text, TestCases};

    #[test]
    fn test_test_cases_success() {
        #[derive(Clone, Debug)]
        struct Case {
            x: i32,
        }

        let cases = [Case { x: 1 }, Case { x: 2 }];
        cases.clone().test_each(|case| _ = case.x);
        cases.test_each_value(|case| _ = case.x);
    }

    #[test]
    #[should_panic(expected = "2 test cases failed")]
    fn test_test_each_failure() {
        #[derive(Debug)]
        struct Case {
            x: i32,
        }

        let cases = [Case { x: 1 }, Case { x: 2 }];
        cases.test_each(|case| {
            _ = case.x;
            panic!("oh no");
        })
    }

    #[test]
    #[should_panic(expected = "1 test cases failed")]
    fn test_test_each_value_failure() {
        #[derive(Debug)]
        struct Case {
            x: i32,
        }

        let cases = [Case { x: 1 }, Case { x: 2 }];
        cases.test_each_value(|case| assert_eq!(case.x, 1))
    }

    #[test]
    fn test_compare_text_ignores_trailing_whitespace() {
        assert_text_eq("\ndef f(x):  \n    return x\n\n", "def f(x):\n    return x");
    }

    #[test]
    fn test_compare_text_reports_first_difference() {
        let err = compare_text("a\nb\nc", "a\nx\nc").unwrap_err();
        assert!(err.starts_with("Text differs at line 2."), "{}", err);

        let err = compare_text("a\nb", "a\nb\nc").unwrap_err();
        assert_eq!(err, "Line counts do not match. Actual 2 expected 3");
    }
}
