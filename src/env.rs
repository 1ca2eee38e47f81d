//! Configuration read from environment variables.

/// Environment variable which enables debug logging in the CLI when set to a
/// true value.
pub const VERBOSE_ENV_VAR: &str = "OPWRAP_VERBOSE";

/// Interpret a string value such as "1" or "no" as a boolean.
///
/// Unrecognized values are treated as false.
pub fn str_as_bool(s: &str) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => true,
        "0" | "false" | "f" | "no" | "n" | "off" | "" => false,
        _ => {
            log::warn!("Unrecognized boolean value \"{}\"", s);
            false
        }
    }
}

/// Return whether a feature flag controlled by an environment variable is
/// enabled.
pub fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .as_ref()
        .map(|s| str_as_bool(s))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use opwrap_testing::TestCases;

    use super::{env_flag, str_as_bool};

    #[test]
    fn test_str_as_bool() {
        #[derive(Debug)]
        struct Case {
            value: &'static str,
            expected: bool,
        }

        let cases = [
            ("1", true),
            ("true", true),
            ("YES", true),
            ("on", true),
            ("0", false),
            ("no", false),
            ("", false),
            ("maybe", false),
        ]
        .map(|(value, expected)| Case { value, expected });

        cases.test_each(|case| {
            assert_eq!(str_as_bool(case.value), case.expected);
        })
    }

    #[test]
    fn test_env_flag_default() {
        let name = "OPWRAP_TEST_FLAG_THAT_IS_NEVER_SET";
        assert!(env_flag(name, true));
        assert!(!env_flag(name, false));
    }
}
