//! Environment-driven tuning for property-based test suites.
//!
//! Every proptest suite in the workspace reads the same two variables so CI
//! can raise case counts or enable forking in one place.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "OSSATURE_PBT_CASES";
/// Environment variable toggling forked execution of property cases.
pub const FORK_ENV_KEY: &str = "OSSATURE_PBT_FORK";

/// Case count and fork mode resolved for a property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyProfile {
    cases: u32,
    fork: bool,
}

impl PropertyProfile {
    /// Reads overrides from the environment, falling back to the defaults
    /// when a variable is unset or unparsable.
    ///
    /// # Examples
    ///
    /// ```
    /// use ossature_test_support::property::PropertyProfile;
    ///
    /// let profile = PropertyProfile::from_env(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn from_env(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: read(CASES_ENV_KEY, default_cases, parse_cases),
            fork: read(FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases each property should run.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

fn read<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|| {
        tracing::warn!(key, value = %raw, "ignoring unparsable property test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|cases| *cases > 0)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("1", Some(1))]
    #[case(" 512 ", Some(512))]
    #[case("0", None)]
    #[case("-4", None)]
    #[case("many", None)]
    fn parses_case_counts(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_cases(raw), expected);
    }

    #[rstest]
    #[case("TRUE", Some(true))]
    #[case("on", Some(true))]
    #[case("0", Some(false))]
    #[case("No", Some(false))]
    #[case("", None)]
    #[case("2", None)]
    fn parses_fork_flags(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_flag(raw), expected);
    }
}
