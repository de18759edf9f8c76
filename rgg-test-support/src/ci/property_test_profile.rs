//! Environment overrides for property-test suites.
//!
//! `RGG_PBT_CASES` sets the number of cases per property and `RGG_PBT_FORK`
//! toggles running each case in a forked process. Malformed values are logged
//! and ignored so a typo in CI never silently disables a suite.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const RGG_PBT_CASES_ENV_KEY: &str = "RGG_PBT_CASES";
/// Environment variable overriding whether cases run in forked processes.
pub const RGG_PBT_FORK_ENV_KEY: &str = "RGG_PBT_FORK";

/// Case count and fork mode resolved for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Resolves the profile, falling back to the given defaults for unset or
    /// malformed variables.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgg_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() >= 1);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(RGG_PBT_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(RGG_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Cases to run per property. Always at least one.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether each case runs in a forked process.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T>(key: &'static str, default: T, parse: fn(&str) -> Result<T, String>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(env = key, raw = %raw, reason = %reason, "ignoring property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("case count must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("not a case count: {error}")),
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    let value = raw.trim();
    if ["1", "true", "yes", "on"]
        .iter()
        .any(|word| value.eq_ignore_ascii_case(word))
    {
        Ok(true)
    } else if ["0", "false", "no", "off"]
        .iter()
        .any(|word| value.eq_ignore_ascii_case(word))
    {
        Ok(false)
    } else {
        Err(format!("`{value}` is not a boolean flag"))
    }
}
