//! Semantic versioning with coercion
//!
//! Inputs are lowercased and stripped of leading `v`s, then coerced into the
//! closest `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` form instead of being
//! rejected:
//!
//! - `1` -> `1.0.0`, `1.2` -> `1.2.0`
//! - `1.2.3.4` -> `1.2.3+4`
//! - `1.2rc1` -> `1.2.0-rc1`
//! - `1.2.3_beta` -> `1.2.3-beta` (foreign characters become `-`)

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::{Result, VersionError};
use crate::version::grammar::VersionGrammar;
use crate::version::scheme::Scheme;
use crate::version::schemes::compare_digits;

static BASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+(?:\.[0-9]+)?)?").expect("valid base regex"));

/// One dot-separated pre-release identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Digits only, leading zeros removed
    Numeric(String),
    AlphaNumeric(String),
}

impl Identifier {
    fn new(s: &str) -> Self {
        if s.chars().all(|c| c.is_ascii_digit()) {
            let stripped = s.trim_start_matches('0');
            Identifier::Numeric(if stripped.is_empty() { "0" } else { stripped }.to_string())
        } else {
            Identifier::AlphaNumeric(s.to_string())
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(s) | Identifier::AlphaNumeric(s) => f.write_str(s),
        }
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => compare_digits(a, b),
            (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
            (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::AlphaNumeric(a), Identifier::AlphaNumeric(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Coerced semantic version
///
/// Equality and ordering follow SemVer precedence, so build metadata is
/// ignored: `1.2.3+42 == 1.2.3+23`.
#[derive(Debug, Clone)]
pub struct SemverVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Vec<Identifier>,
    pub build: Vec<String>,
}

impl SemverVersion {
    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }
}

impl fmt::Display for SemverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            let pre: Vec<String> = self.pre.iter().map(ToString::to_string).collect();
            write!(f, "-{}", pre.join("."))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build.join("."))?;
        }
        Ok(())
    }
}

impl PartialEq for SemverVersion {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for SemverVersion {}

/// Lowercase and strip every leading `v`.
fn clean(body: &str) -> String {
    body.to_lowercase().trim_start_matches('v').to_string()
}

fn split_identifiers(s: &str) -> impl Iterator<Item = &str> {
    s.split('.').filter(|part| !part.is_empty())
}

pub(crate) fn validate_base(scheme: Scheme, body: &str) -> Result<()> {
    if !BASE_RE.is_match(&clean(body)) {
        return Err(VersionError::invalid(
            scheme,
            body,
            "must start with a numeric major version",
        ));
    }
    Ok(())
}

/// Coerce a raw body into its components, reporting errors against `scheme`.
pub(crate) fn coerce(scheme: Scheme, body: &str) -> Result<SemverVersion> {
    let cleaned = clean(body);
    let Some(base) = BASE_RE.find(&cleaned) else {
        return Err(VersionError::invalid(
            scheme,
            body,
            "must start with a numeric major version",
        ));
    };

    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(base.as_str().split('.')) {
        *slot = part.parse().map_err(|e| {
            VersionError::invalid(scheme, body, format!("numeric component: {e}"))
        })?;
    }

    let rest: String = cleaned[base.end()..]
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    let (pre, build) = if let Some(build) = rest.strip_prefix('+') {
        ("", build)
    } else if let Some(build) = rest.strip_prefix('.') {
        // Extra version components: 1.2.3.4 -> 1.2.3+4
        ("", build)
    } else {
        let rest = rest.strip_prefix('-').unwrap_or(&rest);
        rest.split_once('+').unwrap_or((rest, ""))
    };

    Ok(SemverVersion {
        major: numbers[0],
        minor: numbers[1],
        patch: numbers[2],
        pre: split_identifiers(pre).map(Identifier::new).collect(),
        build: split_identifiers(&build.replace('+', "."))
            .map(str::to_string)
            .collect(),
    })
}

impl VersionGrammar for SemverVersion {
    const SCHEME: Scheme = Scheme::Semver;

    fn validate(body: &str) -> Result<()> {
        validate_base(Self::SCHEME, body)
    }

    fn normalize(body: &str) -> Result<Self> {
        coerce(Self::SCHEME, body)
    }

    fn compare(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                // A pre-release sorts below the same version without one
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                (false, false) => self.pre.cmp(&other.pre),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(s: &str) -> SemverVersion {
        SemverVersion::parse(s).unwrap()
    }

    #[rstest]
    #[case("1", "1.0.0")]
    #[case("1.2", "1.2.0")]
    #[case("v1.2", "1.2.0")]
    #[case("V1.2.3", "1.2.3")]
    #[case("vv2", "2.0.0")]
    #[case("1.2.3.4", "1.2.3+4")]
    #[case("1.2.3-RC.1", "1.2.3-rc.1")]
    #[case("1.2rc1", "1.2.0-rc1")]
    #[case("1.2.3_beta", "1.2.3-beta")]
    #[case("1.2.3.4_rc", "1.2.3+4-rc")]
    #[case("1.2.3-alpha+build.7", "1.2.3-alpha+build.7")]
    #[case("1.2.3+a+b", "1.2.3+a.b")]
    #[case("1.2.3-", "1.2.3")]
    #[case("01.002.3", "1.2.3")]
    #[case("1.0.0-rc.01", "1.0.0-rc.1")]
    fn coerce_returns_expected(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse(input).to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("v")]
    #[case("latest")]
    #[case(".1.2")]
    #[case("99999999999999999999.0.0")]
    #[case("١.٢.٣")]
    fn parse_rejects_invalid(#[case] input: &str) {
        assert!(matches!(
            SemverVersion::parse(input),
            Err(VersionError::InvalidVersion { .. })
        ));
    }

    #[rstest]
    #[case("1.0.0", "2.0.0", Ordering::Less)]
    #[case("2.0.0", "2.1.0", Ordering::Less)]
    #[case("2.1.0", "2.1.1", Ordering::Less)]
    #[case("1.0.0-alpha", "1.0.0", Ordering::Less)]
    #[case("1.0.0-alpha", "1.0.0-alpha.1", Ordering::Less)]
    #[case("1.0.0-alpha.1", "1.0.0-alpha.beta", Ordering::Less)]
    #[case("1.0.0-alpha.beta", "1.0.0-beta", Ordering::Less)]
    #[case("1.0.0-beta.2", "1.0.0-beta.11", Ordering::Less)]
    #[case("1.0.0-beta.11", "1.0.0-rc.1", Ordering::Less)]
    #[case("1.0.0", "1.0", Ordering::Equal)]
    #[case("v1.2", "1.2.0", Ordering::Equal)]
    #[case("1.2.3+42", "1.2.3+23", Ordering::Equal)]
    #[case("1.0.0-RC1", "1.0.0-rc1", Ordering::Equal)]
    fn compare_follows_precedence(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(parse(a).compare(&parse(b)), expected);
    }

    #[test]
    fn build_metadata_is_kept_for_display() {
        let v = parse("1.2.3+42");
        assert_eq!(v.build, vec!["42".to_string()]);
        assert!(!v.is_prerelease());
    }
}
