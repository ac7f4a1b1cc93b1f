//! PyPI versions (PEP 440)
//!
//! Strings are accepted only when they match the PEP 440 grammar; alternate
//! spellings are normalized (`1.0-ALPHA.1` is `1.0a1`, `1.0-1` is `1.0.post1`).
//!
//! Precedence: epoch, release (zero padded), then
//! `dev < pre-release < final < post-release`, then the local label.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::version::error::{Result, VersionError};
use crate::version::grammar::VersionGrammar;
use crate::version::scheme::Scheme;
use crate::version::schemes::{compare_digits, strip_leading_zeros};

static PEP440_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^\s*
        v?
        (?:
            (?:(?P<epoch>[0-9]+)!)?
            (?P<release>[0-9]+(?:\.[0-9]+)*)
            (?P<pre>
                [-_.]?
                (?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)
                [-_.]?
                (?P<pre_n>[0-9]+)?
            )?
            (?P<post>
                (?:-(?P<post_n1>[0-9]+))
                |
                (?:
                    [-_.]?
                    (?P<post_l>post|rev|r)
                    [-_.]?
                    (?P<post_n2>[0-9]+)?
                )
            )?
            (?P<dev>
                [-_.]?
                (?P<dev_l>dev)
                [-_.]?
                (?P<dev_n>[0-9]+)?
            )?
        )
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .expect("valid PEP 440 regex")
});

/// Unbounded non-negative integer, stored as digits without leading zeros
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    fn new(digits: &str) -> Self {
        Number(strip_leading_zeros(digits).to_string())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::new(&n.to_string())
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_digits(&self.0, &other.0)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            f.write_str("0")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Pre-release phase, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Alpha,
    Beta,
    Rc,
}

impl PreRelease {
    fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "a" | "alpha" => PreRelease::Alpha,
            "b" | "beta" => PreRelease::Beta,
            _ => PreRelease::Rc,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            PreRelease::Alpha => "a",
            PreRelease::Beta => "b",
            PreRelease::Rc => "rc",
        }
    }
}

/// Local version label segment
///
/// Alphanumeric segments sort before numeric ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocalSegment {
    Alpha(String),
    Numeric(Number),
}

impl fmt::Display for LocalSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalSegment::Alpha(s) => f.write_str(s),
            LocalSegment::Numeric(n) => write!(f, "{n}"),
        }
    }
}

/// Position of the pre-release slot in the sort key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    /// `1.0.dev1` sorts before `1.0a1`
    DevOnly,
    Pre(PreRelease, Number),
    Final,
}

/// Position of the dev slot in the sort key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum DevKey {
    Dev(Number),
    None,
}

/// Parsed PEP 440 version
#[derive(Debug, Clone)]
pub struct PypiVersion {
    pub epoch: Number,
    pub release: Vec<Number>,
    pub pre: Option<(PreRelease, Number)>,
    pub post: Option<Number>,
    pub dev: Option<Number>,
    pub local: Vec<LocalSegment>,
}

type SortKey<'a> = (
    &'a Number,
    &'a [Number],
    PreKey,
    Option<&'a Number>,
    DevKey,
    Option<&'a [LocalSegment]>,
);

impl PypiVersion {
    pub fn release(&self) -> &[Number] {
        &self.release
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    pub fn is_devrelease(&self) -> bool {
        self.dev.is_some()
    }

    /// Canonical form without the local label
    pub fn public(&self) -> String {
        let mut out = String::new();
        if !self.epoch.is_zero() {
            out.push_str(&format!("{}!", self.epoch));
        }
        let release: Vec<String> = self.release.iter().map(ToString::to_string).collect();
        out.push_str(&release.join("."));
        if let Some((phase, n)) = &self.pre {
            out.push_str(&format!("{}{}", phase.as_str(), n));
        }
        if let Some(n) = &self.post {
            out.push_str(&format!(".post{n}"));
        }
        if let Some(n) = &self.dev {
            out.push_str(&format!(".dev{n}"));
        }
        out
    }

    fn sort_key(&self) -> SortKey<'_> {
        let significant = self
            .release
            .iter()
            .rposition(|n| !n.is_zero())
            .map_or(0, |i| i + 1);

        let pre = match (&self.pre, &self.post, &self.dev) {
            (None, None, Some(_)) => PreKey::DevOnly,
            (Some((phase, n)), _, _) => PreKey::Pre(*phase, n.clone()),
            (None, _, _) => PreKey::Final,
        };

        let dev = match &self.dev {
            Some(n) => DevKey::Dev(n.clone()),
            None => DevKey::None,
        };

        let local = if self.local.is_empty() {
            None
        } else {
            Some(self.local.as_slice())
        };

        (
            &self.epoch,
            &self.release[..significant],
            pre,
            self.post.as_ref(),
            dev,
            local,
        )
    }
}

impl fmt::Display for PypiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.public())?;
        if !self.local.is_empty() {
            let local: Vec<String> = self.local.iter().map(ToString::to_string).collect();
            write!(f, "+{}", local.join("."))?;
        }
        Ok(())
    }
}

impl PartialEq for PypiVersion {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for PypiVersion {}

fn number(caps: &Captures, name: &str) -> Option<Number> {
    caps.name(name).map(|m| Number::new(m.as_str()))
}

impl VersionGrammar for PypiVersion {
    const SCHEME: Scheme = Scheme::Pypi;

    fn validate(body: &str) -> Result<()> {
        if !PEP440_RE.is_match(body) {
            return Err(VersionError::invalid(
                Self::SCHEME,
                body,
                "does not match the PEP 440 grammar",
            ));
        }
        Ok(())
    }

    fn normalize(body: &str) -> Result<Self> {
        let Some(caps) = PEP440_RE.captures(body) else {
            return Err(VersionError::invalid(
                Self::SCHEME,
                body,
                "does not match the PEP 440 grammar",
            ));
        };

        let epoch = number(&caps, "epoch").unwrap_or_default();

        let release = caps
            .name("release")
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split('.')
            .map(Number::new)
            .collect();

        let pre = caps.name("pre_l").map(|label| {
            (
                PreRelease::from_label(label.as_str()),
                number(&caps, "pre_n").unwrap_or_default(),
            )
        });

        let post = caps.name("post").map(|_| {
            number(&caps, "post_n1")
                .or_else(|| number(&caps, "post_n2"))
                .unwrap_or_default()
        });

        let dev = caps
            .name("dev")
            .map(|_| number(&caps, "dev_n").unwrap_or_default());

        let local = caps
            .name("local")
            .map(|m| {
                m.as_str()
                    .split(['-', '_', '.'])
                    .map(|part| {
                        if part.bytes().all(|b| b.is_ascii_digit()) {
                            LocalSegment::Numeric(Number::new(part))
                        } else {
                            LocalSegment::Alpha(part.to_ascii_lowercase())
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(PypiVersion {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(s: &str) -> PypiVersion {
        PypiVersion::parse(s).unwrap()
    }

    #[rstest]
    #[case("2.4.5", "2.4.5")]
    #[case("v1.0", "1.0")]
    #[case("1!2.0", "1!2.0")]
    #[case("1.0-ALPHA.1", "1.0a1")]
    #[case("1.0beta", "1.0b0")]
    #[case("1.0c2", "1.0rc2")]
    #[case("1.0preview3", "1.0rc3")]
    #[case("1.0-1", "1.0.post1")]
    #[case("1.0.rev2", "1.0.post2")]
    #[case("1.0r", "1.0.post0")]
    #[case("1.0-dev", "1.0.dev0")]
    #[case("1.0.dev_4", "1.0.dev4")]
    #[case("1.0+Ubuntu-1", "1.0+ubuntu.1")]
    #[case("  1.0  ", "1.0")]
    fn normalize_returns_canonical_form(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse(input).to_string(), expected);
    }

    #[rstest]
    #[case("2.//////")]
    #[case("")]
    #[case("1.0.")]
    #[case("1.0+")]
    #[case("1.0+local!")]
    #[case("one")]
    #[case("1.0-gamma")]
    fn validate_rejects_non_pep440(#[case] input: &str) {
        assert!(matches!(
            PypiVersion::parse(input),
            Err(VersionError::InvalidVersion {
                scheme: Scheme::Pypi,
                ..
            })
        ));
    }

    #[rstest]
    #[case("2.4", "2.4.0", Ordering::Equal)]
    #[case("2.5", "2.4.0", Ordering::Greater)]
    #[case("1.0.dev1", "1.0a1", Ordering::Less)]
    #[case("1.0a1", "1.0a2", Ordering::Less)]
    #[case("1.0a2", "1.0b1", Ordering::Less)]
    #[case("1.0b1", "1.0rc1", Ordering::Less)]
    #[case("1.0rc1", "1.0", Ordering::Less)]
    #[case("1.0", "1.0.post1", Ordering::Less)]
    #[case("1.0a1.dev1", "1.0a1", Ordering::Less)]
    #[case("1.0.post1.dev1", "1.0.post1", Ordering::Less)]
    #[case("1.0.post1.dev1", "1.0", Ordering::Greater)]
    #[case("1.0", "1.0+local", Ordering::Less)]
    #[case("1.0+abc", "1.0+1", Ordering::Less)]
    #[case("1.0+1", "1.0+1.1", Ordering::Less)]
    #[case("1!0.1", "2.0", Ordering::Greater)]
    #[case("1.0", "1.0-ALPHA.1", Ordering::Greater)]
    #[case("1.0+99999999999999999999", "1.0+1", Ordering::Greater)]
    #[case("1.0+99999999999999999999", "1.0+abc", Ordering::Greater)]
    #[case("1.0.99999999999999999999", "1.0.99999999999999999998", Ordering::Greater)]
    #[case("1.0.99999999999999999999", "1.1", Ordering::Less)]
    #[case("99999999999999999999!1.0", "1!2.0", Ordering::Greater)]
    #[case("1.0rc99999999999999999999", "1.0rc2", Ordering::Greater)]
    #[case("1.0.post99999999999999999999.dev1", "1.0.post1", Ordering::Greater)]
    #[case("1.0+007", "1.0+7", Ordering::Equal)]
    fn compare_follows_pep440(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(parse(a).compare(&parse(b)), expected);
    }

    #[test]
    fn flags_describe_release_kind() {
        let v = parse("1.0rc1.post2.dev3+local.7");
        assert!(v.is_prerelease());
        assert!(v.is_postrelease());
        assert!(v.is_devrelease());
        assert_eq!(v.public(), "1.0rc1.post2.dev3");
        assert_eq!(v.release(), &[Number::from(1), Number::from(0)]);
    }

    #[test]
    fn numbers_are_not_bounded_by_u64() {
        let v = parse("1.018446744073709551616.post99999999999999999999+00123456789012345678901");

        assert_eq!(
            v.to_string(),
            "1.18446744073709551616.post99999999999999999999+123456789012345678901"
        );
        assert!(matches!(v.local[0], LocalSegment::Numeric(_)));
    }
}
