//! Debian package versions
//!
//! Format: `[epoch:]upstream_version[-debian_revision]`, see
//! <https://www.debian.org/doc/debian-policy/ch-controlfields.html#version>.
//!
//! The revision starts after the *last* hyphen. Upstream and revision are
//! compared with the dpkg algorithm: alternating non-digit and digit runs,
//! where `~` sorts before everything (even the end of the part) and letters
//! sort before other symbols.

use std::cmp::Ordering;
use std::fmt;

use crate::version::error::{Result, VersionError};
use crate::version::grammar::VersionGrammar;
use crate::version::scheme::Scheme;
use crate::version::schemes::{compare_digits, strip_leading_zeros};

/// One `(non-digit, digit)` pair of a dpkg version part
///
/// Parts always decompose into pairs; a missing run is empty and an empty
/// digit run counts as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub alpha: String,
    /// Digits without leading zeros, empty when the run is absent
    pub numeric: String,
}

/// Parsed Debian version
#[derive(Debug, Clone)]
pub struct DebianVersion {
    pub epoch: u64,
    pub upstream: Vec<Segment>,
    /// A missing revision is stored as `0`
    pub revision: Vec<Segment>,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.alpha, self.numeric)
    }
}

impl PartialEq for DebianVersion {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for DebianVersion {}

/// Split a version part into `(non-digit, digit)` pairs.
pub fn segments(part: &str) -> Vec<Segment> {
    let mut result = Vec::new();
    let mut rest = part;

    while !rest.is_empty() {
        let alpha_end = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let (alpha, remaining) = rest.split_at(alpha_end);
        let digit_end = remaining
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(remaining.len());
        let (digits, remaining) = remaining.split_at(digit_end);

        let numeric = match strip_leading_zeros(digits) {
            "" if !digits.is_empty() => "0",
            stripped => stripped,
        };
        result.push(Segment {
            alpha: alpha.to_string(),
            numeric: numeric.to_string(),
        });
        rest = remaining;
    }

    result
}

/// dpkg character weight; `None` is the end of the string.
fn order(c: Option<char>) -> i32 {
    match c {
        None => 0,
        Some('~') => -1,
        Some(c) if c.is_ascii_alphabetic() => c as i32,
        Some(c) => c as i32 + 256,
    }
}

/// Compare two non-digit runs.
pub fn compare_alpha(a: &str, b: &str) -> Ordering {
    let mut a = a.chars();
    let mut b = b.chars();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return Ordering::Equal,
            (x, y) => match order(x).cmp(&order(y)) {
                Ordering::Equal => continue,
                ordering => return ordering,
            },
        }
    }
}

/// Compare two parts (upstream or revision) with the dpkg algorithm.
pub fn compare_segments(a: &[Segment], b: &[Segment]) -> Ordering {
    let empty = Segment {
        alpha: String::new(),
        numeric: String::new(),
    };
    let len = a.len().max(b.len());

    for i in 0..len {
        let left = a.get(i).unwrap_or(&empty);
        let right = b.get(i).unwrap_or(&empty);

        match compare_alpha(&left.alpha, &right.alpha) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
        match compare_digits(&left.numeric, &right.numeric) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
    }

    Ordering::Equal
}

fn split_epoch(body: &str) -> Result<(u64, &str)> {
    let Some((epoch, rest)) = body.split_once(':') else {
        return Ok((0, body));
    };

    if epoch.is_empty() || !epoch.chars().all(|c| c.is_ascii_digit()) {
        return Err(VersionError::invalid(
            Scheme::Debian,
            body,
            "epoch must be an integer; epochless versions cannot contain ':'",
        ));
    }

    let epoch = epoch
        .parse()
        .map_err(|e| VersionError::invalid(Scheme::Debian, body, format!("epoch: {e}")))?;
    Ok((epoch, rest))
}

fn is_upstream_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '~' | '_' | ':' | '-')
}

fn is_revision_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '~' | '_')
}

impl VersionGrammar for DebianVersion {
    const SCHEME: Scheme = Scheme::Debian;

    fn validate(body: &str) -> Result<()> {
        let (_, rest) = split_epoch(body)?;
        let (upstream, revision) = match rest.rsplit_once('-') {
            Some((upstream, revision)) => (upstream, Some(revision)),
            None => (rest, None),
        };

        if upstream.is_empty() {
            return Err(VersionError::invalid(
                Self::SCHEME,
                body,
                "empty upstream version",
            ));
        }
        if let Some(c) = upstream.chars().find(|&c| !is_upstream_char(c)) {
            return Err(VersionError::invalid(
                Self::SCHEME,
                body,
                format!("invalid character '{c}' in upstream version"),
            ));
        }

        if let Some(revision) = revision {
            if revision.is_empty() {
                return Err(VersionError::invalid(
                    Self::SCHEME,
                    body,
                    "empty debian revision",
                ));
            }
            if let Some(c) = revision.chars().find(|&c| !is_revision_char(c)) {
                return Err(VersionError::invalid(
                    Self::SCHEME,
                    body,
                    format!("invalid character '{c}' in debian revision"),
                ));
            }
        }

        Ok(())
    }

    fn normalize(body: &str) -> Result<Self> {
        let (epoch, rest) = split_epoch(body)?;
        let (upstream, revision) = rest.rsplit_once('-').unwrap_or((rest, "0"));

        Ok(DebianVersion {
            epoch,
            upstream: segments(upstream),
            revision: segments(revision),
        })
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_segments(&self.upstream, &other.upstream))
            .then_with(|| compare_segments(&self.revision, &other.revision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(s: &str) -> DebianVersion {
        DebianVersion::parse(s).unwrap()
    }

    #[rstest]
    #[case("a", "b", Ordering::Less)]
    #[case("a", "-", Ordering::Less)]
    #[case("a", "+", Ordering::Less)]
    #[case("a", "", Ordering::Greater)]
    #[case("", "", Ordering::Equal)]
    #[case("~", "", Ordering::Less)]
    #[case("~~", "~", Ordering::Less)]
    #[case("~~", "~~a", Ordering::Less)]
    #[case("~~a", "~", Ordering::Less)]
    #[case("~", "a", Ordering::Less)]
    #[case("+", ".", Ordering::Less)]
    fn compare_alpha_returns_expected(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_alpha(a, b), expected);
    }

    #[test]
    fn normalize_splits_epoch_upstream_and_revision() {
        let v = parse("2:1.0.3-1ubuntu2");
        assert_eq!(v.epoch, 2);
        let upstream: Vec<String> = v.upstream.iter().map(ToString::to_string).collect();
        assert_eq!(upstream, vec!["1", ".0", ".3"]);
        let revision: Vec<String> = v.revision.iter().map(ToString::to_string).collect();
        assert_eq!(revision, vec!["1", "ubuntu2"]);
    }

    #[test]
    fn normalize_splits_revision_at_last_hyphen() {
        let v = parse("1.0-beta-3");
        assert_eq!(v.upstream, segments("1.0-beta"));
        assert_eq!(v.revision, segments("3"));
    }

    #[rstest]
    #[case("a:1.0")]
    #[case(":1.0")]
    #[case("1.0-")]
    #[case("")]
    #[case("-1")]
    #[case("1.0/2")]
    #[case("1.0-1:2")]
    #[case("99999999999999999999:1.0")]
    fn validate_rejects_malformed(#[case] input: &str) {
        assert!(matches!(
            DebianVersion::parse(input),
            Err(VersionError::InvalidVersion {
                scheme: Scheme::Debian,
                ..
            })
        ));
    }

    #[rstest]
    #[case("1.0-1", "1.0-2", Ordering::Less)]
    #[case("2:1.0", "1:5.0", Ordering::Greater)]
    #[case("1.0", "1.0-0", Ordering::Equal)]
    #[case("1.0", "1.00", Ordering::Equal)]
    #[case("0:1.0", "1.0", Ordering::Equal)]
    #[case("1.0~rc1", "1.0", Ordering::Less)]
    #[case("1.0~~", "1.0~", Ordering::Less)]
    #[case("1.0", "1.0a", Ordering::Less)]
    #[case("1.0a", "1.0+", Ordering::Less)]
    #[case("1.0+b1", "1.0.1", Ordering::Less)]
    #[case("1.2.10", "1.2.9", Ordering::Greater)]
    #[case("7.6p2-4", "7.6-0", Ordering::Greater)]
    #[case("1.0.3-3", "1.0-1", Ordering::Greater)]
    #[case("1.3", "1.2.2-2", Ordering::Greater)]
    #[case("1.1.6-r-1", "1.1.6-1", Ordering::Greater)]
    fn compare_follows_dpkg(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(parse(a).compare(&parse(b)), expected);
    }
}
