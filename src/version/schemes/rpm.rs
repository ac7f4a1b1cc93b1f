//! RPM versions
//!
//! Format: `[epoch:]version[-release]`. Version and release are compared with
//! `rpmvercmp`:
//!
//! - digit runs and letter runs alternate; any other character separates them
//! - numeric runs are newer than alphabetic runs
//! - `~` sorts before everything, including the end of the string (`1.0~rc1 < 1.0`)
//! - `^` sorts after the end of the string but before any further segment
//!   (`1.0 < 1.0^git1 < 1.0.1`)

use std::cmp::Ordering;
use std::fmt;

use crate::version::error::{Result, VersionError};
use crate::version::grammar::VersionGrammar;
use crate::version::scheme::Scheme;
use crate::version::schemes::{compare_digits, strip_leading_zeros};

/// Comparable unit of an RPM version string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpmSegment {
    Tilde,
    Caret,
    /// Digits without leading zeros
    Numeric(String),
    Alpha(String),
}

impl fmt::Display for RpmSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpmSegment::Tilde => f.write_str("~"),
            RpmSegment::Caret => f.write_str("^"),
            RpmSegment::Numeric(s) if s.is_empty() => f.write_str("0"),
            RpmSegment::Numeric(s) | RpmSegment::Alpha(s) => f.write_str(s),
        }
    }
}

/// Parsed RPM epoch-version-release
#[derive(Debug, Clone)]
pub struct RpmVersion {
    pub epoch: u64,
    pub version: Vec<RpmSegment>,
    pub release: Vec<RpmSegment>,
}

impl PartialEq for RpmVersion {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for RpmVersion {}

/// Split a version or release string into segments.
///
/// Separators are dropped; non-ASCII characters are ignored entirely.
pub fn segments(part: &str) -> Vec<RpmSegment> {
    let ascii: String = part.chars().filter(char::is_ascii).collect();
    let mut result = Vec::new();
    let mut rest = ascii.as_str();

    while let Some(c) = rest.chars().next() {
        let end = match c {
            '~' | '^' => 1,
            c if c.is_ascii_digit() => rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len()),
            c if c.is_ascii_alphabetic() => rest
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(rest.len()),
            _ => {
                rest = &rest[1..];
                continue;
            }
        };

        let (run, remaining) = rest.split_at(end);
        result.push(match c {
            '~' => RpmSegment::Tilde,
            '^' => RpmSegment::Caret,
            c if c.is_ascii_digit() => RpmSegment::Numeric(strip_leading_zeros(run).to_string()),
            _ => RpmSegment::Alpha(run.to_string()),
        });
        rest = remaining;
    }

    result
}

/// `rpmvercmp` over pre-split segments.
pub fn compare_segments(a: &[RpmSegment], b: &[RpmSegment]) -> Ordering {
    use RpmSegment::*;

    let mut a = a.iter();
    let mut b = b.iter();
    loop {
        let ordering = match (a.next(), b.next()) {
            (None, None) => return Ordering::Equal,
            (Some(Tilde), Some(Tilde)) | (Some(Caret), Some(Caret)) => Ordering::Equal,
            (Some(Tilde), _) => Ordering::Less,
            (_, Some(Tilde)) => Ordering::Greater,
            (Some(Caret), None) => Ordering::Greater,
            (Some(Caret), Some(_)) => Ordering::Less,
            (None, Some(Caret)) => Ordering::Less,
            (Some(_), Some(Caret)) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(Numeric(x)), Some(Numeric(y))) => compare_digits(x, y),
            (Some(Alpha(x)), Some(Alpha(y))) => x.cmp(y),
            // Numeric segments are always newer than alphabetic ones
            (Some(Numeric(_)), Some(Alpha(_))) => Ordering::Greater,
            (Some(Alpha(_)), Some(Numeric(_))) => Ordering::Less,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// Compare two raw strings with `rpmvercmp`.
pub fn vercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    compare_segments(&segments(a), &segments(b))
}

fn split_evr(body: &str) -> Result<(u64, &str, &str)> {
    let (epoch, rest) = match body.split_once(':') {
        Some((epoch, rest)) => {
            if epoch.is_empty() || !epoch.chars().all(|c| c.is_ascii_digit()) {
                return Err(VersionError::invalid(
                    Scheme::Rpm,
                    body,
                    "epoch must be an integer",
                ));
            }
            let epoch = epoch
                .parse()
                .map_err(|e| VersionError::invalid(Scheme::Rpm, body, format!("epoch: {e}")))?;
            (epoch, rest)
        }
        None => (0, body),
    };
    let (version, release) = rest.split_once('-').unwrap_or((rest, ""));
    Ok((epoch, version, release))
}

impl VersionGrammar for RpmVersion {
    const SCHEME: Scheme = Scheme::Rpm;

    fn validate(body: &str) -> Result<()> {
        let (_, version, _) = split_evr(body)?;
        if version.is_empty() {
            return Err(VersionError::invalid(Self::SCHEME, body, "empty version"));
        }
        Ok(())
    }

    fn normalize(body: &str) -> Result<Self> {
        let (epoch, version, release) = split_evr(body)?;
        Ok(RpmVersion {
            epoch,
            version: segments(version),
            release: segments(release),
        })
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_segments(&self.version, &other.version))
            .then_with(|| compare_segments(&self.release, &other.release))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(s: &str) -> RpmVersion {
        RpmVersion::parse(s).unwrap()
    }

    // Cases from rpm's own rpmvercmp.at test-suite
    #[rstest]
    #[case("1.0", "1.0", Ordering::Equal)]
    #[case("1.0", "2.0", Ordering::Less)]
    #[case("2.0.1", "2.0.1", Ordering::Equal)]
    #[case("2.0", "2.0.1", Ordering::Less)]
    #[case("2.0.1a", "2.0.1a", Ordering::Equal)]
    #[case("2.0.1a", "2.0.1", Ordering::Greater)]
    #[case("5.5p1", "5.5p2", Ordering::Less)]
    #[case("5.5p10", "5.5p1", Ordering::Greater)]
    #[case("10xyz", "10.1xyz", Ordering::Less)]
    #[case("xyz10", "xyz10.1", Ordering::Less)]
    #[case("xyz.4", "8", Ordering::Less)]
    #[case("5.5p1", "5.5.p1", Ordering::Equal)]
    #[case("5.5p1", "5.5.p10", Ordering::Less)]
    #[case("10b2", "10a1", Ordering::Greater)]
    #[case("1.0aa", "1.0a", Ordering::Greater)]
    #[case("10.0001", "10.1", Ordering::Equal)]
    #[case("10.0001", "10.0039", Ordering::Less)]
    #[case("4.999.9", "5.0", Ordering::Less)]
    #[case("20101121", "20101122", Ordering::Less)]
    #[case("2_0", "2_0", Ordering::Equal)]
    #[case("2.0", "2_0", Ordering::Equal)]
    #[case("a", "a", Ordering::Equal)]
    #[case("a+", "a_", Ordering::Equal)]
    #[case("+", "_", Ordering::Equal)]
    #[case("1.0~rc1", "1.0~rc1", Ordering::Equal)]
    #[case("1.0~rc1", "1.0", Ordering::Less)]
    #[case("1.0~rc1", "1.0~rc2", Ordering::Less)]
    #[case("1.0~rc1~git123", "1.0~rc1", Ordering::Less)]
    #[case("1.0^", "1.0", Ordering::Greater)]
    #[case("1.0^git1", "1.0", Ordering::Greater)]
    #[case("1.0^git1", "1.01", Ordering::Less)]
    #[case("1.0^20160101", "1.0.1", Ordering::Less)]
    #[case("1.0^git1", "1.0^git2", Ordering::Less)]
    #[case("1.0^20160101", "1.0~rc1", Ordering::Greater)]
    #[case("1.0^20160101^git1", "1.0^20160101", Ordering::Greater)]
    #[case("1.0~rc1^git1", "1.0~rc1", Ordering::Greater)]
    #[case("1.0^git1~pre", "1.0^git1", Ordering::Less)]
    fn vercmp_returns_expected(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(vercmp(a, b), expected);
    }

    #[rstest]
    #[case("1:11.13.2.0-1", "11.13.2.0-1", Ordering::Greater)]
    #[case("11.13.2-1", "11.13.2.0-1", Ordering::Less)]
    #[case("1.0-1", "1.0-2", Ordering::Less)]
    #[case("1.0", "1.0-1", Ordering::Less)]
    #[case("0:1.0-1", "1.0-1", Ordering::Equal)]
    #[case("2:0.1", "1:9.9", Ordering::Greater)]
    fn compare_uses_epoch_version_release(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(parse(a).compare(&parse(b)), expected);
    }

    #[test]
    fn normalize_splits_release_at_first_hyphen() {
        let v = parse("3:1.2-3.fc38-x");
        assert_eq!(v.epoch, 3);
        assert_eq!(v.version, segments("1.2"));
        assert_eq!(v.release, segments("3.fc38-x"));
    }

    #[rstest]
    #[case("x:1.0")]
    #[case(":1.0")]
    #[case("")]
    #[case("-1")]
    fn validate_rejects_malformed(#[case] input: &str) {
        assert!(matches!(
            RpmVersion::parse(input),
            Err(VersionError::InvalidVersion {
                scheme: Scheme::Rpm,
                ..
            })
        ));
    }
}
