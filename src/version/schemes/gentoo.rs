//! Gentoo ebuild versions
//!
//! Represents a version string such as `1.2.3a_alpha4_beta5_pre6_rc7_p8-r9`.
//!
//! Ordering implements
//! [Algorithm 3.1](https://projects.gentoo.org/pms/9/pms.html#version-comparison):
//! numeric components are compared left-to-right, then the optional letter,
//! then suffixes (where `_p` sorts above the base while `_alpha`/`_beta`/`_pre`/`_rc`
//! sort below), and finally the revision.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::{Result, VersionError};
use crate::version::grammar::VersionGrammar;
use crate::version::scheme::Scheme;
use crate::version::schemes::compare_digits;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(?:\.[0-9]+)*[a-zA-Z]?(?:_(?:alpha|beta|pre|rc|p)[0-9]*)*$")
        .expect("valid ebuild version regex")
});

static SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_(alpha|beta|pre|rc|p)([0-9]*)").expect("valid ebuild suffix regex")
});

/// Version suffix type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuffixKind {
    Alpha,
    Beta,
    Pre,
    Rc,
    P,
}

impl SuffixKind {
    /// Sort weight; everything but `_p` sorts below the bare version
    fn order(&self) -> i32 {
        match self {
            SuffixKind::Alpha => -4,
            SuffixKind::Beta => -3,
            SuffixKind::Pre => -2,
            SuffixKind::Rc => -1,
            SuffixKind::P => 1,
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "alpha" => Some(SuffixKind::Alpha),
            "beta" => Some(SuffixKind::Beta),
            "pre" => Some(SuffixKind::Pre),
            "rc" => Some(SuffixKind::Rc),
            "p" => Some(SuffixKind::P),
            _ => None,
        }
    }
}

impl fmt::Display for SuffixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuffixKind::Alpha => write!(f, "_alpha"),
            SuffixKind::Beta => write!(f, "_beta"),
            SuffixKind::Pre => write!(f, "_pre"),
            SuffixKind::Rc => write!(f, "_rc"),
            SuffixKind::P => write!(f, "_p"),
        }
    }
}

/// One `_kind[N]` suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suffix {
    pub kind: SuffixKind,
    /// Raw digits, empty when the number is omitted (counts as zero)
    pub number: String,
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.number)
    }
}

impl Ord for Suffix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .order()
            .cmp(&other.kind.order())
            .then_with(|| compare_digits(&self.number, &other.number))
    }
}

impl PartialOrd for Suffix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parsed ebuild version
#[derive(Debug, Clone)]
pub struct GentooVersion {
    /// Dot-separated numeric components as written, leading zeros kept
    pub numbers: Vec<String>,
    pub letter: Option<char>,
    pub suffixes: Vec<Suffix>,
    /// Digits of `-rN`, `0` when absent
    pub revision: String,
}

impl fmt::Display for GentooVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.numbers.join("."))?;
        if let Some(letter) = self.letter {
            write!(f, "{letter}")?;
        }
        for suffix in &self.suffixes {
            write!(f, "{suffix}")?;
        }
        if compare_digits(&self.revision, "0") != Ordering::Equal {
            write!(f, "-r{}", self.revision)?;
        }
        Ok(())
    }
}

impl PartialEq for GentooVersion {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for GentooVersion {}

/// Split off a trailing `-rN` revision.
pub fn split_revision(body: &str) -> (&str, &str) {
    match body.rsplit_once("-r") {
        Some((version, revision))
            if !revision.is_empty() && revision.chars().all(|c| c.is_ascii_digit()) =>
        {
            (version, revision)
        }
        _ => (body, "0"),
    }
}

/// Compare a non-leading numeric component.
///
/// A component with a leading zero is compared as a decimal fraction:
/// trailing zeros are dropped and the rest compared as a string.
fn compare_component(a: &str, b: &str) -> Ordering {
    if a.starts_with('0') || b.starts_with('0') {
        a.trim_end_matches('0').cmp(b.trim_end_matches('0'))
    } else {
        compare_digits(a, b)
    }
}

fn compare_numbers(a: &[String], b: &[String]) -> Ordering {
    let (Some((a_first, a_rest)), Some((b_first, b_rest))) = (a.split_first(), b.split_first())
    else {
        return a.len().cmp(&b.len());
    };

    compare_digits(a_first, b_first)
        .then_with(|| {
            a_rest
                .iter()
                .zip(b_rest)
                .map(|(x, y)| compare_component(x, y))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.len().cmp(&b.len()))
}

fn compare_suffixes(a: &[Suffix], b: &[Suffix]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) => match x.cmp(y) {
                Ordering::Equal => continue,
                ordering => return ordering,
            },
            (Some(s), None) => {
                return if s.kind == SuffixKind::P {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
            }
            (None, Some(s)) => {
                return if s.kind == SuffixKind::P {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
            }
            (None, None) => break,
        }
    }
    Ordering::Equal
}

impl VersionGrammar for GentooVersion {
    const SCHEME: Scheme = Scheme::Ebuild;

    fn validate(body: &str) -> Result<()> {
        let (version, _) = split_revision(body);
        if !VERSION_RE.is_match(version) {
            return Err(VersionError::invalid(
                Self::SCHEME,
                body,
                "expected N[.N]*[a-z][_suffix[N]]*[-rN]",
            ));
        }
        Ok(())
    }

    fn normalize(body: &str) -> Result<Self> {
        Self::validate(body)?;
        let (version, revision) = split_revision(body);

        let suffix_start = version.find('_').unwrap_or(version.len());
        let (head, tail) = version.split_at(suffix_start);

        let (numbers, letter) = match head.chars().last() {
            Some(c) if c.is_ascii_alphabetic() => (&head[..head.len() - 1], Some(c)),
            _ => (head, None),
        };

        let suffixes = SUFFIX_RE
            .captures_iter(tail)
            .filter_map(|caps| {
                let kind = SuffixKind::from_label(caps.get(1)?.as_str())?;
                let number = caps.get(2).map_or("", |m| m.as_str()).to_string();
                Some(Suffix { kind, number })
            })
            .collect();

        Ok(GentooVersion {
            numbers: numbers.split('.').map(str::to_string).collect(),
            letter,
            suffixes,
            revision: revision.to_string(),
        })
    }

    fn compare(&self, other: &Self) -> Ordering {
        compare_numbers(&self.numbers, &other.numbers)
            // A missing letter sorts below any letter
            .then_with(|| self.letter.cmp(&other.letter))
            .then_with(|| compare_suffixes(&self.suffixes, &other.suffixes))
            .then_with(|| compare_digits(&self.revision, &other.revision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(s: &str) -> GentooVersion {
        GentooVersion::parse(s).unwrap()
    }

    #[test]
    fn normalize_extracts_all_parts() {
        let v = parse("1.2.3a_alpha4_beta_p8-r9");
        assert_eq!(v.numbers, vec!["1", "2", "3"]);
        assert_eq!(v.letter, Some('a'));
        assert_eq!(v.suffixes.len(), 3);
        assert_eq!(v.suffixes[0].kind, SuffixKind::Alpha);
        assert_eq!(v.suffixes[0].number, "4");
        assert_eq!(v.suffixes[1].kind, SuffixKind::Beta);
        assert_eq!(v.suffixes[1].number, "");
        assert_eq!(v.suffixes[2].kind, SuffixKind::P);
        assert_eq!(v.revision, "9");
        assert_eq!(v.to_string(), "1.2.3a_alpha4_beta_p8-r9");
    }

    #[test]
    fn revision_defaults_to_zero() {
        let v = parse("2.0");
        assert_eq!(v.revision, "0");
        assert_eq!(v.to_string(), "2.0");
    }

    #[rstest]
    #[case("bogus!!")]
    #[case("")]
    #[case("1.0-r")]
    #[case("1.0-rc1")]
    #[case("1.0_gamma")]
    #[case("1.0ab")]
    #[case(".1")]
    #[case("1..2")]
    #[case("a1.0")]
    #[case("١.٢")]
    #[case("1.٣_p1")]
    fn validate_rejects_malformed(#[case] input: &str) {
        assert!(matches!(
            GentooVersion::parse(input),
            Err(VersionError::InvalidVersion {
                scheme: Scheme::Ebuild,
                ..
            })
        ));
    }

    #[rstest]
    #[case("1.0_alpha", "1.0_beta", Ordering::Less)]
    #[case("1.0_beta", "1.0_pre", Ordering::Less)]
    #[case("1.0_pre", "1.0_rc", Ordering::Less)]
    #[case("1.0_rc", "1.0", Ordering::Less)]
    #[case("1.0", "1.0_p1", Ordering::Less)]
    #[case("1.0_p", "1.0_p0", Ordering::Equal)]
    #[case("1.0_rc1", "1.0_rc2", Ordering::Less)]
    #[case("1.0_alpha_p1", "1.0_alpha", Ordering::Greater)]
    #[case("1.0_alpha_beta", "1.0_alpha", Ordering::Less)]
    #[case("1.0", "1.0a", Ordering::Less)]
    #[case("1.0a", "1.0b", Ordering::Less)]
    #[case("1.0z", "1.0.1", Ordering::Less)]
    #[case("1.0", "1.0.0", Ordering::Less)]
    #[case("1.0-r1", "1.0", Ordering::Greater)]
    #[case("1.0-r1", "1.0-r01", Ordering::Equal)]
    #[case("1.0-r2", "1.0-r10", Ordering::Less)]
    #[case("1.2", "1.10", Ordering::Less)]
    #[case("01.0", "1.0", Ordering::Equal)]
    #[case("1.01", "1.1", Ordering::Less)]
    #[case("1.010", "1.01", Ordering::Equal)]
    #[case("1.01", "1.001", Ordering::Greater)]
    #[case("12.2.5", "12.2b", Ordering::Greater)]
    fn compare_follows_pms(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(parse(a).compare(&parse(b)), expected);
    }
}
