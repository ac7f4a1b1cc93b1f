//! Arch Linux package versions
//!
//! `[epoch:]pkgver[-pkgrel]`, segments compared with pacman's `rpmvercmp`.
//!
//! pacman's [`vercmp`] skips the pkgrel unless both sides have one, which
//! makes `1.5-1 == 1.5 == 1.5-2` while `1.5-1 < 1.5-2`. [`ArchVersion`]
//! orders a missing pkgrel below any present one instead, so
//! `1.5 < 1.5-1 < 1.5-2` and the ordering stays total.

use std::cmp::Ordering;
use std::fmt;

use crate::version::error::{Result, VersionError};
use crate::version::grammar::VersionGrammar;
use crate::version::scheme::Scheme;

/// Arch version split into epoch, pkgver and pkgrel
#[derive(Debug, Clone)]
pub struct ArchVersion {
    /// Lowercased input with whitespace removed
    pub value: String,
    pub epoch: String,
    pub pkgver: String,
    pub pkgrel: Option<String>,
}

impl fmt::Display for ArchVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl PartialEq for ArchVersion {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for ArchVersion {}

/// Split `[epoch:]pkgver[-pkgrel]`.
///
/// Only a run of leading digits followed by `:` is an epoch; the pkgrel is
/// everything after the last hyphen.
pub fn parse_evr(evr: &str) -> (&str, &str, Option<&str>) {
    let digits = evr
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(evr.len());

    let (epoch, rest) = match evr[digits..].strip_prefix(':') {
        Some(rest) if digits == 0 => ("0", rest),
        Some(rest) => (&evr[..digits], rest),
        None => ("0", evr),
    };

    match rest.rsplit_once('-') {
        Some((pkgver, pkgrel)) => (epoch, pkgver, Some(pkgrel)),
        None => (epoch, rest, None),
    }
}

/// Length of the leading run of bytes matching `pred`.
fn run_len(s: &[u8], pred: impl Fn(&u8) -> bool) -> usize {
    s.iter().position(|b| !pred(b)).unwrap_or(s.len())
}

/// pacman's `rpmvercmp` segment walk.
pub fn rpmvercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let mut one = a.as_bytes();
    let mut two = b.as_bytes();

    while !one.is_empty() && !two.is_empty() {
        let sep1 = run_len(one, |b| !b.is_ascii_alphanumeric());
        let sep2 = run_len(two, |b| !b.is_ascii_alphanumeric());
        one = &one[sep1..];
        two = &two[sep2..];

        if one.is_empty() || two.is_empty() {
            break;
        }

        // A longer separator run means a newer version
        if sep1 != sep2 {
            return sep1.cmp(&sep2);
        }

        let is_num = one[0].is_ascii_digit();
        let (len1, len2) = if is_num {
            (
                run_len(one, u8::is_ascii_digit),
                run_len(two, u8::is_ascii_digit),
            )
        } else {
            (
                run_len(one, u8::is_ascii_alphabetic),
                run_len(two, u8::is_ascii_alphabetic),
            )
        };

        // Segments of different types: numeric is newer than alpha
        if len2 == 0 {
            return if is_num {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let (seg1, seg2) = (&one[..len1], &two[..len2]);
        let ordering = if is_num {
            let seg1 = &seg1[run_len(seg1, |b| *b == b'0')..];
            let seg2 = &seg2[run_len(seg2, |b| *b == b'0')..];
            seg1.len().cmp(&seg2.len()).then_with(|| seg1.cmp(seg2))
        } else {
            seg1.cmp(seg2)
        };
        if ordering != Ordering::Equal {
            return ordering;
        }

        one = &one[len1..];
        two = &two[len2..];
    }

    match (one.first(), two.first()) {
        (None, None) => Ordering::Equal,
        // A remaining alpha segment is older than nothing, e.g. 1.0rc < 1.0
        (None, Some(c)) if !c.is_ascii_alphabetic() => Ordering::Less,
        (Some(c), _) if c.is_ascii_alphabetic() => Ordering::Less,
        _ => Ordering::Greater,
    }
}

/// pacman's `alpm_pkg_vercmp`.
pub fn vercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let (epoch1, ver1, rel1) = parse_evr(a);
    let (epoch2, ver2, rel2) = parse_evr(b);

    rpmvercmp(epoch1, epoch2)
        .then_with(|| rpmvercmp(ver1, ver2))
        .then_with(|| match (rel1, rel2) {
            (Some(rel1), Some(rel2)) => rpmvercmp(rel1, rel2),
            _ => Ordering::Equal,
        })
}

impl VersionGrammar for ArchVersion {
    const SCHEME: Scheme = Scheme::Arch;

    fn validate(body: &str) -> Result<()> {
        if body.is_empty() {
            return Err(VersionError::invalid(Self::SCHEME, body, "empty version"));
        }
        Ok(())
    }

    fn normalize(body: &str) -> Result<Self> {
        let value = body.to_lowercase();
        let (epoch, pkgver, pkgrel) = parse_evr(&value);
        let (epoch, pkgver, pkgrel) = (
            epoch.to_string(),
            pkgver.to_string(),
            pkgrel.map(str::to_string),
        );
        Ok(ArchVersion {
            value,
            epoch,
            pkgver,
            pkgrel,
        })
    }

    fn compare(&self, other: &Self) -> Ordering {
        rpmvercmp(&self.epoch, &other.epoch)
            .then_with(|| rpmvercmp(&self.pkgver, &other.pkgver))
            .then_with(|| match (&self.pkgrel, &other.pkgrel) {
                (Some(a), Some(b)) => rpmvercmp(a, b),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }
}
