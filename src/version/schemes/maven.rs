//! Maven artifact versions
//!
//! Implements the `ComparableVersion` algorithm used by Maven 3:
//!
//! - the version is lowercased and split into items on `.` and `-`, and on
//!   transitions between digits and letters
//! - `-` and digit/letter transitions open a nested list
//! - trailing "null" items (`0`, empty qualifiers, empty lists) are dropped,
//!   so `1 == 1.0 == 1.0.0 == 1.ga`
//! - qualifiers sort as `alpha < beta < milestone < rc < snapshot < "" < sp`,
//!   unknown qualifiers after all of them in lexical order

use std::cmp::Ordering;
use std::fmt;

use crate::version::error::{Result, VersionError};
use crate::version::grammar::VersionGrammar;
use crate::version::scheme::Scheme;
use crate::version::schemes::{compare_digits, strip_leading_zeros};

const QUALIFIERS: [&str; 7] = ["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];

/// Comparable form of the release qualifier (`""`)
const RELEASE_INDEX: &str = "5";

/// One item of a Maven version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MavenItem {
    /// Digits without leading zeros, `0` for zero
    Int(String),
    /// Qualifier after alias expansion
    Str(String),
    List(Vec<MavenItem>),
}

impl MavenItem {
    fn int(digits: &str) -> Self {
        match strip_leading_zeros(digits) {
            "" => MavenItem::Int("0".to_string()),
            stripped => MavenItem::Int(stripped.to_string()),
        }
    }

    fn qualifier(value: &str, followed_by_digit: bool) -> Self {
        let value = match value {
            "a" if followed_by_digit => "alpha",
            "b" if followed_by_digit => "beta",
            "m" if followed_by_digit => "milestone",
            "ga" | "final" | "release" => "",
            "cr" => "rc",
            other => other,
        };
        MavenItem::Str(value.to_string())
    }

    fn parse(is_digit: bool, buf: &str) -> Self {
        if is_digit {
            MavenItem::int(buf)
        } else {
            MavenItem::qualifier(buf, false)
        }
    }

    fn is_null(&self) -> bool {
        match self {
            MavenItem::Int(value) => value == "0",
            MavenItem::Str(value) => value.is_empty(),
            MavenItem::List(items) => items.is_empty(),
        }
    }

    /// Compare against an item, `None` standing in for a missing one.
    fn compare(&self, other: Option<&MavenItem>) -> Ordering {
        use MavenItem::*;

        match (self, other) {
            (Int(value), None) => {
                if value == "0" {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Int(a), Some(Int(b))) => compare_digits(a, b),
            (Int(_), Some(_)) => Ordering::Greater,

            (Str(value), None) => comparable_qualifier(value).as_str().cmp(RELEASE_INDEX),
            (Str(a), Some(Str(b))) => comparable_qualifier(a).cmp(&comparable_qualifier(b)),
            (Str(_), Some(_)) => Ordering::Less,

            (List(items), None) => items
                .first()
                .map_or(Ordering::Equal, |first| first.compare(None)),
            (List(a), Some(List(b))) => compare_lists(a, b),
            (List(_), Some(Int(_))) => Ordering::Less,
            (List(_), Some(Str(_))) => Ordering::Greater,
        }
    }
}

impl fmt::Display for MavenItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MavenItem::Int(value) | MavenItem::Str(value) => f.write_str(value),
            MavenItem::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(if matches!(item, MavenItem::List(_)) { "-" } else { "." })?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// Known qualifiers map to their index, unknown ones sort after all of them.
fn comparable_qualifier(qualifier: &str) -> String {
    match QUALIFIERS.iter().position(|q| *q == qualifier) {
        Some(index) => index.to_string(),
        None => format!("{}-{qualifier}", QUALIFIERS.len()),
    }
}

fn compare_lists(a: &[MavenItem], b: &[MavenItem]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let ordering = match (a.get(i), b.get(i)) {
            (Some(left), right) => left.compare(right),
            (None, Some(right)) => right.compare(None).reverse(),
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Drop trailing null items, stopping at the first non-list item.
fn normalize(items: &mut Vec<MavenItem>) {
    let mut i = items.len();
    while i > 0 {
        i -= 1;
        if items[i].is_null() {
            items.remove(i);
        } else if !matches!(items[i], MavenItem::List(_)) {
            break;
        }
    }
}

/// Split a lowercased version into its item tree.
pub fn parse_items(version: &str) -> Vec<MavenItem> {
    // levels[0] is the root list, each further level is the last item of the previous one
    let mut levels: Vec<Vec<MavenItem>> = vec![Vec::new()];
    let mut is_digit = false;
    let mut start = 0;

    for (i, c) in version.char_indices() {
        let Some(list) = levels.last_mut() else {
            break;
        };
        match c {
            '.' | '-' => {
                if i == start {
                    list.push(MavenItem::Int("0".to_string()));
                } else {
                    list.push(MavenItem::parse(is_digit, &version[start..i]));
                }
                start = i + 1;
                if c == '-' {
                    levels.push(Vec::new());
                }
            }
            c if c.is_ascii_digit() => {
                if !is_digit && i > start {
                    list.push(MavenItem::qualifier(&version[start..i], true));
                    start = i;
                    levels.push(Vec::new());
                }
                is_digit = true;
            }
            _ => {
                if is_digit && i > start {
                    list.push(MavenItem::int(&version[start..i]));
                    start = i;
                    levels.push(Vec::new());
                }
                is_digit = false;
            }
        }
    }

    if version.len() > start {
        if let Some(list) = levels.last_mut() {
            list.push(MavenItem::parse(is_digit, &version[start..]));
        }
    }

    while let Some(mut list) = levels.pop() {
        normalize(&mut list);
        match levels.last_mut() {
            Some(parent) => parent.push(MavenItem::List(list)),
            None => return list,
        }
    }
    Vec::new()
}

/// Parsed Maven version
#[derive(Debug, Clone)]
pub struct MavenVersion {
    pub items: Vec<MavenItem>,
}

impl MavenVersion {
    /// Canonical string, e.g. `1-rc-1` for `1.0-RC1`
    pub fn canonical(&self) -> String {
        MavenItem::List(self.items.clone()).to_string()
    }
}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for MavenVersion {}

impl VersionGrammar for MavenVersion {
    const SCHEME: Scheme = Scheme::Maven;

    fn validate(body: &str) -> Result<()> {
        if body.is_empty() {
            return Err(VersionError::invalid(Self::SCHEME, body, "empty version"));
        }
        Ok(())
    }

    fn normalize(body: &str) -> Result<Self> {
        Ok(MavenVersion {
            items: parse_items(&body.to_lowercase()),
        })
    }

    fn compare(&self, other: &Self) -> Ordering {
        compare_lists(&self.items, &other.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(s: &str) -> MavenVersion {
        MavenVersion::parse(s).unwrap()
    }

    #[rstest]
    #[case("1", "1")]
    #[case("1.0", "1")]
    #[case("1.0.0", "1")]
    #[case("1.ga", "1")]
    #[case("1-final", "1")]
    #[case("1.0-RC1", "1-rc-1")]
    #[case("1.0-cr1", "1-rc-1")]
    #[case("1a1", "1-alpha-1")]
    #[case("1.0-SNAPSHOT", "1-snapshot")]
    #[case("1.0.1", "1.0.1")]
    #[case("1.0-sp", "1-sp")]
    #[case("1-1.foo-bar1baz-.1", "1-1.foo-bar-1-baz-0.1")]
    fn canonical_returns_expected(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse(input).canonical(), expected);
    }

    #[rstest]
    #[case("1.0-alpha-1", "1.0-beta")]
    #[case("1.0-beta", "1.0-rc1")]
    #[case("1.0-rc1", "1.0-SNAPSHOT")]
    #[case("1.0-SNAPSHOT", "1.0")]
    #[case("1.0", "1.0-sp")]
    #[case("1.0-sp", "1.0.1")]
    #[case("1.0-sp", "1.0-abc")]
    #[case("1.0-abc", "1.0-xyz")]
    #[case("1.0-alpha1", "1.0-alpha2")]
    #[case("1.0-alpha2", "1.0-alpha10")]
    #[case("1a1", "1b1")]
    #[case("1m1", "1rc1")]
    #[case("1", "1.1")]
    #[case("1.1", "1.2")]
    #[case("1.2", "1.10")]
    #[case("1-1", "1.1")]
    #[case("1-snapshot", "1")]
    #[case("1", "1-sp")]
    #[case("2.0-1", "2.0.1")]
    #[case("2.0.1-klm", "2.0.1-lmn")]
    #[case("2.0.1", "2.0.1-xyz")]
    #[case("2.0.1", "2.0.1-123")]
    #[case("2.0.1-xyz", "2.0.1-123")]
    fn compare_orders_ascending(#[case] lower: &str, #[case] higher: &str) {
        assert_eq!(parse(lower).compare(&parse(higher)), Ordering::Less);
        assert_eq!(parse(higher).compare(&parse(lower)), Ordering::Greater);
    }

    #[rstest]
    #[case("1", "1.0")]
    #[case("1", "1.0.0")]
    #[case("1.0", "1.ga")]
    #[case("1.0", "1.final")]
    #[case("1.0", "1.release")]
    #[case("1.0", "1-GA")]
    #[case("1a", "1-a")]
    #[case("1a", "1.0-a")]
    #[case("1a", "1.0.0-a")]
    #[case("1x", "1-x")]
    #[case("1.0-cr1", "1.0-rc1")]
    #[case("1-01", "1-1")]
    fn compare_finds_equal(#[case] a: &str, #[case] b: &str) {
        assert_eq!(parse(a).compare(&parse(b)), Ordering::Equal);
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(matches!(
            MavenVersion::parse(""),
            Err(VersionError::InvalidVersion {
                scheme: Scheme::Maven,
                ..
            })
        ));
    }
}
