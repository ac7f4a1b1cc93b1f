//! Generic version grammar
//!
//! Fallback for ecosystems without a dedicated scheme. The string is split
//! into maximal all-numeric and all-alphabetic runs; every other character is
//! a separator and empty runs are never produced:
//!
//! `10.2alpha3..patch.4` -> `10, 2, alpha, 3, patch, 4`

use std::cmp::Ordering;
use std::fmt;

use crate::version::error::{Result, VersionError};
use crate::version::grammar::VersionGrammar;
use crate::version::scheme::Scheme;
use crate::version::schemes::{compare_digits, strip_leading_zeros};

/// One run of a generic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericToken {
    /// Digits with leading zeros removed (`"0"` for zero)
    Numeric(String),
    /// Lowercased ASCII letters
    Alpha(String),
}

impl GenericToken {
    fn numeric(digits: &str) -> Self {
        let stripped = strip_leading_zeros(digits);
        if stripped.is_empty() {
            GenericToken::Numeric("0".to_string())
        } else {
            GenericToken::Numeric(stripped.to_string())
        }
    }
}

impl fmt::Display for GenericToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericToken::Numeric(n) => f.write_str(n),
            GenericToken::Alpha(s) => f.write_str(s),
        }
    }
}

impl Ord for GenericToken {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GenericToken::Numeric(a), GenericToken::Numeric(b)) => compare_digits(a, b),
            (GenericToken::Alpha(a), GenericToken::Alpha(b)) => a.cmp(b),
            // Letters mark pre-releases: 1.0alpha < 1.0.1
            (GenericToken::Alpha(_), GenericToken::Numeric(_)) => Ordering::Less,
            (GenericToken::Numeric(_), GenericToken::Alpha(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for GenericToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Tokenized generic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericVersion {
    tokens: Vec<GenericToken>,
}

impl GenericVersion {
    pub fn tokens(&self) -> &[GenericToken] {
        &self.tokens
    }
}

/// Split a string into numeric and alphabetic runs.
pub fn tokenize(body: &str) -> Vec<GenericToken> {
    let mut tokens = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find(|c: char| c.is_ascii_alphanumeric()) {
        rest = &rest[start..];
        let is_digit = rest.starts_with(|c: char| c.is_ascii_digit());
        let end = rest
            .find(|c: char| {
                if is_digit {
                    !c.is_ascii_digit()
                } else {
                    !c.is_ascii_alphabetic()
                }
            })
            .unwrap_or(rest.len());

        let (run, remaining) = rest.split_at(end);
        tokens.push(if is_digit {
            GenericToken::numeric(run)
        } else {
            GenericToken::Alpha(run.to_ascii_lowercase())
        });
        rest = remaining;
    }

    tokens
}

impl VersionGrammar for GenericVersion {
    const SCHEME: Scheme = Scheme::Generic;

    fn validate(body: &str) -> Result<()> {
        if !body.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(VersionError::invalid(
                Self::SCHEME,
                body,
                "no numeric or alphabetic component",
            ));
        }
        Ok(())
    }

    fn normalize(body: &str) -> Result<Self> {
        Ok(GenericVersion {
            tokens: tokenize(body),
        })
    }

    fn compare(&self, other: &Self) -> Ordering {
        // Vec ordering: element-wise, a strict prefix sorts lower
        self.tokens.cmp(&other.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(s: &str) -> GenericVersion {
        GenericVersion::parse(s).unwrap()
    }

    fn rendered(s: &str) -> Vec<String> {
        parse(s).tokens().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn tokenize_splits_digit_and_letter_runs() {
        assert_eq!(
            rendered("10.2alpha3..patch.4"),
            vec!["10", "2", "alpha", "3", "patch", "4"]
        );
    }

    #[test]
    fn tokenize_keeps_token_kinds() {
        assert_eq!(
            parse("1a").tokens(),
            &[
                GenericToken::Numeric("1".to_string()),
                GenericToken::Alpha("a".to_string())
            ]
        );
    }

    #[rstest]
    #[case("007", vec!["7"])]
    #[case("0.0", vec!["0", "0"])]
    #[case("RC1", vec!["rc", "1"])]
    #[case("1_0-beta+2", vec!["1", "0", "beta", "2"])]
    fn tokenize_normalizes_runs(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(rendered(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("...")]
    #[case("-_+")]
    fn validate_rejects_strings_without_runs(#[case] input: &str) {
        assert!(matches!(
            GenericVersion::parse(input),
            Err(VersionError::InvalidVersion { .. })
        ));
    }

    #[rstest]
    #[case("1.0", "1.0.1", Ordering::Less)]
    #[case("1.10", "1.9", Ordering::Greater)]
    #[case("1.0", "1_0", Ordering::Equal)]
    #[case("1.0alpha", "1.0.1", Ordering::Less)]
    #[case("1.0alpha", "1.0beta", Ordering::Less)]
    #[case("1.0", "1.0alpha", Ordering::Less)]
    #[case("2.0", "10.0", Ordering::Less)]
    #[case("1.01", "1.1", Ordering::Equal)]
    fn compare_returns_expected(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(parse(a).compare(&parse(b)), expected);
    }
}
