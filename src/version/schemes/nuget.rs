//! NuGet versions
//!
//! Ordered with the SemVer rules. This is an approximation: NuGet compares
//! a fourth numeric segment (`1.2.3.4`), which SemVer coercion folds into
//! build metadata and therefore ignores.

use std::cmp::Ordering;
use std::fmt;

use crate::version::error::Result;
use crate::version::grammar::VersionGrammar;
use crate::version::scheme::Scheme;
use crate::version::schemes::semver::{SemverVersion, coerce, validate_base};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NugetVersion(pub SemverVersion);

impl fmt::Display for NugetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl VersionGrammar for NugetVersion {
    const SCHEME: Scheme = Scheme::Nuget;

    fn validate(body: &str) -> Result<()> {
        validate_base(Self::SCHEME, body)
    }

    fn normalize(body: &str) -> Result<Self> {
        coerce(Self::SCHEME, body).map(NugetVersion)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.0.compare(&other.0)
    }
}
