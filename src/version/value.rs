//! Scheme-tagged version value

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::version::error::{Result, VersionError};
use crate::version::grammar::VersionGrammar;
use crate::version::parser::parse_version;
use crate::version::scheme::Scheme;
use crate::version::schemes::{
    ArchVersion, DebianVersion, GenericVersion, GentooVersion, MavenVersion, NugetVersion,
    PypiVersion, RpmVersion, SemverVersion, remove_spaces,
};

/// Constructor registered for a scheme: builds a [`Version`] from a body
pub type Constructor = fn(&str) -> Result<Version>;

/// Normalized form of a version, one variant per [`Scheme`]
#[derive(Debug, Clone)]
pub enum ParsedVersion {
    Generic(GenericVersion),
    Semver(SemverVersion),
    Debian(DebianVersion),
    Pypi(PypiVersion),
    Maven(MavenVersion),
    Nuget(NugetVersion),
    Rpm(RpmVersion),
    Ebuild(GentooVersion),
    Arch(ArchVersion),
}

impl ParsedVersion {
    pub fn scheme(&self) -> Scheme {
        match self {
            ParsedVersion::Generic(_) => Scheme::Generic,
            ParsedVersion::Semver(_) => Scheme::Semver,
            ParsedVersion::Debian(_) => Scheme::Debian,
            ParsedVersion::Pypi(_) => Scheme::Pypi,
            ParsedVersion::Maven(_) => Scheme::Maven,
            ParsedVersion::Nuget(_) => Scheme::Nuget,
            ParsedVersion::Rpm(_) => Scheme::Rpm,
            ParsedVersion::Ebuild(_) => Scheme::Ebuild,
            ParsedVersion::Arch(_) => Scheme::Arch,
        }
    }

    /// Compare two normalized forms of the same scheme.
    ///
    /// Returns `IncomparableSchemes` when the variants differ.
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        use ParsedVersion::*;

        let ordering = match (self, other) {
            (Generic(a), Generic(b)) => a.compare(b),
            (Semver(a), Semver(b)) => a.compare(b),
            (Debian(a), Debian(b)) => a.compare(b),
            (Pypi(a), Pypi(b)) => a.compare(b),
            (Maven(a), Maven(b)) => a.compare(b),
            (Nuget(a), Nuget(b)) => a.compare(b),
            (Rpm(a), Rpm(b)) => a.compare(b),
            (Ebuild(a), Ebuild(b)) => a.compare(b),
            (Arch(a), Arch(b)) => a.compare(b),
            _ => {
                return Err(VersionError::IncomparableSchemes {
                    left: self.scheme(),
                    right: other.scheme(),
                });
            }
        };
        Ok(ordering)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedVersion::Generic(v) => {
                let tokens: Vec<String> = v.tokens().iter().map(ToString::to_string).collect();
                f.write_str(&tokens.join("."))
            }
            ParsedVersion::Semver(v) => fmt::Display::fmt(v, f),
            ParsedVersion::Debian(v) => {
                if v.epoch != 0 {
                    write!(f, "{}:", v.epoch)?;
                }
                for segment in &v.upstream {
                    write!(f, "{segment}")?;
                }
                f.write_str("-")?;
                for segment in &v.revision {
                    write!(f, "{segment}")?;
                }
                Ok(())
            }
            ParsedVersion::Pypi(v) => fmt::Display::fmt(v, f),
            ParsedVersion::Maven(v) => fmt::Display::fmt(v, f),
            ParsedVersion::Nuget(v) => fmt::Display::fmt(v, f),
            ParsedVersion::Rpm(v) => {
                if v.epoch != 0 {
                    write!(f, "{}:", v.epoch)?;
                }
                let version: Vec<String> = v.version.iter().map(ToString::to_string).collect();
                f.write_str(&version.join("."))?;
                if !v.release.is_empty() {
                    let release: Vec<String> = v.release.iter().map(ToString::to_string).collect();
                    write!(f, "-{}", release.join("."))?;
                }
                Ok(())
            }
            ParsedVersion::Ebuild(v) => fmt::Display::fmt(v, f),
            ParsedVersion::Arch(v) => fmt::Display::fmt(v, f),
        }
    }
}

macro_rules! impl_from_grammar {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParsedVersion {
                fn from(value: $ty) -> Self {
                    ParsedVersion::$variant(value)
                }
            }
        )*
    };
}

impl_from_grammar! {
    Generic => GenericVersion,
    Semver => SemverVersion,
    Debian => DebianVersion,
    Pypi => PypiVersion,
    Maven => MavenVersion,
    Nuget => NugetVersion,
    Rpm => RpmVersion,
    Ebuild => GentooVersion,
    Arch => ArchVersion,
}

/// Immutable version value: scheme, original text and normalized form
///
/// Comparison operators delegate to the scheme's comparator. Comparing two
/// versions of different schemes through `==`, `<` and friends panics with
/// [`VersionError::IncomparableSchemes`]; use [`Version::try_cmp`] to get the
/// error instead.
#[derive(Debug, Clone)]
pub struct Version {
    text: String,
    parsed: ParsedVersion,
}

fn construct<G>(body: &str) -> Result<Version>
where
    G: VersionGrammar,
    ParsedVersion: From<G>,
{
    let scheme = G::SCHEME;
    let cleaned = remove_spaces(body);
    match G::parse(&cleaned) {
        Ok(parsed) => {
            let parsed = ParsedVersion::from(parsed);
            debug!(%scheme, body, normalized = %parsed, "Parsed version");
            Ok(Version {
                text: body.to_string(),
                parsed,
            })
        }
        Err(e) => {
            debug!(%scheme, body, error = %e, "Rejected version");
            Err(e)
        }
    }
}

fn validate_with<G: VersionGrammar>(body: &str) -> Result<()> {
    G::validate(&remove_spaces(body))
}

impl Scheme {
    /// Constructor for this scheme, as stored in the registry
    pub fn constructor(&self) -> Constructor {
        match self {
            Scheme::Generic => construct::<GenericVersion>,
            Scheme::Semver => construct::<SemverVersion>,
            Scheme::Debian => construct::<DebianVersion>,
            Scheme::Pypi => construct::<PypiVersion>,
            Scheme::Maven => construct::<MavenVersion>,
            Scheme::Nuget => construct::<NugetVersion>,
            Scheme::Rpm => construct::<RpmVersion>,
            Scheme::Ebuild => construct::<GentooVersion>,
            Scheme::Arch => construct::<ArchVersion>,
        }
    }

    /// Run only the syntactic acceptance check of this scheme.
    pub fn validate(&self, body: &str) -> Result<()> {
        match self {
            Scheme::Generic => validate_with::<GenericVersion>(body),
            Scheme::Semver => validate_with::<SemverVersion>(body),
            Scheme::Debian => validate_with::<DebianVersion>(body),
            Scheme::Pypi => validate_with::<PypiVersion>(body),
            Scheme::Maven => validate_with::<MavenVersion>(body),
            Scheme::Nuget => validate_with::<NugetVersion>(body),
            Scheme::Rpm => validate_with::<RpmVersion>(body),
            Scheme::Ebuild => validate_with::<GentooVersion>(body),
            Scheme::Arch => validate_with::<ArchVersion>(body),
        }
    }
}

impl Version {
    /// Build a version of the given scheme from an unprefixed body.
    ///
    /// Whitespace is removed before validation; the original text is kept.
    pub fn from_scheme(scheme: Scheme, body: &str) -> Result<Self> {
        scheme.constructor()(body)
    }

    pub fn scheme(&self) -> Scheme {
        self.parsed.scheme()
    }

    /// Original body, without the scheme prefix
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn parsed(&self) -> &ParsedVersion {
        &self.parsed
    }

    /// Three-way comparison that reports cross-scheme comparisons as errors.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        self.parsed.compare(&other.parsed)
    }

    fn cmp_or_panic(&self, other: &Self) -> Ordering {
        match self.try_cmp(other) {
            Ok(ordering) => ordering,
            Err(e) => panic!("{e}"),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_or_panic(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_or_panic(other)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme(), self.text)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        parse_version(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_version(&text).map_err(serde::de::Error::custom)
    }
}
