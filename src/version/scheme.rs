//! Version scheme identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::version::error::{Result, VersionError};

/// Grammar used to parse and order a version string
///
/// The set is closed: every variant has exactly one validator and one
/// comparator, selected by exhaustive matches in [`crate::version::value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Fallback: digit and letter runs (`10.2alpha3..patch.4`)
    Generic,
    /// Semantic versioning with coercion (`v1.2` -> `1.2.0`)
    Semver,
    /// Debian policy (`1:2.30-1ubuntu1`)
    Debian,
    /// PEP 440 (`1.0rc1.post2.dev3+local.7`)
    Pypi,
    /// Maven `ComparableVersion` (`1.0-SNAPSHOT`)
    Maven,
    /// NuGet, ordered with the SemVer rules
    Nuget,
    /// RPM `[epoch:]version[-release]` (`1:1.0~rc1-3.fc38`)
    Rpm,
    /// Gentoo ebuild (`1.2.3a_rc1_p2-r3`)
    Ebuild,
    /// Arch Linux pacman `vercmp` (`1:1.5.b-2`)
    Arch,
}

impl Scheme {
    /// All schemes in registry order
    pub const ALL: [Scheme; 9] = [
        Scheme::Generic,
        Scheme::Semver,
        Scheme::Debian,
        Scheme::Pypi,
        Scheme::Maven,
        Scheme::Nuget,
        Scheme::Rpm,
        Scheme::Ebuild,
        Scheme::Arch,
    ];

    /// Returns the identifier used as `scheme:` prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Generic => "generic",
            Scheme::Semver => "semver",
            Scheme::Debian => "debian",
            Scheme::Pypi => "pypi",
            Scheme::Maven => "maven",
            Scheme::Nuget => "nuget",
            Scheme::Rpm => "rpm",
            Scheme::Ebuild => "ebuild",
            Scheme::Arch => "arch",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scheme {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "generic" => Ok(Scheme::Generic),
            "semver" => Ok(Scheme::Semver),
            "debian" => Ok(Scheme::Debian),
            "pypi" => Ok(Scheme::Pypi),
            "maven" => Ok(Scheme::Maven),
            "nuget" => Ok(Scheme::Nuget),
            "rpm" => Ok(Scheme::Rpm),
            "ebuild" => Ok(Scheme::Ebuild),
            "arch" => Ok(Scheme::Arch),
            _ => Err(VersionError::UnknownScheme(s.to_string())),
        }
    }
}
