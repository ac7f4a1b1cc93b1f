//! Static lookup tables from scheme and package-ecosystem identifiers to
//! version constructors
//!
//! Both tables are built once on first use and never mutated afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::trace;

use crate::version::error::{Result, VersionError};
use crate::version::scheme::Scheme;
use crate::version::value::Constructor;

static BY_SCHEME_ID: LazyLock<HashMap<&'static str, Scheme>> = LazyLock::new(|| {
    Scheme::ALL
        .iter()
        .map(|scheme| (scheme.as_str(), *scheme))
        .collect()
});

static BY_PACKAGE_ECOSYSTEM: LazyLock<HashMap<&'static str, Scheme>> = LazyLock::new(|| {
    HashMap::from([
        ("deb", Scheme::Debian),
        ("maven", Scheme::Maven),
        ("pypi", Scheme::Pypi),
        ("nuget", Scheme::Nuget),
        ("rpm", Scheme::Rpm),
        ("ebuild", Scheme::Ebuild),
        ("alpm", Scheme::Arch),
        // Approximation: these ecosystems have their own rules, SemVer is
        // the closest shared grammar.
        ("generic", Scheme::Semver),
        ("npm", Scheme::Semver),
        ("cargo", Scheme::Semver),
        ("gem", Scheme::Semver),
        ("golang", Scheme::Semver),
        ("composer", Scheme::Semver),
        ("hex", Scheme::Semver),
        ("mozilla", Scheme::Semver),
        ("github", Scheme::Semver),
        ("apache", Scheme::Semver),
    ])
});

/// Resolve a scheme identifier (`debian`, `rpm`, ...).
pub fn scheme_for_id(id: &str) -> Result<Scheme> {
    let scheme = BY_SCHEME_ID
        .get(id)
        .copied()
        .ok_or_else(|| VersionError::UnknownScheme(id.to_string()))?;
    trace!(id, %scheme, "Resolved scheme identifier");
    Ok(scheme)
}

/// Resolve a package ecosystem identifier (`npm`, `deb`, ...) to its scheme.
pub fn scheme_for_package_type(package_type: &str) -> Result<Scheme> {
    let scheme = BY_PACKAGE_ECOSYSTEM
        .get(package_type)
        .copied()
        .ok_or_else(|| VersionError::UnknownScheme(package_type.to_string()))?;
    trace!(package_type, %scheme, "Resolved package type");
    Ok(scheme)
}

/// Constructor registered under a scheme identifier
pub fn version_class_for_scheme(id: &str) -> Result<Constructor> {
    scheme_for_id(id).map(|scheme| scheme.constructor())
}

/// Constructor registered under a package ecosystem identifier
///
/// Used by package-metadata collaborators to pick a scheme without
/// hardcoding its identifier.
pub fn version_class_for_package_type(package_type: &str) -> Result<Constructor> {
    scheme_for_package_type(package_type).map(|scheme| scheme.constructor())
}

/// Package ecosystem identifiers known to the registry, sorted
pub fn package_types() -> Vec<&'static str> {
    let mut types: Vec<&'static str> = BY_PACKAGE_ECOSYSTEM.keys().copied().collect();
    types.sort_unstable();
    types
}
