//! Scheme-specific version grammars

pub mod arch;
pub mod debian;
pub mod generic;
pub mod gentoo;
pub mod maven;
pub mod nuget;
pub mod pypi;
pub mod rpm;
pub mod semver;

pub use arch::ArchVersion;
pub use debian::DebianVersion;
pub use generic::GenericVersion;
pub use gentoo::GentooVersion;
pub use maven::MavenVersion;
pub use nuget::NugetVersion;
pub use pypi::PypiVersion;
pub use rpm::RpmVersion;
pub use semver::SemverVersion;

use std::cmp::Ordering;

/// Remove every whitespace character from a version body.
pub(crate) fn remove_spaces(body: &str) -> String {
    body.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Strip leading `0`s from a run of ASCII digits. `"000"` becomes `""`.
pub(crate) fn strip_leading_zeros(digits: &str) -> &str {
    digits.trim_start_matches('0')
}

/// Compare two runs of ASCII digits as unbounded integers.
///
/// Leading zeros are ignored and an empty run equals zero.
pub(crate) fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
