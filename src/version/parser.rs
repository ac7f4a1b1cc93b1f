//! Dispatch parser for `scheme:body` strings

use tracing::trace;

use crate::version::error::Result;
use crate::version::registry::scheme_for_id;
use crate::version::scheme::Scheme;
use crate::version::value::Version;

/// Split an input into its scheme and body.
///
/// Everything before the first `:` is the scheme identifier. Without a colon
/// the scheme is [`Scheme::Generic`] and the body is the whole input.
pub fn split_scheme(input: &str) -> Result<(Scheme, &str)> {
    match input.split_once(':') {
        Some((id, body)) => Ok((scheme_for_id(id)?, body)),
        None => Ok((Scheme::Generic, input)),
    }
}

/// Parse a version string, optionally prefixed with `scheme:`.
///
/// # Errors
/// * `UnknownScheme` - the prefix is not a registered scheme identifier
/// * `InvalidVersion` - the body is rejected by the scheme's grammar
pub fn parse_version(input: &str) -> Result<Version> {
    let (scheme, body) = split_scheme(input)?;
    trace!(input, %scheme, "Dispatching version");
    Version::from_scheme(scheme, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::error::VersionError;
    use rstest::rstest;

    #[rstest]
    #[case("rpm:1.0-1", Scheme::Rpm, "1.0-1")]
    #[case("debian:1:2.0-1", Scheme::Debian, "1:2.0-1")]
    #[case("1.0", Scheme::Generic, "1.0")]
    #[case("generic:1.0", Scheme::Generic, "1.0")]
    #[case("semver:", Scheme::Semver, "")]
    fn split_scheme_returns_expected(
        #[case] input: &str,
        #[case] scheme: Scheme,
        #[case] body: &str,
    ) {
        assert_eq!(split_scheme(input), Ok((scheme, body)));
    }

    #[rstest]
    #[case("foo:1.0", "foo")]
    #[case("RPM:1.0", "RPM")]
    #[case("1:2.0", "1")]
    #[case(":1.0", "")]
    fn parse_version_rejects_unknown_prefix(#[case] input: &str, #[case] id: &str) {
        assert_eq!(
            parse_version(input).unwrap_err(),
            VersionError::UnknownScheme(id.to_string())
        );
    }

    #[test]
    fn parse_version_propagates_invalid_body() {
        assert!(matches!(
            parse_version("pypi:2.//////"),
            Err(VersionError::InvalidVersion {
                scheme: Scheme::Pypi,
                ..
            })
        ));
    }
}
