//! Version grammar abstraction shared by every scheme

use std::cmp::Ordering;

use crate::version::error::Result;
use crate::version::scheme::Scheme;

/// Trait for scheme-specific tokenization and ordering
///
/// Each scheme has its own rules:
/// - Debian: epoch, upstream and revision with `~` sorting before the end of a part
/// - PEP 440: dev < pre-release < release < post-release
/// - Gentoo: `_alpha < _beta < _pre < _rc < (none) < _p`
///
/// The implementing type is the normalized form; it is built once by
/// [`VersionGrammar::normalize`] and ordered by [`VersionGrammar::compare`].
pub trait VersionGrammar: Sized {
    /// Returns the scheme this grammar implements
    const SCHEME: Scheme;

    /// Syntactic acceptance check, run before normalization
    fn validate(body: &str) -> Result<()>;

    /// Build the normalized form of an already validated body
    fn normalize(body: &str) -> Result<Self>;

    /// Three-way comparison of two normalized forms
    fn compare(&self, other: &Self) -> Ordering;

    /// Validate then normalize
    fn parse(body: &str) -> Result<Self> {
        Self::validate(body)?;
        Self::normalize(body)
    }
}
