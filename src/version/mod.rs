//! Version parsing and comparison across package ecosystems
//!
//! This module turns version strings such as `debian:1:2.30-1ubuntu1` or
//! `pypi:1.0rc1` into scheme-tagged values that order according to the
//! rules of their ecosystem.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Parser    │────▶│  Registry   │────▶│   Version   │
//! │ (scheme:v)  │     │  (lookup)   │     │  (compare)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │   Schemes   │
//!                                         │(deb,rpm,..) │
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`parser`]: splits the `scheme:` prefix and dispatches to a constructor
//! - [`registry`]: static scheme and package-ecosystem tables
//! - [`value`]: the [`Version`] value and its tagged normalized form
//! - [`grammar`]: the validate / normalize / compare trait every scheme implements
//! - [`schemes`]: per-ecosystem grammars
//! - [`scheme`]: the closed [`Scheme`] enum
//! - [`error`]: error types for parsing and comparison

pub mod error;
pub mod grammar;
pub mod parser;
pub mod registry;
pub mod scheme;
pub mod schemes;
pub mod value;

pub use error::{Result, VersionError};
pub use grammar::VersionGrammar;
pub use parser::{parse_version, split_scheme};
pub use registry::{
    package_types, scheme_for_id, scheme_for_package_type, version_class_for_package_type,
    version_class_for_scheme,
};
pub use scheme::Scheme;
pub use value::{Constructor, ParsedVersion, Version};
