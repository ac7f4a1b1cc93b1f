pub mod config;
pub mod version;

pub use version::{
    Constructor, ParsedVersion, Scheme, Version, VersionError, parse_version,
    version_class_for_package_type, version_class_for_scheme,
};
