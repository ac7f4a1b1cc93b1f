use std::cmp::Ordering;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use univers::config::{self, CliConfig};
use univers::version::{Scheme, Version, VersionError, parse_version, scheme_for_id};

#[derive(Parser)]
#[command(name = "univers")]
#[command(version, about = "Parse and compare package versions across ecosystems")]
struct Cli {
    /// Construct every input with this scheme (e.g. debian, rpm, pypi)
    #[arg(long, global = true, conflicts_with = "package_type")]
    scheme: Option<Scheme>,

    /// Resolve the scheme from a package ecosystem (e.g. deb, npm, alpm)
    #[arg(long, global = true)]
    package_type: Option<String>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare two versions and print `<`, `=` or `>`
    Compare { left: String, right: String },
    /// Parse versions and print their display form
    Parse {
        #[arg(required = true)]
        versions: Vec<String>,
        /// Also print the normalized form
        #[arg(long)]
        verbose: bool,
    },
    /// Print versions in ascending order
    Sort {
        #[arg(required = true)]
        versions: Vec<String>,
        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },
}

/// How inputs are turned into versions
enum Resolver {
    /// Every input uses this scheme
    Fixed(Scheme),
    /// `scheme:` prefixes are honored, unprefixed inputs use the fallback
    Prefixed(Option<Scheme>),
}

impl Resolver {
    fn new(cli: &Cli, config: &CliConfig) -> anyhow::Result<Self> {
        if let Some(scheme) = cli.scheme {
            return Ok(Resolver::Fixed(scheme));
        }
        if let Some(package_type) = &cli.package_type {
            let scheme = univers::version::scheme_for_package_type(package_type)?;
            return Ok(Resolver::Fixed(scheme));
        }
        Ok(Resolver::Prefixed(config.default_scheme))
    }

    fn parse(&self, input: &str) -> anyhow::Result<Version> {
        let version = match self {
            Resolver::Fixed(scheme) => Version::from_scheme(*scheme, input),
            Resolver::Prefixed(Some(fallback)) if !has_scheme_prefix(input) => {
                Version::from_scheme(*fallback, input)
            }
            Resolver::Prefixed(_) => parse_version(input),
        };
        version.with_context(|| format!("Failed to parse '{input}'"))
    }
}

fn has_scheme_prefix(input: &str) -> bool {
    input
        .split_once(':')
        .is_some_and(|(id, _)| scheme_for_id(id).is_ok())
}

fn symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}

fn sort(mut versions: Vec<Version>) -> Result<Vec<Version>, VersionError> {
    if let Some(first) = versions.first() {
        if let Some(other) = versions.iter().find(|v| v.scheme() != first.scheme()) {
            return Err(VersionError::IncomparableSchemes {
                left: first.scheme(),
                right: other.scheme(),
            });
        }
    }
    versions.sort();
    Ok(versions)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let config = config::load(&config_path)?;
    let _guard = config::init_logging(&config.log)?;
    debug!(path = %config_path.display(), "Loaded config");

    let resolver = Resolver::new(&cli, &config)?;

    match &cli.command {
        Command::Compare { left, right } => {
            let left = resolver.parse(left)?;
            let right = resolver.parse(right)?;
            println!("{}", symbol(left.try_cmp(&right)?));
        }
        Command::Parse { versions, verbose } => {
            for input in versions {
                let version = resolver.parse(input)?;
                if *verbose {
                    println!("{version}\t{}", version.parsed());
                } else {
                    println!("{version}");
                }
            }
        }
        Command::Sort { versions, json } => {
            let versions = versions
                .iter()
                .map(|input| resolver.parse(input))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let sorted = sort(versions)?;
            if *json {
                println!("{}", serde_json::to_string(&sorted)?);
            } else {
                for version in &sorted {
                    println!("{version}");
                }
            }
        }
    }

    Ok(())
}
