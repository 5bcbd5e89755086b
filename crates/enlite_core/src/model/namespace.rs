//! Identifier namespaces and entity kinds.
//!
//! # Invariants
//! - ModelSEED is the canonical namespace; every other namespace resolves
//!   against it.
//! - MetaCyc is the only namespace with a mangled identifier form.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Kind of chemical entity being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Compound,
    Reaction,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compound => "compound",
            Self::Reaction => "reaction",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four fixed identifier namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// Canonical namespace.
    #[serde(rename = "modelseed")]
    ModelSeed,
    #[serde(rename = "metacyc")]
    MetaCyc,
    Bigg,
    Kegg,
}

impl Namespace {
    pub const CANONICAL: Namespace = Namespace::ModelSeed;

    /// All namespaces, canonical first. This is also the column order of
    /// resolved alias sets.
    pub const ALL: [Namespace; 4] = [
        Namespace::ModelSeed,
        Namespace::MetaCyc,
        Namespace::Bigg,
        Namespace::Kegg,
    ];

    /// Namespaces that map onto the canonical one through alias tables.
    pub const ALIASED: [Namespace; 3] = [Namespace::MetaCyc, Namespace::Bigg, Namespace::Kegg];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ModelSeed => "modelseed",
            Self::MetaCyc => "metacyc",
            Self::Bigg => "bigg",
            Self::Kegg => "kegg",
        }
    }

    /// Single-letter code used on the command line.
    pub fn short_code(self) -> char {
        match self {
            Self::ModelSeed => 'm',
            Self::MetaCyc => 'c',
            Self::Bigg => 'b',
            Self::Kegg => 'k',
        }
    }

    pub fn is_canonical(self) -> bool {
        self == Self::CANONICAL
    }

    /// Whether identifiers of this namespace may arrive in mangled form.
    pub fn has_mangled_form(self) -> bool {
        self == Self::MetaCyc
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = NamespaceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "m" | "modelseed" => Ok(Self::ModelSeed),
            "c" | "metacyc" => Ok(Self::MetaCyc),
            "b" | "bigg" => Ok(Self::Bigg),
            "k" | "kegg" => Ok(Self::Kegg),
            _ => Err(NamespaceError::InvalidNamespace(value.to_string())),
        }
    }
}

/// Projection target of a resolution: one namespace or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetNamespace {
    Single(Namespace),
    All,
}

impl Display for TargetNamespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(namespace) => namespace.fmt(f),
            Self::All => f.write_str("all"),
        }
    }
}

impl From<Namespace> for TargetNamespace {
    fn from(value: Namespace) -> Self {
        Self::Single(value)
    }
}

impl FromStr for TargetNamespace {
    type Err = NamespaceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a" | "all" => Ok(Self::All),
            _ => value.parse().map(Self::Single),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    InvalidNamespace(String),
}

impl Display for NamespaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNamespace(value) => write!(
                f,
                "unsupported namespace `{value}`; expected modelseed|metacyc|bigg|kegg (or m|c|b|k)"
            ),
        }
    }
}

impl Error for NamespaceError {}

#[cfg(test)]
mod tests {
    use super::{Namespace, NamespaceError, TargetNamespace};

    #[test]
    fn namespace_parses_names_and_short_codes() {
        assert_eq!("metacyc".parse::<Namespace>().unwrap(), Namespace::MetaCyc);
        assert_eq!(" BiGG ".parse::<Namespace>().unwrap(), Namespace::Bigg);
        assert_eq!("k".parse::<Namespace>().unwrap(), Namespace::Kegg);
        assert_eq!("M".parse::<Namespace>().unwrap(), Namespace::ModelSeed);
    }

    #[test]
    fn unknown_namespace_is_rejected() {
        let err = "chebi".parse::<Namespace>().unwrap_err();
        assert_eq!(err, NamespaceError::InvalidNamespace("chebi".to_string()));
    }

    #[test]
    fn all_is_only_a_target() {
        assert!("all".parse::<Namespace>().is_err());
        assert_eq!(
            "all".parse::<TargetNamespace>().unwrap(),
            TargetNamespace::All
        );
        assert_eq!(
            "b".parse::<TargetNamespace>().unwrap(),
            TargetNamespace::Single(Namespace::Bigg)
        );
    }

    #[test]
    fn short_codes_round_trip() {
        for namespace in Namespace::ALL {
            let code = namespace.short_code().to_string();
            assert_eq!(code.parse::<Namespace>().unwrap(), namespace);
        }
    }
}
