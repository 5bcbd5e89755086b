//! Error type shared by resolution services.

use crate::db::DbError;
use crate::model::namespace::{EntityKind, Namespace};
use crate::repo::reference_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Failure of a single identifier resolution.
#[derive(Debug)]
pub enum ResolveError {
    /// The identifier (or its mangled-form mapping) has no non-obsolete record.
    NotFound {
        kind: EntityKind,
        namespace: Namespace,
        identifier: String,
    },
    /// Storage failure; never a per-identifier condition.
    Repo(RepoError),
}

impl ResolveError {
    pub(crate) fn not_found(
        kind: EntityKind,
        namespace: Namespace,
        identifier: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            kind,
            namespace,
            identifier: identifier.into(),
        }
    }

    /// Whether this failure only concerns the requested identifier.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound {
                kind,
                namespace,
                identifier,
            } => write!(f, "{namespace} {kind} record for `{identifier}` not found"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ResolveError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for ResolveError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}
