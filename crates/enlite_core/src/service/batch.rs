//! Ordered per-identifier results with partial-failure semantics.
//!
//! # Invariants
//! - Keys keep input order; a repeated input keeps its first position and
//!   the latest value.
//! - Identifiers that failed with `NotFound` are absent. A present key always
//!   means the identifier resolved, even when its value is empty.

use super::resolve_error::ResolveResult;
use log::debug;
use serde::Serialize;

/// Ordered mapping `identifier -> value` for a batch request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResults<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for BatchResults<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> BatchResults<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identifier: impl Into<String>, value: T) {
        let identifier = identifier.into();
        match self.entries.iter_mut().find(|(key, _)| *key == identifier) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((identifier, value)),
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(key, _)| key == identifier)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> IntoIterator for BatchResults<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Runs `resolve` for every identifier, skipping `NotFound` failures.
///
/// Any other error aborts the batch: it is a storage failure, not a property
/// of one identifier.
pub(crate) fn collect_batch<I, T, F>(identifiers: I, mut resolve: F) -> ResolveResult<BatchResults<T>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(&str) -> ResolveResult<T>,
{
    let mut results = BatchResults::new();
    for identifier in identifiers {
        let identifier = identifier.as_ref();
        match resolve(identifier) {
            Ok(value) => results.insert(identifier, value),
            Err(err) if err.is_not_found() => {
                debug!("event=batch_item module=service status=skipped reason=not_found");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::{collect_batch, BatchResults};
    use crate::model::namespace::{EntityKind, Namespace};
    use crate::repo::reference_repo::RepoError;
    use crate::service::resolve_error::ResolveError;

    #[test]
    fn insert_keeps_first_position_for_repeated_keys() {
        let mut results = BatchResults::new();
        results.insert("a", 1);
        results.insert("b", 2);
        results.insert("a", 3);

        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(results.get("a"), Some(&3));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn not_found_items_are_skipped() {
        let results = collect_batch(["good1", "bad", "good2"], |id| {
            if id == "bad" {
                Err(ResolveError::not_found(
                    EntityKind::Compound,
                    Namespace::Kegg,
                    id,
                ))
            } else {
                Ok(id.len())
            }
        })
        .unwrap();

        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["good1", "good2"]);
        assert!(!results.contains("bad"));
    }

    #[test]
    fn storage_errors_abort_the_batch() {
        let mut calls = 0;
        let err = collect_batch(["a", "b"], |_| {
            calls += 1;
            Err::<(), _>(ResolveError::Repo(RepoError::InvalidData("broken".into())))
        })
        .unwrap_err();

        assert!(matches!(err, ResolveError::Repo(_)));
        assert_eq!(calls, 1);
    }
}
