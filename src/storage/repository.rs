//! Ordered in-memory repository
//!
//! Records keep their insertion order, which is the order the dashboard lists
//! them in. Ids are allocated as one past the largest id present.

use std::fmt::Debug;

use crate::error::{EmDiaError, EmDiaResult};
use crate::models::SequentialId;

/// An entity that can be stored in a [`Repository`]
pub trait Record: Clone {
    type Id: SequentialId + Debug;

    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;
}

/// An insertion-ordered collection of records with unique ids
#[derive(Debug, Clone, PartialEq)]
pub struct Repository<T> {
    items: Vec<T>,
}

impl<T> Default for Repository<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Repository<T> {
    /// Wrap records already known to have unique ids
    pub(crate) fn from_ordered(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Record> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from records, rejecting duplicate ids
    pub fn from_vec(items: Vec<T>) -> EmDiaResult<Self> {
        let mut repo = Self::new();
        for item in items {
            repo.insert(item)?;
        }
        Ok(repo)
    }

    /// All records, in insertion order
    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Get a record or a `NotFound` error naming the id
    pub fn require(&self, id: T::Id) -> EmDiaResult<&T> {
        self.get(id).ok_or_else(|| not_found::<T>(id))
    }

    /// Find the first record matching a predicate
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The id the next inserted record should take
    ///
    /// Fails when the largest id present is already the largest possible.
    pub fn next_id(&self) -> EmDiaResult<T::Id> {
        match self.items.iter().map(|item| item.id()).max() {
            None => Ok(<T::Id as SequentialId>::first()),
            Some(last) => last.checked_succ().ok_or_else(|| {
                EmDiaError::Storage(format!("No {} ids left after {}", T::ENTITY, last))
            }),
        }
    }

    /// Append a record
    pub fn insert(&mut self, item: T) -> EmDiaResult<()> {
        let id = item.id();
        if self.get(id).is_some() {
            return Err(EmDiaError::Duplicate {
                entity_type: T::ENTITY,
                identifier: id.to_string(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Swap in a new version of an existing record, keeping its position
    pub fn replace(&mut self, item: T) -> EmDiaResult<()> {
        let id = item.id();
        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        *slot = item;
        Ok(())
    }

    /// Remove a record, returning it
    pub fn remove(&mut self, id: T::Id) -> EmDiaResult<T> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        Ok(self.items.remove(index))
    }

    /// Consume the repository, returning its records in order
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

fn not_found<T: Record>(id: T::Id) -> EmDiaError {
    EmDiaError::NotFound {
        entity_type: T::ENTITY,
        identifier: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MessageTemplate, TemplateId};

    fn template(id: u64) -> MessageTemplate {
        MessageTemplate::new(TemplateId::new(id), format!("T{}", id), "Olá {nome}")
    }

    #[test]
    fn test_next_id_on_empty() {
        let repo: Repository<MessageTemplate> = Repository::new();
        assert_eq!(repo.next_id().unwrap(), TemplateId::new(1));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut repo = Repository::from_vec(vec![template(1), template(2), template(3)]).unwrap();
        repo.remove(TemplateId::new(2)).unwrap();

        // length + 1 would hand out 3 again
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.next_id().unwrap(), TemplateId::new(4));
    }

    #[test]
    fn test_next_id_exhausted() {
        let repo = Repository::from_vec(vec![template(1), template(u64::MAX)]).unwrap();

        let err = repo.next_id().unwrap_err();
        assert!(matches!(err, EmDiaError::Storage(_)));
        assert!(err.to_string().contains("No Template ids left"));
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut repo = Repository::new();
        repo.insert(template(1)).unwrap();

        let err = repo.insert(template(1)).unwrap_err();
        assert!(matches!(err, EmDiaError::Duplicate { entity_type: "Template", .. }));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut repo = Repository::from_vec(vec![template(1), template(2), template(3)]).unwrap();
        let renamed = MessageTemplate::new(TemplateId::new(2), "Renamed", "x");
        repo.replace(renamed).unwrap();

        let names: Vec<&str> = repo.all().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["T1", "Renamed", "T3"]);
    }

    #[test]
    fn test_missing_record_errors() {
        let mut repo: Repository<MessageTemplate> = Repository::new();

        assert!(repo.require(TemplateId::new(9)).unwrap_err().is_not_found());
        assert!(repo.remove(TemplateId::new(9)).unwrap_err().is_not_found());
        assert!(repo.replace(template(9)).unwrap_err().is_not_found());
    }
}
