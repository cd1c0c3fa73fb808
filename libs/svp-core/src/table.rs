//! In-memory standards table indexed by id.

use crate::types::StandardRecord;
use std::collections::HashMap;

/// Ordered collection of records with a unique-id index.
///
/// Tables are never mutated by the filter functions; each filter step builds
/// a new table.
#[derive(Debug, Clone, Default)]
pub struct StandardTable {
    records: Vec<StandardRecord>,
    index: HashMap<String, usize>,
}

impl StandardTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; returns false and leaves the table unchanged when the
    /// id is already present.
    pub fn insert(&mut self, record: StandardRecord) -> bool {
        if self.index.contains_key(&record.id) {
            return false;
        }
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, id: &str) -> Option<&StandardRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[StandardRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &StandardRecord> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    /// New table with the records matching `predicate`.
    pub fn filter<F>(&self, mut predicate: F) -> StandardTable
    where
        F: FnMut(&StandardRecord) -> bool,
    {
        self.iter().filter(|r| predicate(r)).cloned().collect()
    }

    /// New table with every record passed through `f`. Ids must not change.
    pub fn map<F>(&self, f: F) -> StandardTable
    where
        F: FnMut(StandardRecord) -> StandardRecord,
    {
        self.records.iter().cloned().map(f).collect()
    }

    /// Distinct non-null values of a column, in first-seen order.
    pub fn distinct<F>(&self, column: F) -> Vec<String>
    where
        F: Fn(&StandardRecord) -> Option<&str>,
    {
        let mut seen = Vec::<String>::new();
        for record in &self.records {
            if let Some(value) = column(record) {
                if !seen.iter().any(|s| s == value) {
                    seen.push(value.to_string());
                }
            }
        }
        seen
    }
}

impl FromIterator<StandardRecord> for StandardTable {
    /// Later duplicates of an id are dropped.
    fn from_iter<I: IntoIterator<Item = StandardRecord>>(iter: I) -> Self {
        let mut table = StandardTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}

impl<'a> IntoIterator for &'a StandardTable {
    type Item = &'a StandardRecord;
    type IntoIter = std::slice::Iter<'a, StandardRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
