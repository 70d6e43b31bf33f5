//! Course catalog: the deduplicated result of a crawl
//!
//! The catalog keeps records in the order their codes were first seen and
//! never replaces a title once a code is present.

mod record;

pub use record::{is_course_code, CourseRecord, CODE_LENGTH};

use indexmap::map::Entry;
use indexmap::IndexMap;

/// Insertion-ordered mapping from course code to record
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    records: IndexMap<String, CourseRecord>,
}

impl CourseCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record unless its code is already present
    ///
    /// # Returns
    ///
    /// `true` if the record was added, `false` if the code was already known
    /// (the existing title is kept).
    pub fn merge(&mut self, record: CourseRecord) -> bool {
        match self.records.entry(record.code.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    /// Merges every record in order and returns how many were new
    pub fn merge_all<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = CourseRecord>,
    {
        let mut added = 0;
        for record in records {
            if self.merge(record) {
                added += 1;
            }
        }
        added
    }

    /// Looks up a record by code
    pub fn get(&self, code: &str) -> Option<&CourseRecord> {
        self.records.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CourseRecord> {
        self.records.values()
    }

    /// Consumes the catalog, yielding records in insertion order
    pub fn into_records(self) -> Vec<CourseRecord> {
        self.records.into_values().collect()
    }
}
