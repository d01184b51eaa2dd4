//! The immutable source table.

use std::sync::Arc;

use super::domain::Record;

/// Ordered collection of flight records, loaded once and never mutated.
///
/// Records are shared through [`Arc`] so working subsets reference rows
/// without copying them.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[Arc<Record>]>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        let records: Vec<Arc<Record>> = records.into_iter().map(Arc::new).collect();
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().map(|r| &**r)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
