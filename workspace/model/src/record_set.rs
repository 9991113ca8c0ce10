use std::collections::HashSet;
use std::hash::Hash;

use crate::record::SaleRecord;

/// The immutable, ordered sequence of records loaded from one source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSet {
    records: Vec<SaleRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SaleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years in file order.
    pub fn years(&self) -> Vec<i32> {
        distinct_in_order(self.records.iter().map(SaleRecord::year))
    }

    /// Distinct months in file order.
    pub fn months(&self) -> Vec<u32> {
        distinct_in_order(self.records.iter().map(SaleRecord::month))
    }

    /// Distinct countries in file order.
    pub fn countries(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.country().to_string()))
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a SaleRecord;
    type IntoIter = std::slice::Iter<'a, SaleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn distinct_in_order<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
