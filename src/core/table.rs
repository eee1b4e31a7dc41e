use serde::Serialize;

/// Ordered records collected during one run.
///
/// Insertion order is page order, then row order within the page. Nothing is
/// deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultTable<R> {
    records: Vec<R>,
}

impl<R> ResultTable<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn append_page(&mut self, records: Vec<R>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

impl<R> Default for ResultTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> From<Vec<R>> for ResultTable<R> {
    fn from(records: Vec<R>) -> Self {
        Self { records }
    }
}

impl<'a, R> IntoIterator for &'a ResultTable<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
