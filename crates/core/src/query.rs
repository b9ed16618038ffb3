//! Query engine over the in-memory dataset
//!
//! Every operation is a pure read. Result sets keep dataset order, and names
//! on returned records pass through [`normalize_name`].

use crate::dataset::Dataset;
use crate::normalizer::normalize_name;
use crate::pagination::{Page, PageRequest};
use crate::record::Record;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Read-only query engine; cheap to clone
#[derive(Debug, Clone)]
pub struct QueryEngine {
    dataset: Arc<Dataset>,
}

impl QueryEngine {
    /// Create an engine over a fully loaded dataset
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// The dataset being queried
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Number of records in the dataset
    pub fn total(&self) -> usize {
        self.dataset.len()
    }

    /// Case-insensitive substring search on the name column
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use edudir_core::{Dataset, PageRequest, QueryEngine, Record, Schema};
    ///
    /// let dataset = Dataset::new(
    ///     vec![Record::from_pairs([("name", "ABC College (Id:12)"), ("state", "X"), ("district", "D1")])],
    ///     Schema::default(),
    /// );
    /// let engine = QueryEngine::new(Arc::new(dataset));
    /// let page = engine.search_by_keyword("abc", PageRequest::default());
    /// assert_eq!(page.total, 1);
    /// assert_eq!(page.data[0].field("name"), "ABC College");
    /// ```
    pub fn search_by_keyword(&self, keyword: &str, request: PageRequest) -> Page<Record> {
        let needle = keyword.to_lowercase();
        let column = self.dataset.schema().name.as_str();
        self.select(request, |record| {
            record.field(column).to_lowercase().contains(&needle)
        })
    }

    /// Case-insensitive exact match on the state column
    pub fn filter_by_state(&self, state: &str, request: PageRequest) -> Page<Record> {
        let column = self.dataset.schema().state.as_str();
        self.select(request, |record| eq_ignore_case(record.field(column), state))
    }

    /// Case-insensitive exact match on the district column
    pub fn filter_by_district(&self, district: &str, request: PageRequest) -> Page<Record> {
        let column = self.dataset.schema().district.as_str();
        self.select(request, |record| {
            eq_ignore_case(record.field(column), district)
        })
    }

    /// Distinct states as stored, sorted ascending
    pub fn list_distinct_states(&self) -> Vec<String> {
        let column = self.dataset.schema().state.as_str();
        distinct_sorted(self.dataset.records().iter().map(|r| r.field(column)))
    }

    /// Distinct districts of one state (matched case-insensitively), sorted ascending
    pub fn list_distinct_districts(&self, state: &str) -> Vec<String> {
        let schema = self.dataset.schema();
        distinct_sorted(
            self.dataset
                .records()
                .iter()
                .filter(|r| eq_ignore_case(r.field(&schema.state), state))
                .map(|r| r.field(&schema.district)),
        )
    }

    /// Number of distinct `(state, district)` pairs as stored
    pub fn count_state_districts(&self) -> usize {
        let schema = self.dataset.schema();
        self.dataset
            .records()
            .iter()
            .map(|r| (r.field(&schema.state), r.field(&schema.district)))
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Count every match, then materialize and normalize only the requested page
    fn select<F>(&self, request: PageRequest, mut matches: F) -> Page<Record>
    where
        F: FnMut(&Record) -> bool,
    {
        let name_column = self.dataset.schema().name.as_str();
        let offset = request.offset();
        let mut total = 0usize;
        let mut data = Vec::new();

        for record in self.dataset.records() {
            if !matches(record) {
                continue;
            }
            if total >= offset && data.len() < request.limit() {
                data.push(record.with_field(name_column, normalize_name(record.field(name_column))));
            }
            total += 1;
        }

        Page::new(data, request, total)
    }
}

fn eq_ignore_case(value: &str, wanted: &str) -> bool {
    value == wanted || value.to_lowercase() == wanted.to_lowercase()
}

fn distinct_sorted<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    values
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
