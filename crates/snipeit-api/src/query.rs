// Query-string composition
//
// Listing endpoints take optional filters on top of offset/limit. Each
// filter is one key/value append, applied in order to the request.

use std::fmt;

/// One `name=value` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub name: &'static str,
    pub value: String,
}

impl QueryParam {
    pub fn new(name: &'static str, value: impl fmt::Display) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }

    /// Restrict a users listing to members of one group.
    pub fn group_id(group_id: u64) -> Self {
        Self::new("group_id", group_id)
    }

    pub fn offset(offset: u64) -> Self {
        Self::new("offset", offset)
    }

    pub fn limit(limit: u64) -> Self {
        Self::new("limit", limit)
    }

    pub(crate) fn as_pair(&self) -> (&str, &str) {
        (self.name, self.value.as_str())
    }
}

/// Ordered list of query parameters, built up one append at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<QueryParam>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, param: QueryParam) -> Self {
        self.0.push(param);
        self
    }

    pub fn extend(mut self, params: impl IntoIterator<Item = QueryParam>) -> Self {
        self.0.extend(params);
        self
    }

    pub fn offset(self, offset: u64) -> Self {
        self.push(QueryParam::offset(offset))
    }

    pub fn limit(self, limit: u64) -> Self {
        self.push(QueryParam::limit(limit))
    }

    pub fn params(&self) -> &[QueryParam] {
        &self.0
    }

    /// Borrowed `(name, value)` pairs for `RequestBuilder::query`.
    pub(crate) fn pairs(&self) -> Vec<(&str, &str)> {
        self.0.iter().map(QueryParam::as_pair).collect()
    }
}
