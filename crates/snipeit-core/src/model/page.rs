// Paged results
//
// Every listing call returns one page plus an opaque continuation token.

use std::fmt;

use serde::Serialize;

use super::annotations::Annotations;

/// Opaque cursor. Empty means "first page" on input and "no more pages" on
/// output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The empty token: first page on input, terminal on output.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: PageToken,
    pub annotations: Annotations,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: PageToken, annotations: Annotations) -> Self {
        Self {
            items,
            next_token,
            annotations,
        }
    }

    /// A single page with nothing after it.
    pub fn terminal(items: Vec<T>, annotations: Annotations) -> Self {
        Self::new(items, PageToken::empty(), annotations)
    }

    pub fn empty() -> Self {
        Self::terminal(Vec::new(), Annotations::new())
    }

    pub fn is_last(&self) -> bool {
        self.next_token.is_empty()
    }
}
