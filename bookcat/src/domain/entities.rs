//! Domain entities: core data structures

use std::fmt;

use serde::Deserialize;

/// A book in the catalog.
///
/// The ISBN is the unique key of the catalog tree and is compared with plain
/// byte-wise string ordering (`"050" < "100"`, `"9" > "10"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Book {
    isbn: String,
    title: String,
    author: String,
}

impl Book {
    pub fn new(isbn: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
        }
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Exact, case-sensitive match on both title and author.
    pub fn matches(&self, title: &str, author: &str) -> bool {
        self.title == title && self.author == author
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.isbn, self.title, self.author)
    }
}
