//! Membership queries over a borrowed catalog tree.

use std::cmp::Ordering;

use tracing::{instrument, trace};

use crate::domain::entities::Book;
use crate::domain::tree::BookNode;

/// Read-only search over a catalog tree ordered by ISBN.
///
/// Holds only a borrow of the root, so the tree must outlive the searcher and
/// cannot be mutated while one exists. The searcher is `Copy` and can be
/// shared across threads freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSearcher<'a> {
    root: Option<&'a BookNode>,
}

impl<'a> CatalogSearcher<'a> {
    /// No validation is done: the tree is assumed to be ordered by ISBN.
    pub fn new(root: Option<&'a BookNode>) -> Self {
        Self { root }
    }

    /// True if a book with exactly this ISBN is in the catalog.
    ///
    /// Accepts `&str` or `Option<&str>`; an absent key is simply not found.
    pub fn contains_by_isbn<'k>(&self, isbn: impl Into<Option<&'k str>>) -> bool {
        self.find_by_isbn(isbn).is_some()
    }

    /// True if any book has exactly this title and this author.
    pub fn contains_by_title_and_author(&self, title: &str, author: &str) -> bool {
        self.find_by_title_and_author(title, author).is_some()
    }

    /// Binary descent from the root, O(height).
    ///
    /// Takes the same key forms as [`contains_by_isbn`](Self::contains_by_isbn).
    pub fn find_by_isbn<'k>(&self, isbn: impl Into<Option<&'k str>>) -> Option<&'a Book> {
        self.descend(isbn.into()?)
    }

    #[instrument(level = "debug", skip(self))]
    fn descend(&self, isbn: &str) -> Option<&'a Book> {
        let mut current = self.root;

        while let Some(node) = current {
            trace!("visit {}", node.book().isbn());
            current = match isbn.cmp(node.book().isbn()) {
                Ordering::Equal => return Some(node.book()),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    /// Depth-first scan of the whole tree with an explicit stack.
    ///
    /// The tree is not ordered by title or author, so every node may need a
    /// visit. Stops at the first match.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_title_and_author(&self, title: &str, author: &str) -> Option<&'a Book> {
        let mut stack: Vec<&'a BookNode> = self.root.into_iter().collect();

        while let Some(node) = stack.pop() {
            trace!("visit {}", node.book().isbn());
            if node.book().matches(title, author) {
                return Some(node.book());
            }
            // right first so the left subtree is visited first
            if let Some(right) = node.right() {
                stack.push(right);
            }
            if let Some(left) = node.left() {
                stack.push(left);
            }
        }

        None
    }
}
