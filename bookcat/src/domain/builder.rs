//! Tree builder establishing the BST-by-ISBN invariant.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::entities::Book;
use crate::domain::error::DomainError;
use crate::domain::tree::{BookNode, BookTree};

/// Result type for tree construction.
pub type TreeResult<T> = Result<T, DomainError>;

/// How the builder arranges the books.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeShape {
    /// Sorted by ISBN and split at the midpoint: depth ceil(log2(n + 1)).
    #[default]
    Balanced,
    /// Books inserted one by one in input order.
    Insertion,
}

impl fmt::Display for TreeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeShape::Balanced => write!(f, "balanced"),
            TreeShape::Insertion => write!(f, "insertion"),
        }
    }
}

impl FromStr for TreeShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "balanced" => Ok(TreeShape::Balanced),
            "insertion" => Ok(TreeShape::Insertion),
            other => Err(format!("unknown tree shape '{other}' (expected balanced|insertion)")),
        }
    }
}

/// Constructs ordered catalog trees.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    shape: TreeShape,
}

impl TreeBuilder {
    pub fn new(shape: TreeShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> TreeShape {
        self.shape
    }

    #[instrument(level = "debug", skip(self, books))]
    pub fn build<I>(&self, books: I) -> TreeResult<BookTree>
    where
        I: IntoIterator<Item = Book>,
    {
        let books: Vec<Book> = books.into_iter().collect();
        for book in &books {
            validate(book)?;
        }
        debug!("building {:?} tree from {} books", self.shape, books.len());

        match self.shape {
            TreeShape::Balanced => build_balanced(books),
            TreeShape::Insertion => build_insertion(books),
        }
    }
}

fn validate(book: &Book) -> TreeResult<()> {
    if book.isbn().trim().is_empty() {
        return Err(DomainError::InvalidBook {
            isbn: book.isbn().to_string(),
            message: format!("empty ISBN for '{}'", book.title()),
        });
    }
    Ok(())
}

fn build_insertion(books: Vec<Book>) -> TreeResult<BookTree> {
    let mut root: Option<Box<BookNode>> = None;
    let len = books.len();

    for book in books {
        let mut slot = &mut root;
        while let Some(node) = slot {
            slot = match book.isbn().cmp(node.book.isbn()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return Err(DomainError::DuplicateIsbn(book.isbn().to_string())),
            };
        }
        *slot = Some(Box::new(BookNode::leaf(book)));
    }

    Ok(BookTree::from_parts(root, len))
}

fn build_balanced(mut books: Vec<Book>) -> TreeResult<BookTree> {
    books.sort_by(|a, b| a.isbn().cmp(b.isbn()));
    if let Some(pair) = books.windows(2).find(|w| w[0].isbn() == w[1].isbn()) {
        return Err(DomainError::DuplicateIsbn(pair[0].isbn().to_string()));
    }

    let len = books.len();
    Ok(BookTree::from_parts(split_at_midpoint(books).map(Box::new), len))
}

// Recursion depth is logarithmic in the number of books.
fn split_at_midpoint(mut sorted: Vec<Book>) -> Option<BookNode> {
    let mid = sorted.len() / 2;
    let right = sorted.split_off((mid + 1).min(sorted.len()));
    let book = sorted.pop()?;
    Some(BookNode::new(
        book,
        split_at_midpoint(sorted),
        split_at_midpoint(right),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn books(isbns: &[&str]) -> Vec<Book> {
        isbns
            .iter()
            .map(|i| Book::new(*i, format!("Title {i}"), "Author"))
            .collect()
    }

    #[test]
    fn given_books_when_inserting_then_first_book_is_root() {
        let tree = TreeBuilder::new(TreeShape::Insertion)
            .build(books(&["100", "050", "150", "020"]))
            .unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.book().isbn(), "100");
        assert_eq!(root.left().unwrap().book().isbn(), "050");
        assert_eq!(root.right().unwrap().book().isbn(), "150");
        assert_eq!(root.left().unwrap().left().unwrap().book().isbn(), "020");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_sorted_books_when_inserting_then_degenerates_to_list() {
        let tree = TreeBuilder::new(TreeShape::Insertion)
            .build(books(&["1", "2", "3", "4", "5"]))
            .unwrap();
        assert_eq!(tree.depth(), 5);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 2)]
    #[case(7, 3)]
    #[case(8, 4)]
    #[case(1000, 10)]
    fn given_n_books_when_balancing_then_depth_is_logarithmic(#[case] n: usize, #[case] depth: usize) {
        let isbns: Vec<String> = (0..n).map(|i| format!("{i:06}")).collect();
        let refs: Vec<&str> = isbns.iter().map(String::as_str).collect();
        let tree = TreeBuilder::new(TreeShape::Balanced).build(books(&refs)).unwrap();
        assert_eq!(tree.len(), n);
        assert_eq!(tree.depth(), depth);
    }

    #[rstest]
    #[case(TreeShape::Balanced)]
    #[case(TreeShape::Insertion)]
    fn given_any_shape_when_built_then_in_order_is_sorted(#[case] shape: TreeShape) {
        let tree = TreeBuilder::new(shape)
            .build(books(&["300", "100", "500", "200", "400"]))
            .unwrap();
        let isbns: Vec<_> = tree.in_order().into_iter().map(Book::isbn).collect();
        assert_eq!(isbns, vec!["100", "200", "300", "400", "500"]);
    }

    #[rstest]
    #[case(TreeShape::Balanced)]
    #[case(TreeShape::Insertion)]
    fn given_duplicate_isbn_when_building_then_error(#[case] shape: TreeShape) {
        let result = TreeBuilder::new(shape).build(books(&["100", "050", "100"]));
        assert_eq!(result.unwrap_err(), DomainError::DuplicateIsbn("100".to_string()));
    }

    #[rstest]
    #[case("balanced", TreeShape::Balanced)]
    #[case("Insertion", TreeShape::Insertion)]
    fn given_shape_name_when_parsing_then_case_insensitive(#[case] name: &str, #[case] shape: TreeShape) {
        assert_eq!(name.parse::<TreeShape>().unwrap(), shape);
        assert_eq!(shape.to_string(), name.to_ascii_lowercase());
    }

    #[test]
    fn given_unknown_shape_when_parsing_then_error() {
        assert!("avl".parse::<TreeShape>().is_err());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn given_blank_isbn_when_building_then_invalid_book(#[case] isbn: &str) {
        let result = TreeBuilder::default().build(vec![Book::new(isbn, "Nameless", "Nobody")]);
        assert!(matches!(result, Err(DomainError::InvalidBook { .. })));
    }
}
