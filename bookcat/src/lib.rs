//! Library catalog search over a binary search tree of books keyed by ISBN.
//!
//! ```
//! use bookcat::domain::{Book, TreeBuilder, TreeShape};
//!
//! let tree = TreeBuilder::new(TreeShape::Balanced)
//!     .build(vec![
//!         Book::new("100", "Root", "Adams"),
//!         Book::new("050", "Alpha", "Smith"),
//!         Book::new("150", "Beta", "Jones"),
//!     ])
//!     .unwrap();
//!
//! let searcher = tree.searcher();
//! assert!(searcher.contains_by_isbn("050"));
//! assert!(!searcher.contains_by_isbn("099"));
//! assert!(searcher.contains_by_title_and_author("Beta", "Jones"));
//! assert!(!searcher.contains_by_title_and_author("Beta", "Smith"));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
