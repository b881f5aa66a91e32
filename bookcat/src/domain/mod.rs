//! Domain layer: catalog entities, tree construction and search
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod search;
pub mod tree;

pub use builder::{TreeBuilder, TreeResult, TreeShape};
pub use entities::Book;
pub use error::DomainError;
pub use search::CatalogSearcher;
pub use tree::{BookNode, BookTree, Iter, TreeNodeConvert};
