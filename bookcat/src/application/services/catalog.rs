//! Catalog loading service
//!
//! Reads a TOML catalog file and hands back an immutable, ordered `BookTree`.
//!
//! ```toml
//! [[books]]
//! isbn = "100"
//! title = "Root"
//! author = "Adams"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Book, BookTree, TreeBuilder, TreeShape};
use crate::infrastructure::traits::FileSystem;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    books: Vec<Book>,
}

/// Summary of a loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub path: PathBuf,
    pub shape: TreeShape,
    pub books: usize,
    pub depth: usize,
}

/// Service for loading catalog files into search trees.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    builder: TreeBuilder,
}

impl CatalogService {
    /// Create a new catalog service building trees of the given shape.
    pub fn new(fs: Arc<dyn FileSystem>, shape: TreeShape) -> Self {
        Self {
            fs,
            builder: TreeBuilder::new(shape),
        }
    }

    pub fn shape(&self) -> TreeShape {
        self.builder.shape()
    }

    /// Load and build the catalog tree stored at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<BookTree> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::CatalogNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read catalog", path)?;

        let books = Self::parse(&content, path)?;
        debug!("load: parsed {} books from {}", books.len(), path.display());

        Ok(self.builder.build(books)?)
    }

    /// Parse catalog text. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> ApplicationResult<Vec<Book>> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| ApplicationError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        Ok(file.books)
    }

    /// Load the catalog and summarise its tree.
    #[instrument(level = "debug", skip(self))]
    pub fn stats(&self, path: &Path) -> ApplicationResult<CatalogStats> {
        let tree = self.load(path)?;
        Ok(CatalogStats {
            path: path.to_path_buf(),
            shape: self.shape(),
            books: tree.len(),
            depth: tree.depth(),
        })
    }
}
