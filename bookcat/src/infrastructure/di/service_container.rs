//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use crate::application::services::{CatalogService, CatalogStats};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::BookTree;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub catalog: CatalogService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let catalog = CatalogService::new(Arc::clone(&fs), settings.shape);
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            catalog,
        }
    }

    /// Catalog file configured in settings.
    pub fn catalog_path(&self) -> &Path {
        &self.settings.catalog
    }

    /// Load the configured catalog.
    pub fn load_catalog(&self) -> ApplicationResult<BookTree> {
        self.catalog.load(self.catalog_path())
    }

    pub fn catalog_stats(&self) -> ApplicationResult<CatalogStats> {
        self.catalog.stats(self.catalog_path())
    }
}
