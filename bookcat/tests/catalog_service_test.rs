//! Tests for CatalogService loading catalog files into search trees

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use bookcat::application::services::CatalogService;
use bookcat::application::ApplicationError;
use bookcat::domain::{DomainError, TreeShape};
use bookcat::infrastructure::traits::{FileSystem, RealFileSystem};

fn resource(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

fn service(shape: TreeShape) -> CatalogService {
    CatalogService::new(Arc::new(RealFileSystem), shape)
}

/// Filesystem that claims every file exists but fails to read it.
struct UnreadableFileSystem;

impl FileSystem for UnreadableFileSystem {
    fn read_to_string(&self, _path: &Path) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"))
    }

    fn exists(&self, _path: &Path) -> bool {
        true
    }
}

// ============================================================
// Loading
// ============================================================

#[rstest]
#[case(TreeShape::Balanced, 3)]
#[case(TreeShape::Insertion, 3)]
fn given_sample_catalog_when_loading_then_all_books_searchable(
    #[case] shape: TreeShape,
    #[case] depth: usize,
) {
    let tree = service(shape).load(&resource("catalog.toml")).unwrap();
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.depth(), depth);

    let searcher = tree.searcher();
    for isbn in ["020", "050", "100", "150", "175"] {
        assert!(searcher.contains_by_isbn(isbn), "missing {isbn}");
    }
    assert!(!searcher.contains_by_isbn("099"));
    assert!(searcher.contains_by_title_and_author("Delta", "Smith"));
    assert!(!searcher.contains_by_title_and_author("Delta", "Jones"));
}

#[test]
fn given_insertion_shape_when_loading_then_first_book_is_root() {
    let tree = service(TreeShape::Insertion)
        .load(&resource("catalog.toml"))
        .unwrap();
    assert_eq!(tree.root().unwrap().book().isbn(), "100");
}

#[test]
fn given_catalog_in_temp_dir_when_loading_then_parsed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.toml");
    std::fs::write(
        &path,
        "[[books]]\nisbn = \"978-0\"\ntitle = \"Dune\"\nauthor = \"Herbert\"\n",
    )
    .unwrap();

    let tree = service(TreeShape::Balanced).load(&path).unwrap();
    assert!(tree.searcher().contains_by_isbn("978-0"));
}

#[test]
fn given_catalog_when_collecting_stats_then_reports_shape_and_size() {
    let stats = service(TreeShape::Balanced)
        .stats(&resource("catalog.toml"))
        .unwrap();
    assert_eq!(stats.books, 5);
    assert_eq!(stats.depth, 3);
    assert_eq!(stats.shape, TreeShape::Balanced);
    assert!(stats.path.ends_with("catalog.toml"));
}

// ============================================================
// Errors
// ============================================================

#[test]
fn given_missing_file_when_loading_then_catalog_not_found() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.toml");

    let err = service(TreeShape::Balanced).load(&path).unwrap_err();
    assert!(matches!(err, ApplicationError::CatalogNotFound(p) if p == path));
}

#[test]
fn given_duplicate_isbn_when_loading_then_domain_error() {
    let err = service(TreeShape::Insertion)
        .load(&resource("duplicate.toml"))
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::DuplicateIsbn(ref isbn)) if isbn == "100"
    ));
}

#[test]
fn given_malformed_toml_when_loading_then_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "[[books]\nisbn = ").unwrap();

    let err = service(TreeShape::Balanced).load(&path).unwrap_err();
    assert!(matches!(err, ApplicationError::Parse { .. }), "{err:?}");
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_unreadable_file_when_loading_then_operation_failed_with_path() {
    let service = CatalogService::new(Arc::new(UnreadableFileSystem), TreeShape::Balanced);

    let err = service.load(Path::new("/srv/catalog.toml")).unwrap_err();
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert_eq!(
        err.to_string(),
        "operation failed: read catalog: /srv/catalog.toml"
    );
}
