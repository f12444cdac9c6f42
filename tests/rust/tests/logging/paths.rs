//! Log path resolution integration tests

use pretty_assertions::assert_eq;
use spider_common::logging::{resolve_log_path, LOG_FILE_NAME, LOG_FOLDER_NAME};
use tests::fs_fixtures::TestAppRoot;

#[test]
fn test_path_is_folder_and_base_name_under_root() {
    let root = TestAppRoot::new();

    let path = resolve_log_path(Some(root.path()), LOG_FOLDER_NAME, LOG_FILE_NAME)
        .expect("failed to resolve log path");

    assert_eq!(path, root.path().join("log").join("news_spider.log"));
    assert!(path.parent().unwrap().is_dir());
}

#[test]
fn test_second_resolution_succeeds_with_same_path() {
    let root = TestAppRoot::new();

    let first = resolve_log_path(Some(root.path()), LOG_FOLDER_NAME, LOG_FILE_NAME)
        .expect("first resolution failed");
    let second = resolve_log_path(Some(root.path()), LOG_FOLDER_NAME, LOG_FILE_NAME)
        .expect("second resolution failed even though the folder exists");

    assert_eq!(first, second);
}

#[test]
fn test_folder_creation_is_not_recursive() {
    let root = TestAppRoot::new();
    let missing = root.path().join("not").join("created");

    let result = resolve_log_path(Some(missing.as_path()), LOG_FOLDER_NAME, LOG_FILE_NAME);

    assert!(result.is_err());
    assert!(!missing.exists());
}

#[test]
fn test_alternate_crawler_names() {
    let root = TestAppRoot::new();

    let path = resolve_log_path(Some(root.path()), "log", "goods_crawler.log")
        .expect("failed to resolve log path");

    assert_eq!(path, root.path().join("log").join("goods_crawler.log"));
}
