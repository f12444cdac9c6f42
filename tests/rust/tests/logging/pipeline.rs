//! File pipeline integration tests
//!
//! The global tracing subscriber can be installed once per test process, so
//! everything that logs through the installed pipeline lives in one test.

use spider_common::logging::{resolve_log_path, LOG_FILE_NAME, LOG_FOLDER_NAME};
use spider_common::{ConsoleMode, Logger};
use tests::fs_fixtures::{log_segment_names, read_log_segments, TestAppRoot};

#[test]
fn test_file_pipeline_end_to_end() -> anyhow::Result<()> {
    let root = TestAppRoot::new();
    let file_path = resolve_log_path(Some(root.path()), LOG_FOLDER_NAME, LOG_FILE_NAME)?;
    let log_dir = file_path.parent().unwrap().to_path_buf();

    let logger = Logger::builder()
        .file(&file_path)
        .console(ConsoleMode::Disabled)
        .init()?;
    assert_eq!(logger.file_base_path(), file_path);

    tracing::info!(target: "crawler", "fetched 200 items");
    tracing::warn!(target: "crawler", "slow response");
    tracing::debug!(target: "crawler", "page cache hit");

    // The active segment carries the local date suffix.
    let segments = log_segment_names(&log_dir, "news_spider.log");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].len(), "news_spider.log.2024-01-15".len());

    let contents = read_log_segments(&log_dir, "news_spider.log");
    assert!(contents.contains("- INFO    - "));
    assert!(contents.contains(":crawler - fetched 200 items"));
    assert!(contents.contains("slow response"));
    // The file sink's threshold is INFO.
    assert!(!contents.contains("page cache hit"));

    // Re-initialization is a no-op: the first pipeline stays installed and
    // records keep landing in the original file.
    let other_root = TestAppRoot::new();
    let other_path = resolve_log_path(Some(other_root.path()), LOG_FOLDER_NAME, LOG_FILE_NAME)?;
    Logger::builder()
        .file(&other_path)
        .console(ConsoleMode::Disabled)
        .init()?;

    tracing::info!(target: "crawler", "still here");

    let contents = read_log_segments(&log_dir, "news_spider.log");
    assert!(contents.contains("still here"));
    let other_dir = other_path.parent().unwrap().to_path_buf();
    let other_contents = read_log_segments(&other_dir, "news_spider.log");
    assert!(!other_contents.contains("still here"));

    Ok(())
}

#[test]
fn test_console_policy_by_platform_name() {
    assert!(ConsoleMode::default_for_platform("windows"));
    assert!(ConsoleMode::default_for_platform("WINDOWS"));
    assert!(!ConsoleMode::default_for_platform("linux"));
    assert!(!ConsoleMode::default_for_platform("freebsd"));
}
