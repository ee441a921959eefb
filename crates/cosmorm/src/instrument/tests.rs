use super::*;
use crate::error::OrmError;
use crate::launcher::{MemoryLauncher, Page, QueryLauncher};
use futures_util::{StreamExt, TryStreamExt};
use serde_json::{Value, json};
use std::time::Duration;

fn launcher(n: u64) -> MemoryLauncher {
    MemoryLauncher::new().with_container("items", (0..n).map(|id| json!({ "id": id })))
}

#[test]
fn test_query_truncation() {
    let config = LauncherConfig::new().max_query_length(10);
    assert_eq!(config.truncate_query("SELECT VALUE c FROM c"), "SELECT VAL...");
    assert_eq!(config.truncate_query("SELECT 1"), "SELECT 1");

    let config = config.no_truncate();
    assert_eq!(
        config.truncate_query("SELECT VALUE c FROM c"),
        "SELECT VALUE c FROM c"
    );
}

#[test]
fn test_truncation_respects_char_boundaries() {
    assert_eq!(truncate_query_bytes("añb", 2), "a");
    assert_eq!(truncate_query_bytes("abc", 5), "abc");
}

#[test]
fn test_config_builder() {
    let config = LauncherConfig::new()
        .with_query_timeout(Duration::from_secs(3))
        .with_slow_query_threshold(Duration::from_secs(1))
        .level(tracing::Level::INFO)
        .disable_logging();
    assert_eq!(config.query_timeout, Some(Duration::from_secs(3)));
    assert_eq!(config.slow_query_threshold, Some(Duration::from_secs(1)));
    assert_eq!(config.level, tracing::Level::INFO);
    assert!(!config.logging_enabled);
    assert!(config.enable_logging().logging_enabled);
}

#[tokio::test]
async fn test_pages_pass_through() {
    let instrumented = InstrumentedLauncher::new(launcher(7)).with_config(
        LauncherConfig::new().with_slow_query_threshold(Duration::from_secs(60)),
    );
    let pages: Vec<Page<Value>> = instrumented
        .launch_by_page("SELECT VALUE c FROM c", "items", 3)
        .try_collect()
        .await
        .unwrap();
    let sizes: Vec<usize> = pages.iter().map(Page::len).collect();
    assert_eq!(sizes, vec![3, 3, 1]);
    assert_eq!(
        instrumented.inner().launched_queries(),
        vec!["SELECT VALUE c FROM c"]
    );
}

#[tokio::test]
async fn test_executor_errors_pass_through_unchanged() {
    let instrumented = InstrumentedLauncher::new(MemoryLauncher::new().failing("forbidden"));
    let err = instrumented
        .launch::<Value>("q", "items")
        .try_collect::<Vec<_>>()
        .await
        .unwrap_err();
    assert!(matches!(err, OrmError::Executor(ref m) if m == "forbidden"));
}

#[tokio::test]
async fn test_page_timeout() {
    let slow = launcher(3).with_page_delay(Duration::from_millis(500));
    let instrumented = InstrumentedLauncher::new(slow)
        .with_config(LauncherConfig::new().with_query_timeout(Duration::from_millis(20)));

    let mut pages = instrumented.launch_by_page::<Value>("q", "items", 1);
    let err = pages.next().await.unwrap().unwrap_err();
    assert!(err.is_timeout());
    assert!(pages.next().await.is_none());
}

#[tokio::test]
async fn test_dropping_a_stream_midway_is_fine() {
    let instrumented = InstrumentedLauncher::new(launcher(10));
    let mut pages = instrumented.launch_by_page::<Value>("q", "items", 2);
    let first = pages.next().await.unwrap().unwrap();
    assert_eq!(first.len(), 2);
    drop(pages);
}
