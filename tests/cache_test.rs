mod common;

use assert2::{check, let_assert};
use common::{
    BROKEN_BRANCH, FixtureSource, MISSING_BRANCH, PROJECT, cache, cache_over, fixture_source,
};
use docs_graph::error::ErrorKind;
use docs_graph::{Config, DocsError, VersionCache, VersionKey};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_first_requests_share_one_build() {
    let source = Arc::new(FixtureSource::new().with_delay(Duration::from_millis(100)));
    let cache = Arc::new(cache_over(Arc::clone(&source)));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get(PROJECT, "stable").await })
        })
        .collect();

    let mut graphs = Vec::new();
    for task in tasks {
        let_assert!(Ok(Ok(graph)) = task.await);
        graphs.push(graph);
    }

    check!(source.fetches() == 1);
    check!(graphs.iter().all(|g| Arc::ptr_eq(g, &graphs[0])));
    check!(cache.len().await == 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cached_versions_are_not_refetched(fixture_source: Arc<FixtureSource>) {
    let cache = cache_over(Arc::clone(&fixture_source));

    let first = cache.get(PROJECT, "stable").await.unwrap();
    let second = cache.get(PROJECT, "stable").await.unwrap();

    check!(Arc::ptr_eq(&first, &second));
    check!(fixture_source.fetches() == 1);
    check!(first.key() == &VersionKey::new(PROJECT, "stable"));
}

#[tokio::test(flavor = "multi_thread")]
async fn failures_are_not_cached() {
    let source = Arc::new(FixtureSource::new().failing_first(1));
    let cache = cache_over(Arc::clone(&source));

    let_assert!(Err(err) = cache.get(PROJECT, "stable").await);
    check!(err.kind() == ErrorKind::Upstream);
    check!(cache.is_empty().await);

    check!(cache.get(PROJECT, "stable").await.is_ok());
    check!(source.fetches() == 2);
    check!(cache.len().await == 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_versions_are_not_found(cache: Arc<VersionCache>) {
    let_assert!(Err(DocsError::VersionNotFound(key)) = cache.get(PROJECT, MISSING_BRANCH).await);
    check!(key == VersionKey::new(PROJECT, MISSING_BRANCH));

    let_assert!(Err(err) = cache.get(PROJECT, BROKEN_BRANCH).await);
    check!(err.kind() == ErrorKind::Upstream);
    check!(cache.is_empty().await);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_projects_never_fetch(fixture_source: Arc<FixtureSource>) {
    let cache = cache_over(Arc::clone(&fixture_source));

    let_assert!(Err(DocsError::UnknownProject { suggestions, .. }) = cache.get("discordjs", "stable").await);
    check!(suggestions.contains(&"discord.js".to_string()));
    check!(fixture_source.fetches() == 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalidation_forces_a_refetch(fixture_source: Arc<FixtureSource>) {
    let cache = cache_over(Arc::clone(&fixture_source));
    let key = VersionKey::new(PROJECT, "stable");

    let first = cache.get(PROJECT, "stable").await.unwrap();
    check!(cache.invalidate(&key).await);
    check!(!cache.invalidate(&key).await);
    check!(cache.get_cached(&key).await.is_none());

    let second = cache.get(PROJECT, "stable").await.unwrap();
    check!(!Arc::ptr_eq(&first, &second));
    check!(fixture_source.fetches() == 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn least_recently_used_versions_are_evicted(fixture_source: Arc<FixtureSource>) {
    let config = Config {
        cache_capacity: 2,
        ..Config::default()
    };
    let cache = VersionCache::new(Arc::new(config), fixture_source);

    for branch in ["stable", "master", "v11"] {
        cache.get(PROJECT, branch).await.unwrap();
    }

    check!(cache.len().await == 2);
    check!(cache.get_cached(&VersionKey::new(PROJECT, "stable")).await.is_none());
    check!(cache.get_cached(&VersionKey::new(PROJECT, "v11")).await.is_some());
}
