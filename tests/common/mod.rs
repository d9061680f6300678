//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Nothing touches the network. Each test builds its own [`VersionCache`] over
//! an in-memory [`DocSource`] serving `tests/fixtures/sample.json`, so caches
//! start cold and fetch counts are observable.
//!
//! # Available Fixtures
//!
//! - `sample_graph`: the fixture dump built into a graph directly
//! - `fixture_source`: a counting source that serves the fixture for every branch
//! - `cache`: a cold cache over `fixture_source`

// Each integration test crate uses a different subset of these helpers.
#![allow(dead_code)]

use docs_graph::doc::RawDocs;
use docs_graph::{Config, DocGraph, FetchError, ProjectConfig, Site, VersionCache, VersionKey};
use futures::future::BoxFuture;
use rstest::fixture;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub use docs_graph::source::DocSource;

/// Project name the fixture is served under.
pub const PROJECT: &str = "discord.js";

/// Branch the fixture source refuses with a 404.
pub const MISSING_BRANCH: &str = "missing";

/// Branch the fixture source answers with an upstream failure.
pub const BROKEN_BRANCH: &str = "broken";

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn sample_json() -> String {
    let path = project_root().join("tests/fixtures/sample.json");
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub fn sample_docs() -> RawDocs {
    serde_json::from_str(&sample_json()).expect("fixture is valid JSON")
}

pub fn site(branch: &str) -> Site {
    Config::default()
        .projects
        .get(PROJECT)
        .expect("built-in project")
        .site(&VersionKey::new(PROJECT, branch))
}

#[fixture]
pub fn sample_graph() -> DocGraph {
    DocGraph::build(site("stable"), &sample_docs()).expect("fixture builds")
}

/// Serves the fixture dump for every branch and counts fetches.
pub struct FixtureSource {
    docs: RawDocs,
    fetches: AtomicUsize,
    delay: Duration,
    failures_left: AtomicUsize,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self {
            docs: sample_docs(),
            fetches: AtomicUsize::new(0),
            delay: Duration::ZERO,
            failures_left: AtomicUsize::new(0),
        }
    }

    /// Hold every fetch open for `delay` so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the next `count` fetches with an upstream error.
    pub fn failing_first(self, count: usize) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DocSource for FixtureSource {
    fn fetch<'a>(
        &'a self,
        project: &'a ProjectConfig,
        key: &'a VersionKey,
    ) -> BoxFuture<'a, Result<RawDocs, FetchError>> {
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let url = project.source_url(key);
            if key.branch == MISSING_BRANCH {
                return Err(FetchError::NotFound { url });
            }
            if key.branch == BROKEN_BRANCH
                || self
                    .failures_left
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok()
            {
                return Err(FetchError::Status { url, status: 503 });
            }

            Ok(self.docs.clone())
        })
    }
}

#[fixture]
pub fn fixture_source() -> Arc<FixtureSource> {
    Arc::new(FixtureSource::new())
}

pub fn cache_over(source: Arc<FixtureSource>) -> VersionCache {
    VersionCache::new(Arc::new(Config::default()), source)
}

#[fixture]
pub fn cache(fixture_source: Arc<FixtureSource>) -> Arc<VersionCache> {
    Arc::new(cache_over(fixture_source))
}
