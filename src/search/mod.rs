//! Fuzzy search over a documentation graph.
//!
//! The index is a flat corpus of `{id, name}` records built once per graph.
//! Matching sits behind [`FuzzyMatcher`] so the scoring algorithm can change
//! without touching the graph or the query path.

mod locality;

pub use locality::LocalityMatcher;

use crate::doc::ElementRef;

/// Maximum number of hits a search returns.
pub const SEARCH_LIMIT: usize = 10;

/// A searchable record: `id` is a resolvable path, `name` the bare member name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub id: String,
    pub name: String,
}

/// A corpus position with its distance score (lower is better).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch {
    pub index: usize,
    pub score: f64,
}

/// Ranks corpus entries against a free-text query.
///
/// Implementations return only matching entries, ordered by ascending score
/// with ties kept in corpus order.
pub trait FuzzyMatcher: Send + Sync {
    fn rank(&self, corpus: &[CorpusEntry], query: &str) -> Vec<ScoredMatch>;
}

/// Immutable search index over one graph.
pub struct FuzzyIndex {
    corpus: Vec<CorpusEntry>,
    matcher: Box<dyn FuzzyMatcher>,
}

impl std::fmt::Debug for FuzzyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyIndex")
            .field("entries", &self.corpus.len())
            .finish_non_exhaustive()
    }
}

impl FuzzyIndex {
    pub fn new(corpus: Vec<CorpusEntry>) -> Self {
        Self::with_matcher(corpus, LocalityMatcher::default())
    }

    pub fn with_matcher(corpus: Vec<CorpusEntry>, matcher: impl FuzzyMatcher + 'static) -> Self {
        Self {
            corpus,
            matcher: Box::new(matcher),
        }
    }

    /// Best `limit` ids for `query`, with their scores.
    pub fn search(&self, query: &str, limit: usize) -> Vec<(&str, f64)> {
        self.matcher
            .rank(&self.corpus, query)
            .into_iter()
            .take(limit)
            .map(|m| (self.corpus[m.index].id.as_str(), m.score))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }
}

/// A search hit resolved back into the graph.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub element: ElementRef<'a>,
    pub score: f64,
}

/// Result of a fuzzy search.
///
/// `NoResults` means nothing was relevant; it is distinct from a `Matches`
/// whose hits all failed to resolve.
#[derive(Debug, Clone)]
pub enum SearchOutcome<'a> {
    NoResults,
    Matches(Vec<SearchHit<'a>>),
}

impl<'a> SearchOutcome<'a> {
    pub const fn is_no_results(&self) -> bool {
        matches!(self, Self::NoResults)
    }

    /// The matched elements, or `None` for the no-results sentinel.
    pub fn elements(&self) -> Option<Vec<ElementRef<'a>>> {
        match self {
            Self::NoResults => None,
            Self::Matches(hits) => Some(hits.iter().map(|hit| hit.element).collect()),
        }
    }

    pub fn hits(&self) -> &[SearchHit<'a>] {
        match self {
            Self::NoResults => &[],
            Self::Matches(hits) => hits,
        }
    }
}
