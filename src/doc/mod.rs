//! The documentation graph: one ingested dump for a project and branch.
//!
//! A [`DocGraph`] owns every element in a flat arena, the ordered top-level
//! entries, and the fuzzy index built over them. It is immutable once built,
//! so readers share it through an `Arc` without coordination.

pub(crate) mod element;
pub(crate) mod element_ref;
pub(crate) mod path;
pub(crate) mod raw;

pub use element::{Access, ChildMap, Element, ElementId, ElementKind, Modifiers, Scope};
pub use element_ref::{ElementRef, Extends};
pub use raw::{RawDocs, RawMeta, RawReturns};

use crate::error::FetchError;
use crate::search::{CorpusEntry, FuzzyIndex, SEARCH_LIMIT, SearchHit, SearchOutcome};
use raw::RawRecord;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{self, Display, Formatter};
use std::time::Instant;

/// Identifies one documentation version: `project/branch`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionKey {
    pub project: String,
    pub branch: String,
}

impl VersionKey {
    pub fn new(project: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            branch: branch.into(),
        }
    }
}

impl Display for VersionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.branch)
    }
}

/// Where a version's documentation and source live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub key: VersionKey,
    /// Display title of the project, e.g. "Discord.js Docs"
    pub title: String,
    /// Prefix of element pages; ends with `/`
    pub base_url: String,
    /// Prefix of source file links; ends with `/`
    pub repo_url: String,
}

pub struct DocGraph {
    site: Site,
    elements: Vec<Element>,
    roots: ChildMap,
    index: FuzzyIndex,
}

impl std::fmt::Debug for DocGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocGraph")
            .field("key", &self.site.key)
            .field("elements", &self.elements.len())
            .field("roots", &self.roots.len())
            .finish_non_exhaustive()
    }
}

impl DocGraph {
    /// Build a graph from a raw dump.
    ///
    /// Fails only when a record is malformed; nothing partial is returned.
    pub fn build(site: Site, docs: &RawDocs) -> Result<Self, FetchError> {
        let start = Instant::now();
        let mut builder = TreeBuilder::default();

        for (records, kind) in [
            (&docs.classes, ElementKind::Class),
            (&docs.typedefs, ElementKind::Typedef),
            (&docs.interfaces, ElementKind::Interface),
        ] {
            for value in records {
                let id = builder.adopt(None, kind, value)?;
                let name = builder.elements[id.index()].name.clone();
                if let Some(previous) = builder.roots.insert(&name, id) {
                    tracing::debug!(
                        "{}: top-level '{}' replaces element #{}",
                        site.key,
                        name,
                        previous.index()
                    );
                }
            }
        }

        let TreeBuilder { elements, roots } = builder;
        let corpus = build_corpus(&elements, &roots);
        let graph = Self {
            index: FuzzyIndex::new(corpus),
            site,
            elements,
            roots,
        };

        tracing::info!(
            "Built doc graph for {} ({} top-level, {} elements, {} search entries) in {:?}",
            graph.site.key,
            graph.roots.len(),
            graph.elements.len(),
            graph.index.len(),
            start.elapsed()
        );

        Ok(graph)
    }

    /// Parse a JSON dump and build a graph from it.
    pub fn from_json(site: Site, json: &str) -> Result<Self, FetchError> {
        let docs: RawDocs = serde_json::from_str(json)?;
        Self::build(site, &docs)
    }

    pub const fn site(&self) -> &Site {
        &self.site
    }

    pub const fn key(&self) -> &VersionKey {
        &self.site.key
    }

    pub fn base_url(&self) -> &str {
        &self.site.base_url
    }

    pub fn repo_url(&self) -> &str {
        &self.site.repo_url
    }

    /// Top-level elements in adoption order.
    pub fn roots(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.roots.iter().map(|id| self.element(id))
    }

    /// Top-level element by case-insensitive name.
    pub fn root(&self, name: &str) -> Option<ElementRef<'_>> {
        self.roots.get(name).map(|id| self.element(id))
    }

    /// Number of elements reachable from the top level.
    pub fn len(&self) -> usize {
        fn count(elements: &[Element], children: &ChildMap) -> usize {
            children
                .iter()
                .map(|id| 1 + count(elements, &elements[id.index()].children))
                .sum()
        }
        count(&self.elements, &self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    #[inline]
    pub(crate) fn element(&self, id: ElementId) -> ElementRef<'_> {
        ElementRef::new(self, id)
    }

    #[inline]
    pub(crate) fn raw_element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    /// Resolve a dotted or hashed path such as `Client.login` or `Client#user`.
    pub fn get(&self, query: &str) -> Option<ElementRef<'_>> {
        self.resolve(query).map(|id| self.element(id))
    }

    /// Fuzzy search over element names and ids.
    ///
    /// Returns at most ten hits, best first, each resolved back into the tree.
    pub fn search(&self, query: &str) -> SearchOutcome<'_> {
        let ranked = self.index.search(query, SEARCH_LIMIT);
        if ranked.is_empty() {
            tracing::debug!("{}: no search results for '{}'", self.site.key, query);
            return SearchOutcome::NoResults;
        }

        let hits = ranked
            .into_iter()
            .filter_map(|(id, score)| {
                let element = self.get(id);
                if element.is_none() {
                    tracing::warn!("{}: search entry '{}' no longer resolves", self.site.key, id);
                }
                element.map(|element| SearchHit { element, score })
            })
            .collect();

        SearchOutcome::Matches(hits)
    }

    /// Raw source records of the top-level elements, in adoption order.
    pub fn raw_roots(&self) -> Vec<&Value> {
        self.roots
            .iter()
            .map(|id| &self.elements[id.index()].raw)
            .collect()
    }
}

#[derive(Default)]
struct TreeBuilder {
    elements: Vec<Element>,
    roots: ChildMap,
}

impl TreeBuilder {
    fn adopt(
        &mut self,
        parent: Option<ElementId>,
        kind: ElementKind,
        value: &Value,
    ) -> Result<ElementId, FetchError> {
        let record = RawRecord::deserialize(value)?;
        let id = ElementId::new(self.elements.len());
        self.elements
            .push(Element::from_record(kind, parent, &record, value.clone()));

        for (nested, child_kind) in kind.member_groups(&record) {
            for child_value in nested {
                let child = self.adopt(Some(id), child_kind, child_value)?;
                let name = self.elements[child.index()].name.clone();
                self.elements[id.index()].children.insert(&name, child);
            }
        }

        Ok(id)
    }
}

/// One entry per top-level element, then one per direct member (`Parent#member`).
fn build_corpus(elements: &[Element], roots: &ChildMap) -> Vec<CorpusEntry> {
    let parents: Vec<&Element> = roots.iter().map(|id| &elements[id.index()]).collect();

    let mut corpus: Vec<CorpusEntry> = parents
        .iter()
        .map(|parent| CorpusEntry {
            id: parent.name.clone(),
            name: parent.name.clone(),
        })
        .collect();

    for parent in &parents {
        corpus.extend(parent.children.iter().map(|id| {
            let member = &elements[id.index()];
            CorpusEntry {
                id: format!("{}#{}", parent.name, member.name),
                name: member.name.clone(),
            }
        }));
    }

    corpus
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub(crate) fn site(project: &str, branch: &str) -> Site {
        Site {
            key: VersionKey::new(project, branch),
            title: "Test Docs".to_string(),
            base_url: format!("https://docs.example/#/docs/{project}/{branch}/"),
            repo_url: format!("https://github.com/example/{project}/blob/{branch}/"),
        }
    }

    pub(crate) fn graph(json: serde_json::Value) -> DocGraph {
        let docs: RawDocs = serde_json::from_value(json).expect("fixture dump");
        DocGraph::build(site("test", "main"), &docs).expect("fixture graph")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::graph;
    use super::*;
    use assert2::{check, let_assert};
    use serde_json::json;

    #[test]
    fn builds_typed_tree_with_parents() {
        let graph = graph(json!({
            "classes": [{
                "name": "Foo",
                "methods": [{ "name": "bar", "params": [{ "name": "x", "type": [[["string"]]] }] }],
                "props": [{ "name": "size", "type": [[["number"]]] }],
                "events": [{ "name": "ready" }]
            }],
            "typedefs": [{ "name": "Options", "type": [[["Object"]]] }]
        }));

        check!(graph.roots().count() == 2);
        let_assert!(Some(foo) = graph.root("foo"));
        check!(foo.kind() == ElementKind::Class);
        check!(foo.parent().is_none());

        let_assert!(Some(x) = graph.get("Foo.bar.x"));
        check!(x.kind() == ElementKind::Param);
        let_assert!(Some(bar) = x.parent());
        check!(bar.name() == "bar");
        check!(bar.parent().map(|p| p.name()) == Some("Foo"));
        check!(graph.len() == 6);
    }

    #[test]
    fn top_level_collision_keeps_last() {
        let graph = graph(json!({
            "classes": [{ "name": "Thing", "description": "class" }],
            "typedefs": [{ "name": "thing", "description": "typedef" }]
        }));

        check!(graph.roots().count() == 1);
        let_assert!(Some(thing) = graph.get("THING"));
        check!(thing.kind() == ElementKind::Typedef);
        check!(thing.description() == Some("typedef"));
    }

    #[test]
    fn malformed_record_fails_whole_build() {
        let docs: RawDocs = serde_json::from_value(json!({
            "classes": [{ "name": "Ok" }, { "description": "no name" }]
        }))
        .unwrap();

        let result = DocGraph::build(test_support::site("test", "main"), &docs);
        let_assert!(Err(FetchError::Malformed(_)) = result);
    }

    #[test]
    fn corpus_lists_parents_before_members() {
        let graph = graph(json!({
            "classes": [
                { "name": "A", "props": [{ "name": "x" }] },
                { "name": "B", "methods": [{ "name": "y" }] }
            ]
        }));
        let ids: Vec<_> = build_corpus(&graph.elements, &graph.roots)
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        check!(ids == ["A", "B", "A#x", "B#y"]);
    }

    #[test]
    fn raw_record_survives_unmodified() {
        let record = json!({
            "name": "Foo",
            "description": "Has {@link Bar} and\nwraps",
            "custom": { "kept": [1, 2, 3] }
        });
        let graph = graph(json!({ "classes": [record.clone()] }));

        let_assert!(Some(foo) = graph.get("foo"));
        check!(foo.raw() == &record);
        check!(graph.raw_roots() == [&record]);
    }
}
