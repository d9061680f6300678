mod common;

use assert2::{check, let_assert};
use common::sample_graph;
use docs_graph::search::SEARCH_LIMIT;
use docs_graph::{DocGraph, SearchOutcome};
use rstest::rstest;

#[rstest]
fn exact_names_rank_first(sample_graph: DocGraph) {
    let_assert!(SearchOutcome::Matches(hits) = sample_graph.search("message"));
    check!(hits[0].element.name() == "Message");
    check!(hits[0].score == 0.0);
    check!(hits.iter().any(|hit| hit.element.formatted_name() == "Client#event:message"));
}

#[rstest]
#[case("clinet", "Client")]
#[case("guld", "Guild")]
#[case("snowflak", "Snowflake")]
fn typos_are_tolerated(sample_graph: DocGraph, #[case] query: &str, #[case] expected: &str) {
    let_assert!(Some(elements) = sample_graph.search(query).elements());
    check!(elements[0].name() == expected);
}

#[rstest]
#[case("client")]
#[case("message")]
#[case("user")]
#[case("e")]
fn results_are_bounded_and_sorted(sample_graph: DocGraph, #[case] query: &str) {
    let outcome = sample_graph.search(query);
    let hits = outcome.hits();
    check!(!hits.is_empty());
    check!(hits.len() <= SEARCH_LIMIT);
    check!(hits.windows(2).all(|w| w[0].score <= w[1].score));
}

#[rstest]
fn broad_queries_are_capped_at_ten(sample_graph: DocGraph) {
    check!(sample_graph.search("client").hits().len() == SEARCH_LIMIT);
}

#[rstest]
#[case("zzzzqqqq")]
#[case("")]
fn irrelevant_queries_return_the_no_results_sentinel(sample_graph: DocGraph, #[case] query: &str) {
    let outcome = sample_graph.search(query);
    check!(outcome.is_no_results());
    check!(outcome.elements().is_none());
    check!(outcome.hits().is_empty());
}

#[rstest]
fn member_hits_resolve_to_members(sample_graph: DocGraph) {
    let_assert!(Some(elements) = sample_graph.search("setUsername").elements());
    let_assert!(Some(parent) = elements[0].parent());
    check!(parent.name() == "ClientUser");
}

#[test]
fn aliasing_typedefs_keep_their_own_members() {
    let json = serde_json::json!({
        "classes": [{ "name": "Base", "props": [{ "name": "b" }] }],
        "typedefs": [{
            "name": "Options",
            "type": [[["Base"]]],
            "props": [{ "name": "a", "type": [[["string"]]] }]
        }]
    });
    let graph = DocGraph::from_json(common::site("stable"), &json.to_string()).unwrap();

    let_assert!(Some(own) = graph.get("Options.a"));
    check!(own.formatted_name() == "Options#a");
    check!(graph.get("Options.b").is_none());

    let_assert!(Some(elements) = graph.search("Options#a").elements());
    check!(elements[0].formatted_name() == "Options#a");
}
