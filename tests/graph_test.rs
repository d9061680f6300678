mod common;

use assert2::{check, let_assert};
use common::sample_graph;
use docs_graph::{DocGraph, ElementKind};
use rstest::rstest;

// --- Tree construction ---

#[rstest]
fn top_level_elements_keep_adoption_order(sample_graph: DocGraph) {
    let names: Vec<_> = sample_graph.roots().map(|e| e.name()).collect();
    check!(
        names
            == [
                "Client",
                "ClientUser",
                "User",
                "Message",
                "Guild",
                "Snowflake",
                "MessageEditOptions",
                "TextBasedChannel"
            ]
    );
}

#[rstest]
#[case("Client", ElementKind::Class)]
#[case("Snowflake", ElementKind::Typedef)]
#[case("TextBasedChannel", ElementKind::Interface)]
#[case("Client.guilds", ElementKind::Prop)]
#[case("Client.login", ElementKind::Method)]
#[case("Client.ready", ElementKind::Event)]
#[case("Client.login.token", ElementKind::Param)]
#[case("Client.message.message", ElementKind::Param)]
#[case("MessageEditOptions.embed", ElementKind::Prop)]
fn elements_carry_their_kind(sample_graph: DocGraph, #[case] path: &str, #[case] kind: ElementKind) {
    let_assert!(Some(element) = sample_graph.get(path));
    check!(element.kind() == kind);
}

#[rstest]
fn every_member_points_back_to_its_parent(sample_graph: DocGraph) {
    for root in sample_graph.roots() {
        check!(root.parent().is_none());
        for child in root.children() {
            let_assert!(Some(parent) = child.parent());
            check!(parent == root);
        }
    }
}

#[rstest]
fn raw_records_are_returned_unmodified(sample_graph: DocGraph) {
    let original: serde_json::Value = serde_json::from_str(&common::sample_json()).unwrap();

    let_assert!(Some(login) = sample_graph.get("Client#login"));
    check!(login.raw() == &original["classes"][0]["methods"][0]);

    let_assert!(Some(cache_param) = sample_graph.get("Client.fetchUser.cache"));
    check!(cache_param.raw()["default"] == true);
}

// --- Path resolution ---

#[rstest]
#[case("Client.login")]
#[case("Client#login")]
#[case("client.LOGIN")]
#[case("CLIENT#Login")]
fn separators_and_case_are_interchangeable(sample_graph: DocGraph, #[case] path: &str) {
    let_assert!(Some(expected) = sample_graph.get("Client.login"));
    check!(sample_graph.get(path) == Some(expected));
}

#[rstest]
#[case("")]
#[case("Nope")]
#[case("Client.nope")]
#[case("Client.login.nope")]
#[case("Client.login.token.deeper")]
#[case("Client..login")]
fn unmatched_segments_resolve_to_nothing(sample_graph: DocGraph, #[case] path: &str) {
    check!(sample_graph.get(path).is_none());
}

#[rstest]
#[case("Client.user.setUsername", "ClientUser", "setUsername")]
#[case("Message.guild.name", "Guild", "name")]
#[case("Message.edit.options.content", "MessageEditOptions", "content")]
fn members_are_reached_through_single_type_aliases(
    sample_graph: DocGraph,
    #[case] path: &str,
    #[case] owner: &str,
    #[case] member: &str,
) {
    let_assert!(Some(element) = sample_graph.get(path));
    check!(element.name() == member);
    check!(element.parent().map(|p| p.name()) == Some(owner));
}

#[rstest]
fn ambiguous_types_are_not_traversed(sample_graph: DocGraph) {
    // Collection<Snowflake, Guild> names two elements.
    check!(sample_graph.get("Client.guilds.name").is_none());
}

// --- Formatting ---

#[rstest]
fn types_link_known_elements(sample_graph: DocGraph) {
    let_assert!(Some(guilds) = sample_graph.get("Client.guilds"));
    check!(
        guilds.formatted_type().as_deref()
            == Some(
                "**Collection\\<[Snowflake](https://discord.js.org/#/docs/discord.js/stable/typedef/Snowflake), \
                 [Guild](https://discord.js.org/#/docs/discord.js/stable/class/Guild)\\>**"
            )
    );
}

#[rstest]
fn descriptions_reflow_and_keep_unresolved_links(sample_graph: DocGraph) {
    let_assert!(Some(client) = sample_graph.get("Client"));
    check!(
        client.formatted_description()
            == "The main hub for interacting with the API. Extends BaseClient."
    );
}

#[rstest]
fn optional_params_are_bracketed(sample_graph: DocGraph) {
    let_assert!(Some(fetch_user) = sample_graph.get("Client.fetchUser"));
    let names: Vec<_> = fetch_user.params().iter().map(|p| p.formatted_name()).collect();
    check!(names == ["id", "[cache]"]);
    check!(
        fetch_user.formatted_return().as_deref()
            == Some(
                "**Promise\\<[User](https://discord.js.org/#/docs/discord.js/stable/class/User)\\>**\nThe fetched user"
            )
    );
}

#[rstest]
fn source_links_use_the_branch_repository(sample_graph: DocGraph) {
    let_assert!(Some(login) = sample_graph.get("Client.login"));
    check!(
        login.source_url().as_deref()
            == Some("https://github.com/discordjs/discord.js/blob/stable/src/client/Client.js#L240")
    );
}
