//! Display documents built from a graph: embeds and JSON summaries.

use crate::doc::{Access, DocGraph, ElementKind, ElementRef};
use crate::search::SearchOutcome;
use serde::Serialize;
use std::fmt::Write;

/// Accent colour of every embed.
pub const EMBED_COLOR: u32 = 0x2296f3;

/// Field name rendered as an empty heading.
const BLANK_FIELD: &str = "\u{200b}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A rich display document: author line, title, description and fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub color: u32,
    pub author: EmbedAuthor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    fn field(&mut self, name: &str, value: String) {
        self.fields.push(EmbedField {
            name: name.to_string(),
            value,
            inline: false,
        });
    }

    /// Plain Markdown rendering for text-only clients.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "*{}*", self.author.name);
        if let Some(title) = &self.title {
            let _ = writeln!(out, "## {title}");
        }
        if let Some(description) = &self.description {
            let _ = writeln!(out, "{description}");
        }
        for field in &self.fields {
            if field.name == BLANK_FIELD {
                let _ = write!(out, "\n{}\n", field.value);
            } else {
                let _ = write!(out, "\n### {}\n{}\n", field.name, field.value);
            }
        }
        out
    }
}

/// The empty embed every display document starts from.
pub fn base_embed(graph: &DocGraph, icon_url: &str) -> Embed {
    let site = graph.site();
    Embed {
        color: EMBED_COLOR,
        author: EmbedAuthor {
            name: format!("{} ({})", site.title, site.key.branch),
            url: site.base_url.clone(),
            icon_url: icon_url.to_string(),
        },
        title: None,
        url: None,
        description: None,
        fields: Vec::new(),
    }
}

fn code_names(elements: &[ElementRef<'_>]) -> String {
    elements
        .iter()
        .map(|element| format!("`{}`", element.name()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn element_embed(element: ElementRef<'_>, icon_url: &str) -> Embed {
    let mut embed = base_embed(element.graph(), icon_url);

    let mut heading = format!("__**{}**__", element.link());
    if let Some(base) = element.extends() {
        let _ = write!(heading, " (extends **{}**)", base.display());
    }
    if element.access() == Access::Private {
        heading.push_str(" **PRIVATE**");
    }
    embed.description = Some(format!("{}\n{}", heading, element.formatted_description()));
    embed.url = Some(element.url());

    let props = element.props();
    if !props.is_empty() {
        embed.field("Properties", code_names(&props));
    }
    let methods = element.methods();
    if !methods.is_empty() {
        embed.field("Methods", code_names(&methods));
    }
    let events = element.events();
    if !events.is_empty() {
        embed.field("Events", code_names(&events));
    }
    let params = element.param_summaries();
    if !params.is_empty() {
        embed.field("Params", params.join("\n\n"));
    }
    if let Some(ty) = element.formatted_type() {
        embed.field("Type", ty);
    }
    if let Some(returns) = element.formatted_return() {
        embed.field("Returns", returns);
    }
    if !element.examples().is_empty() {
        let examples = element
            .examples()
            .iter()
            .map(|example| format!("```js\n{example}\n```"))
            .collect::<Vec<_>>()
            .join("\n");
        embed.field("Examples", examples);
    }
    if let Some(source) = element.source_url() {
        embed.field(BLANK_FIELD, format!("[View source]({source})"));
    }

    embed
}

/// Embed for a query: the element itself when the path resolves, otherwise
/// a list of search results, otherwise nothing.
pub fn resolve_embed(graph: &DocGraph, query: &str, icon_url: &str) -> Option<Embed> {
    if let Some(element) = graph.get(query) {
        return Some(element_embed(element, icon_url));
    }

    let SearchOutcome::Matches(hits) = graph.search(query) else {
        return None;
    };

    let mut embed = base_embed(graph, icon_url);
    embed.title = Some("Search results:".to_string());
    embed.description = Some(
        hits.iter()
            .map(|hit| format!("**{}**", hit.element.link()))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    Some(embed)
}

/// Short JSON form of an element, used for listings and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSummary {
    pub name: String,
    pub kind: ElementKind,
    pub link: String,
    pub url: String,
    pub description: String,
}

impl From<ElementRef<'_>> for ElementSummary {
    fn from(element: ElementRef<'_>) -> Self {
        Self {
            name: element.formatted_name(),
            kind: element.kind(),
            link: element.link(),
            url: element.url(),
            description: element.formatted_description(),
        }
    }
}

/// Full JSON form of one element with every formatted part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementDocument {
    pub name: String,
    pub kind: ElementKind,
    pub formatted_name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    pub private: bool,
    pub props: Vec<ElementSummary>,
    pub methods: Vec<ElementSummary>,
    pub events: Vec<ElementSummary>,
    pub params: Vec<String>,
    pub examples: Vec<String>,
}

fn summaries(elements: Vec<ElementRef<'_>>) -> Vec<ElementSummary> {
    elements.into_iter().map(ElementSummary::from).collect()
}

impl From<ElementRef<'_>> for ElementDocument {
    fn from(element: ElementRef<'_>) -> Self {
        Self {
            name: element.name().to_string(),
            kind: element.kind(),
            formatted_name: element.formatted_name(),
            url: element.url(),
            source_url: element.source_url(),
            description: element.formatted_description(),
            extends: element.extends().map(|base| base.display()),
            ty: element.formatted_type(),
            returns: element.formatted_return(),
            private: element.access() == Access::Private,
            props: summaries(element.props()),
            methods: summaries(element.methods()),
            events: summaries(element.events()),
            params: element.param_summaries(),
            examples: element.examples().to_vec(),
        }
    }
}
