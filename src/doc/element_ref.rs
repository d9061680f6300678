//! ElementRef pairs an element with its graph so it can reach parents,
//! children, and cross-references without owning anything.

use super::{DocGraph, Element, ElementId, ElementKind, raw::RawMeta};
use serde_json::Value;
use std::{
    fmt::{self, Debug, Formatter},
    ops::Deref,
};

/// A borrowed handle to one element of a [`DocGraph`].
///
/// Every per-kind difference in naming, linking and formatting is dispatched
/// here on [`ElementKind`].
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    graph: &'a DocGraph,
    id: ElementId,
}

/// Base of a class: either another element of the graph or an external name.
#[derive(Debug, Clone, Copy)]
pub enum Extends<'a> {
    Element(ElementRef<'a>),
    Unresolved(&'a str),
}

impl Extends<'_> {
    /// Link to the base when it resolved, its bare name otherwise.
    pub fn display(&self) -> String {
        match self {
            Self::Element(element) => element.link(),
            Self::Unresolved(name) => (*name).to_string(),
        }
    }
}

impl<'a> Deref for ElementRef<'a> {
    type Target = Element;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.graph.raw_element(self.id)
    }
}

impl Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

impl Eq for ElementRef<'_> {}

impl<'a> ElementRef<'a> {
    #[inline]
    pub(crate) const fn new(graph: &'a DocGraph, id: ElementId) -> Self {
        Self { graph, id }
    }

    #[inline]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    #[inline]
    pub const fn graph(&self) -> &'a DocGraph {
        self.graph
    }

    /// The element with the graph's lifetime rather than this handle's.
    #[inline]
    pub fn element(&self) -> &'a Element {
        self.graph.raw_element(self.id)
    }

    pub fn name(&self) -> &'a str {
        &self.element().name
    }

    pub fn kind(&self) -> ElementKind {
        self.element().kind
    }

    pub fn description(&self) -> Option<&'a str> {
        self.element().description.as_deref()
    }

    pub fn meta(&self) -> Option<&'a RawMeta> {
        self.element().meta.as_ref()
    }

    pub fn raw(&self) -> &'a Value {
        &self.element().raw
    }

    pub fn parent(&self) -> Option<Self> {
        self.element().parent.map(|id| self.graph.element(id))
    }

    pub fn children(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let graph = self.graph;
        self.element()
            .children
            .iter()
            .map(move |id| graph.element(id))
    }

    pub fn child(&self, name: &str) -> Option<Self> {
        self.element()
            .children
            .get(name)
            .map(|id| self.graph.element(id))
    }

    pub fn children_of_kind(&self, kind: ElementKind) -> Vec<Self> {
        self.children().filter(|c| c.kind() == kind).collect()
    }

    pub fn props(&self) -> Vec<Self> {
        self.children_of_kind(ElementKind::Prop)
    }

    pub fn methods(&self) -> Vec<Self> {
        self.children_of_kind(ElementKind::Method)
    }

    pub fn events(&self) -> Vec<Self> {
        self.children_of_kind(ElementKind::Event)
    }

    pub fn params(&self) -> Vec<Self> {
        self.children_of_kind(ElementKind::Param)
    }

    /// Page of this element on the documentation site.
    pub fn url(&self) -> String {
        let base = self.graph.base_url();
        match self.parent() {
            Some(parent) => format!(
                "{}{}/{}?scrollTo={}{}",
                base,
                parent.kind(),
                parent.name(),
                if self.is_static() { "s-" } else { "" },
                self.name()
            ),
            None => format!("{}{}/{}", base, self.kind(), self.name()),
        }
    }

    /// Link to the defining line in the source repository.
    pub fn source_url(&self) -> Option<String> {
        let meta = self.meta()?;
        Some(format!(
            "{}{}/{}#L{}",
            self.graph.repo_url(),
            meta.path,
            meta.file,
            meta.line
        ))
    }

    pub fn formatted_name(&self) -> String {
        let name = self.name();
        let separator = if self.is_static() { '.' } else { '#' };
        let parent = self.parent().map(|p| p.name());

        match (self.kind(), parent) {
            (ElementKind::Method, Some(parent)) => format!("{parent}{separator}{name}()"),
            (ElementKind::Prop, Some(parent)) => format!("{parent}{separator}{name}"),
            (ElementKind::Event, Some(parent)) => format!("{parent}#event:{name}"),
            (ElementKind::Param, _) => {
                let modifiers = self.modifiers();
                if modifiers.variable {
                    format!("...{name}")
                } else if modifiers.optional {
                    format!("[{name}]")
                } else {
                    name.to_string()
                }
            }
            _ => name.to_string(),
        }
    }

    /// Markdown link: `[formatted name](url)`.
    pub fn link(&self) -> String {
        format!("[{}]({})", self.formatted_name(), self.url())
    }

    pub fn formatted_type(&self) -> Option<String> {
        let tokens = self.type_tokens();
        if tokens.is_empty() {
            return None;
        }
        Some(self.graph.format_type(tokens))
    }

    /// Return type and description; methods without one return `**Void**`.
    pub fn formatted_return(&self) -> Option<String> {
        let Some(returns) = self.returns() else {
            return (self.kind() == ElementKind::Method).then(|| "**Void**".to_string());
        };

        let mut parts = Vec::with_capacity(2);
        if !returns.types.is_empty() {
            parts.push(self.graph.format_type(&returns.types));
        }
        if let Some(description) = returns.description.as_deref() {
            let text = self.graph.format_text(description);
            if !text.is_empty() {
                parts.push(text);
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }

    pub fn formatted_description(&self) -> String {
        self.description()
            .map(|text| self.graph.format_text(text))
            .unwrap_or_default()
    }

    /// One block per param: `name **type**` followed by its description.
    pub fn param_summaries(&self) -> Vec<String> {
        self.params()
            .iter()
            .map(|param| {
                let mut summary = param.formatted_name();
                if let Some(ty) = param.formatted_type() {
                    summary.push(' ');
                    summary.push_str(&ty);
                }
                let description = param.formatted_description();
                if !description.is_empty() {
                    summary.push('\n');
                    summary.push_str(description.trim());
                }
                summary
            })
            .collect()
    }

    /// The element this class extends, resolved through the graph when possible.
    pub fn extends(&self) -> Option<Extends<'a>> {
        let base = self.element().extends.as_deref()?;
        Some(match self.graph.get(base) {
            Some(element) => Extends::Element(element),
            None => Extends::Unresolved(base),
        })
    }
}
