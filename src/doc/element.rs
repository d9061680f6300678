//! Documentation elements and the case-insensitive child map that links them.

use super::raw::{RawMeta, RawRecord, RawReturns};
use ahash::AHashMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// Index of an element inside its owning [`DocGraph`](super::DocGraph) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a documented element, serialized as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Class,
    Interface,
    Typedef,
    Method,
    Prop,
    Event,
    Param,
}

impl ElementKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Typedef => "typedef",
            Self::Method => "method",
            Self::Prop => "prop",
            Self::Event => "event",
            Self::Param => "param",
        }
    }

    /// Nested record groups this kind adopts, paired with the kind they become.
    pub(crate) fn member_groups(self, record: &RawRecord) -> Vec<(&[Value], Self)> {
        match self {
            Self::Class | Self::Interface => vec![
                (record.props.as_slice(), Self::Prop),
                (record.methods.as_slice(), Self::Method),
                (record.events.as_slice(), Self::Event),
            ],
            Self::Typedef => vec![
                (record.props.as_slice(), Self::Prop),
                (record.params.as_slice(), Self::Param),
            ],
            Self::Method | Self::Event => vec![(record.params.as_slice(), Self::Param)],
            Self::Prop | Self::Param => Vec::new(),
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

impl Access {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("private") => Self::Private,
            Some("protected") => Self::Protected,
            _ => Self::Public,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Static,
    #[default]
    Instance,
}

impl Scope {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("static") => Self::Static,
            _ => Self::Instance,
        }
    }
}

/// Modifiers carried by params and props.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    pub optional: bool,
    pub nullable: bool,
    pub variable: bool,
}

/// Children keyed by lowercased name.
///
/// Re-adopting a name replaces the previous child in place, so iteration order
/// stays the order in which each name was first seen.
#[derive(Debug, Default, Clone)]
pub struct ChildMap {
    slots: AHashMap<String, usize>,
    ids: Vec<ElementId>,
}

impl ChildMap {
    /// Adopt `id` under `name`, returning the child it displaced.
    pub fn insert(&mut self, name: &str, id: ElementId) -> Option<ElementId> {
        let key = name.to_lowercase();
        if let Some(&slot) = self.slots.get(&key) {
            return Some(std::mem::replace(&mut self.ids[slot], id));
        }
        self.slots.insert(key, self.ids.len());
        self.ids.push(id);
        None
    }

    pub fn get(&self, name: &str) -> Option<ElementId> {
        self.slots
            .get(&name.to_lowercase())
            .map(|&slot| self.ids[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A node of the documentation tree.
///
/// Elements live in their graph's arena; `parent` is a plain index back into
/// it and never owns anything.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) kind: ElementKind,
    pub(crate) description: Option<String>,
    pub(crate) meta: Option<RawMeta>,
    pub(crate) access: Access,
    pub(crate) scope: Scope,
    pub(crate) type_tokens: Vec<String>,
    pub(crate) returns: Option<RawReturns>,
    pub(crate) examples: Vec<String>,
    pub(crate) extends: Option<String>,
    pub(crate) modifiers: Modifiers,
    pub(crate) children: ChildMap,
    pub(crate) parent: Option<ElementId>,
    pub(crate) raw: Value,
}

impl Element {
    pub(crate) fn from_record(
        kind: ElementKind,
        parent: Option<ElementId>,
        record: &RawRecord,
        raw: Value,
    ) -> Self {
        Self {
            name: record.name.clone(),
            kind,
            description: record.description.clone(),
            meta: record.meta.clone(),
            access: Access::parse(record.access.as_deref()),
            scope: Scope::parse(record.scope.as_deref()),
            type_tokens: record.type_tokens.clone(),
            returns: record.returns.clone(),
            examples: record.examples.clone(),
            extends: record.extends.first().cloned(),
            modifiers: Modifiers {
                optional: record.optional,
                nullable: record.nullable,
                variable: record.variable,
            },
            children: ChildMap::default(),
            parent,
            raw,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub const fn meta(&self) -> Option<&RawMeta> {
        self.meta.as_ref()
    }

    pub const fn access(&self) -> Access {
        self.access
    }

    pub const fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_static(&self) -> bool {
        self.scope == Scope::Static
    }

    pub fn type_tokens(&self) -> &[String] {
        &self.type_tokens
    }

    pub const fn returns(&self) -> Option<&RawReturns> {
        self.returns.as_ref()
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub const fn children(&self) -> &ChildMap {
        &self.children
    }

    pub const fn parent_id(&self) -> Option<ElementId> {
        self.parent
    }

    /// The unmodified source record this element was built from.
    pub const fn raw(&self) -> &Value {
        &self.raw
    }
}
