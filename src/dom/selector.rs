//! Minimal selectors for the document's computed views

use crate::dom::node::Element;
use once_cell::sync::Lazy;
use std::fmt;

/// Selector evaluated against a single element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `tag`
    Type(String),
    /// `[attr]`
    AttrAvailable(String),
    /// `[attr="value"]`
    AttrEquals { name: String, value: String },
    /// Every part matches (`a[href]`)
    Compound(Vec<Selector>),
    /// Any alternative matches (`embed, object`)
    List(Vec<Selector>),
}

impl Selector {
    pub fn tag(tag_name: &str) -> Self {
        Self::Type(tag_name.to_ascii_lowercase())
    }

    pub fn has_attribute(name: &str) -> Self {
        Self::AttrAvailable(name.to_ascii_lowercase())
    }

    pub fn attribute_equals(name: &str, value: impl Into<String>) -> Self {
        Self::AttrEquals {
            name: name.to_ascii_lowercase(),
            value: value.into(),
        }
    }

    /// `tag[attr]`
    pub fn tag_with_attribute(tag_name: &str, attr: &str) -> Self {
        Self::Compound(vec![Self::tag(tag_name), Self::has_attribute(attr)])
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Type(tag) => element.tag_name == *tag,
            Self::AttrAvailable(name) => element.has_attribute(name),
            Self::AttrEquals { name, value } => {
                element.get_attribute(name).as_deref() == Some(value.as_str())
            }
            Self::Compound(parts) => parts.iter().all(|part| part.matches(element)),
            Self::List(alternatives) => alternatives.iter().any(|alt| alt.matches(element)),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(tag) => f.write_str(tag),
            Self::AttrAvailable(name) => write!(f, "[{name}]"),
            Self::AttrEquals { name, value } => write!(f, "[{name}={value:?}]"),
            Self::Compound(parts) => parts.iter().try_for_each(|part| write!(f, "{part}")),
            Self::List(alternatives) => {
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
        }
    }
}

/// Selectors behind the document's computed views
#[derive(Debug)]
pub struct DocumentQueries {
    pub anchors: Selector,
    pub embeds: Selector,
    pub links: Selector,
}

/// Built once, shared by every document
pub static QUERIES: Lazy<DocumentQueries> = Lazy::new(|| DocumentQueries {
    anchors: Selector::tag_with_attribute("a", "name"),
    embeds: Selector::List(vec![
        Selector::tag("embed"),
        Selector::tag("object"),
        Selector::tag("applet"),
    ]),
    links: Selector::List(vec![
        Selector::tag_with_attribute("a", "href"),
        Selector::tag_with_attribute("area", "href"),
    ]),
});
