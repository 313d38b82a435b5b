use crate::binding::TextBinding;
use crate::css::DeclarationBlock;
use crate::dom::live_index::LiveCategory;
use crate::dom::singleton::SingletonKind;
use crate::dom::token_list::TokenSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type AttributeMap = IndexMap<String, String>;

/// Handle of a node inside a document's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Category tag carried by every element, derived from its tag name
///
/// Mutation hooks switch on this tag instead of comparing tag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Html,
    Head,
    Body,
    Title,
    Form,
    Image,
    Script,
    Anchor,
    Area,
    Embed,
    Object,
    Applet,
    Other,
}

impl ElementKind {
    /// Kind for a lower-cased tag name
    pub fn from_tag(tag_name: &str) -> Self {
        match tag_name {
            "html" => Self::Html,
            "head" => Self::Head,
            "body" => Self::Body,
            "title" => Self::Title,
            "form" => Self::Form,
            "img" => Self::Image,
            "script" => Self::Script,
            "a" => Self::Anchor,
            "area" => Self::Area,
            "embed" => Self::Embed,
            "object" => Self::Object,
            "applet" => Self::Applet,
            _ => Self::Other,
        }
    }

    /// Live collection this kind is tracked in
    pub fn live_category(self) -> Option<LiveCategory> {
        match self {
            Self::Form => Some(LiveCategory::Forms),
            Self::Image => Some(LiveCategory::Images),
            Self::Script => Some(LiveCategory::Scripts),
            _ => None,
        }
    }

    /// Document-unique slot this kind can claim
    pub fn singleton(self) -> Option<SingletonKind> {
        match self {
            Self::Head => Some(SingletonKind::Head),
            Self::Body => Some(SingletonKind::Body),
            Self::Title => Some(SingletonKind::Title),
            _ => None,
        }
    }
}

/// Attribute storage shared between an element and the bindings of its stores
#[derive(Debug, Clone, Default)]
pub struct AttributeStore(Rc<RefCell<AttributeMap>>);

impl AttributeStore {
    /// Empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `name`, if set
    pub fn get(&self, name: &str) -> Option<String> {
        self.0.borrow().get(name).cloned()
    }

    /// Insert or overwrite `name`, keeping its original position
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.0.borrow_mut().insert(name.into(), value.into());
    }

    /// Remove `name`, returning the old value
    pub fn remove(&self, name: &str) -> Option<String> {
        self.0.borrow_mut().shift_remove(name)
    }

    /// Whether `name` is set
    pub fn contains(&self, name: &str) -> bool {
        self.0.borrow().contains_key(name)
    }

    /// Copy of every attribute in insertion order
    pub fn to_map(&self) -> AttributeMap {
        self.0.borrow().clone()
    }

    /// Binding onto the attribute `name`
    pub fn binding(&self, name: impl Into<String>) -> AttributeBinding {
        AttributeBinding {
            attributes: Rc::downgrade(&self.0),
            name: name.into(),
        }
    }
}

/// Pull/push adapter over one attribute of an element
///
/// Holds the storage weakly: once the element is gone, `pull` yields `None` and `push` is
/// dropped.
#[derive(Debug, Clone)]
pub struct AttributeBinding {
    attributes: Weak<RefCell<AttributeMap>>,
    name: String,
}

impl TextBinding for AttributeBinding {
    fn pull(&self) -> Option<String> {
        let attributes = self.attributes.upgrade()?;
        let value = attributes.borrow().get(&self.name).cloned().unwrap_or_default();
        Some(value)
    }

    fn push(&self, text: &str) {
        match self.attributes.upgrade() {
            Some(attributes) => {
                attributes.borrow_mut().insert(self.name.clone(), text.to_string());
            }
            None => log::debug!("Dropping write to attribute {:?} of a released element", self.name),
        }
    }
}

/// Element payload of a node
#[derive(Debug)]
pub struct Element {
    pub tag_name: String,
    pub kind: ElementKind,
    attributes: AttributeStore,
    class_list: Option<TokenSet>,
    style: Option<DeclarationBlock>,
}

impl Element {
    /// Element for `tag_name`, lower-cased
    pub fn new(tag_name: &str) -> Self {
        let tag_name = tag_name.to_ascii_lowercase();
        Self {
            kind: ElementKind::from_tag(&tag_name),
            tag_name,
            attributes: AttributeStore::new(),
            class_list: None,
            style: None,
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(&name.to_ascii_lowercase())
    }

    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        self.attributes.set(name.to_ascii_lowercase(), value);
    }

    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.attributes.remove(&name.to_ascii_lowercase())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(&name.to_ascii_lowercase())
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Token set bound to the `class` attribute, created on first use
    pub fn class_list(&mut self) -> &mut TokenSet {
        let attributes = &self.attributes;
        self.class_list
            .get_or_insert_with(|| TokenSet::bound(Box::new(attributes.binding("class"))))
    }

    /// Declaration block bound to the `style` attribute, created on first use
    pub fn style(&mut self) -> &mut DeclarationBlock {
        let attributes = &self.attributes;
        self.style
            .get_or_insert_with(|| DeclarationBlock::bound(Box::new(attributes.binding("style"))))
    }
}

#[derive(Debug)]
pub enum NodeData {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

/// A node of the arena together with its linkage
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Parent node, `None` while detached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Element payload, `None` for other node types
    pub fn as_element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Mutable element payload
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Element kind, `None` for non-element nodes
    pub fn kind(&self) -> Option<ElementKind> {
        self.as_element().map(|element| element.kind)
    }

    /// Whether children may be linked under this node
    pub fn can_have_children(&self) -> bool {
        matches!(self.data, NodeData::Document | NodeData::Element(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_kind_from_tag() {
        assert_eq!(Element::new("IMG").kind, ElementKind::Image);
        assert_eq!(Element::new("img").tag_name, "img");
        assert_eq!(ElementKind::from_tag("form").live_category(), Some(LiveCategory::Forms));
        assert_eq!(ElementKind::from_tag("title").singleton(), Some(SingletonKind::Title));
        assert_eq!(ElementKind::from_tag("div"), ElementKind::Other);
        assert_eq!(ElementKind::Anchor.live_category(), None);
    }

    #[test]
    fn test_class_list_writes_attribute() {
        let mut element = Element::new("div");
        element.set_attribute("CLASS", "a b a");

        assert_eq!(element.class_list().to_vec(), vec!["a", "b"]);
        element.class_list().add("c").unwrap();
        assert_eq!(element.get_attribute("class").as_deref(), Some("a b c"));

        element.set_attribute("class", "z");
        assert!(element.class_list().contains("z"));
        assert!(!element.class_list().contains("a"));
    }

    #[test]
    fn test_style_writes_attribute() {
        let mut element = Element::new("p");
        element.style().set_property("color", "red");
        assert_eq!(element.get_attribute("style").as_deref(), Some("color: red;"));

        element.remove_attribute("style");
        assert_eq!(element.style().length(), 0);
    }

    #[test]
    fn test_binding_outlives_element() {
        let element = Element::new("span");
        let binding = element.attributes().binding("class");
        element.set_attribute("class", "x");
        assert_eq!(binding.pull().as_deref(), Some("x"));

        drop(element);
        assert_eq!(binding.pull(), None);
        binding.push("y");
    }
}
