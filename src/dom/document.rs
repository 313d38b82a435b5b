//! Host document
//!
//! Owns the node arena together with the structures kept in step with it: the live element
//! index and the singleton slots. Every structural mutation goes through [`Document`], which
//! delivers attach/detach notifications before returning.

use crate::config::{DocumentOptions, QuirksMode};
use crate::css::DeclarationBlock;
use crate::dom::element::ElementNode;
use crate::dom::live_index::{LiveCategory, LiveElementIndex};
use crate::dom::node::{Element, NodeData, NodeId};
use crate::dom::observer::TreeObserver;
use crate::dom::selector::{QUERIES, Selector};
use crate::dom::singleton::{SingletonKind, SingletonSlots};
use crate::dom::token_list::TokenSet;
use crate::dom::tree::NodeTree;
use crate::error::{DomError, Result};
use url::Url;

/// An HTML document with live collections
#[derive(Debug)]
pub struct Document {
    tree: NodeTree,
    index: LiveElementIndex,
    slots: SingletonSlots,
    options: DocumentOptions,
}

impl Document {
    /// Empty document with default options
    pub fn new() -> Self {
        Self::with_options(DocumentOptions::default())
    }

    /// Empty document with the given options
    pub fn with_options(options: DocumentOptions) -> Self {
        Self {
            tree: NodeTree::new(),
            index: LiveElementIndex::new(),
            slots: SingletonSlots::new(),
            options,
        }
    }

    /// Document whose element tree is built from `root`
    pub fn from_tree(root: &ElementNode, options: DocumentOptions) -> Result<Self> {
        let mut document = Self::with_options(options);
        let parent = document.tree.root();
        document.append_tree(parent, root)?;
        Ok(document)
    }

    /// Read access to the node arena
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Options the document was created with, including the current URL
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    // ---- node creation ----

    /// Detached element; the tag name is lower-cased
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.tree.create(NodeData::Element(Element::new(tag_name)))
    }

    /// Detached text node
    pub fn create_text_node(&mut self, text: impl Into<String>) -> NodeId {
        self.tree.create(NodeData::Text(text.into()))
    }

    /// Detached comment node
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.tree.create(NodeData::Comment(text.into()))
    }

    /// CDATA sections do not exist in HTML documents
    pub fn create_cdata_section(&mut self, _data: &str) -> Result<NodeId> {
        Err(DomError::NotSupported(
            "CDATA sections cannot be created in HTML documents".to_string(),
        ))
    }

    /// Build `description` as a detached subtree, then append it under `parent`
    ///
    /// The whole subtree is attached in one step, so observers see one pre-order pass.
    pub fn append_tree(&mut self, parent: NodeId, description: &ElementNode) -> Result<NodeId> {
        let subtree = self.create_tree(description)?;
        self.append_child(parent, subtree)
    }

    /// Build `description` as a detached subtree and return its root
    pub fn create_tree(&mut self, description: &ElementNode) -> Result<NodeId> {
        let id = self.create_element(&description.tag_name);
        if let Some(element) = self.tree.element(id) {
            for (name, value) in &description.attributes {
                element.set_attribute(name, value.as_str());
            }
        }

        if let Some(text) = &description.text_content {
            let text = self.create_text_node(text.as_str());
            self.tree.link(id, text, None)?;
        }
        for child in &description.children {
            let child = self.create_tree(child)?;
            self.tree.link(id, child, None)?;
        }

        Ok(id)
    }

    // ---- mutation ----

    /// Insert `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` under `parent` before `reference`, or last when `reference` is `None`
    ///
    /// A node that already has a parent is moved: it is detached from its old position
    /// (detach notifications) before being attached at the new one.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId> {
        self.tree.validate_insert(parent, child, reference)?;
        if reference == Some(child) {
            return Ok(child);
        }

        self.detach(child);
        self.tree.link(parent, child, reference)?;
        self.notify_attach(child);
        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.tree.get(child)?;
        if self.tree.parent(child) != Some(parent) {
            return Err(DomError::HierarchyRequest(format!(
                "{child} is not a child of {parent}"
            )));
        }

        self.detach(child);
        Ok(child)
    }

    /// Remove `node` from its parent, if it has one
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        self.tree.get(node)?;
        self.detach(node);
        Ok(())
    }

    /// Take `node` out of its current position so it can be inserted elsewhere
    pub fn adopt_node(&mut self, node: NodeId) -> Result<NodeId> {
        if node == self.tree.root() {
            return Err(DomError::NotSupported("the document node cannot be adopted".to_string()));
        }
        self.tree.get(node)?;
        self.detach(node);
        Ok(node)
    }

    fn detach(&mut self, node: NodeId) {
        let was_connected = self.tree.is_connected(node);
        if self.tree.unlink(node).is_none() || !was_connected {
            return;
        }

        for id in self.tree.preorder(node) {
            log::trace!("Detached {}", id);
            let observers: [&mut dyn TreeObserver; 2] = [&mut self.index, &mut self.slots];
            for observer in observers {
                observer.on_detach(&self.tree, id);
            }
        }
    }

    fn notify_attach(&mut self, node: NodeId) {
        if !self.tree.is_connected(node) {
            return;
        }

        for id in self.tree.preorder(node) {
            log::trace!("Attached {}", id);
            let observers: [&mut dyn TreeObserver; 2] = [&mut self.index, &mut self.slots];
            for observer in observers {
                observer.on_attach(&self.tree, id);
            }
        }
    }

    // ---- elements & attributes ----

    /// Element at `id`, `None` for other node types
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.tree.element(id)
    }

    fn element_or_err(&self, id: NodeId) -> Result<&Element> {
        self.tree.get(id)?;
        self.tree
            .element(id)
            .ok_or_else(|| DomError::InvalidArguments(format!("{id} is not an element")))
    }

    fn element_mut_or_err(&mut self, id: NodeId) -> Result<&mut Element> {
        self.tree.get(id)?;
        self.tree
            .element_mut(id)
            .ok_or_else(|| DomError::InvalidArguments(format!("{id} is not an element")))
    }

    /// Attribute `name` of element `id`
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id)?.get_attribute(name)
    }

    /// Set attribute `name`; bound `class`/`style` stores resync on their next access
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_or_err(id)?.set_attribute(name, value);
        Ok(())
    }

    /// Remove attribute `name`, returning the old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.element_or_err(id)?.remove_attribute(name))
    }

    /// Token set bound to the element's `class` attribute
    pub fn class_list(&mut self, id: NodeId) -> Result<&mut TokenSet> {
        Ok(self.element_mut_or_err(id)?.class_list())
    }

    /// Declaration block bound to the element's `style` attribute
    pub fn style(&mut self, id: NodeId) -> Result<&mut DeclarationBlock> {
        Ok(self.element_mut_or_err(id)?.style())
    }

    // ---- live collections ----

    /// Connected elements of `category` in document order
    pub fn live(&self, category: LiveCategory) -> &[NodeId] {
        self.index.get(category)
    }

    /// Live `form` elements
    pub fn forms(&self) -> &[NodeId] {
        self.live(LiveCategory::Forms)
    }

    /// Live `img` elements
    pub fn images(&self) -> &[NodeId] {
        self.live(LiveCategory::Images)
    }

    /// Live `script` elements
    pub fn scripts(&self) -> &[NodeId] {
        self.live(LiveCategory::Scripts)
    }

    // ---- computed views ----

    /// Fresh list of elements under the document matching `selector`
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.tree.query_selector_all(self.tree.root(), selector)
    }

    /// `a[name]` elements
    pub fn anchors(&self) -> Vec<NodeId> {
        self.query_selector_all(&QUERIES.anchors)
    }

    /// `embed`, `object` and `applet` elements
    pub fn embeds(&self) -> Vec<NodeId> {
        self.query_selector_all(&QUERIES.embeds)
    }

    /// `a[href]` and `area[href]` elements
    pub fn links(&self) -> Vec<NodeId> {
        self.query_selector_all(&QUERIES.links)
    }

    /// Elements whose `name` attribute equals `name`
    pub fn get_elements_by_name(&self, name: &str) -> Vec<NodeId> {
        self.query_selector_all(&Selector::attribute_equals("name", name))
    }

    // ---- singletons ----

    /// The element child of the document
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree.document_element()
    }

    /// Current `head` slot
    pub fn head(&self) -> Option<NodeId> {
        self.slots.get(SingletonKind::Head)
    }

    /// Current `body` slot
    pub fn body(&self) -> Option<NodeId> {
        self.slots.get(SingletonKind::Body)
    }

    /// Current title element
    pub fn title_element(&self) -> Option<NodeId> {
        self.slots.get(SingletonKind::Title)
    }

    /// Title text with ASCII whitespace stripped and collapsed
    pub fn title(&self) -> String {
        self.title_element()
            .map(|title| {
                self.tree
                    .text_content(title)
                    .split_ascii_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }

    /// Replace the title text, creating html, head and title elements when missing
    ///
    /// The previous text nodes are only unlinked; like every removed node they keep their
    /// arena slot.
    pub fn set_title(&mut self, text: &str) -> Result<()> {
        let title = match self.title_element() {
            Some(title) => title,
            None => {
                let head = self.ensure_head()?;
                let title = self.create_element("title");
                self.append_child(head, title)?
            }
        };

        let children = self.tree.children(title).to_vec();
        for child in children {
            self.detach(child);
        }
        let text = self.create_text_node(text);
        self.append_child(title, text)?;
        Ok(())
    }

    fn ensure_head(&mut self) -> Result<NodeId> {
        if let Some(head) = self.head() {
            return Ok(head);
        }

        let html = match self.document_element() {
            Some(html) => html,
            None => {
                let html = self.create_element("html");
                let root = self.tree.root();
                self.append_child(root, html)?
            }
        };

        let head = self.create_element("head");
        let first = self.tree.children(html).first().copied();
        self.insert_before(html, head, first)
    }

    // ---- document state ----

    /// `BackCompat` in quirks mode, `CSS1Compat` otherwise
    pub fn compat_mode(&self) -> &'static str {
        match self.options.quirks_mode {
            QuirksMode::Quirks => "BackCompat",
            QuirksMode::NoQuirks | QuirksMode::LimitedQuirks => "CSS1Compat",
        }
    }

    /// Document URL, if any
    pub fn url(&self) -> Option<&str> {
        self.options.url.as_deref()
    }

    /// Replace the document URL after checking that it parses
    pub fn set_url(&mut self, url: &str) -> Result<()> {
        Url::parse(url).map_err(|e| DomError::InvalidUrl(format!("{url}: {e}")))?;
        self.options.url = Some(url.to_string());
        Ok(())
    }

    /// Host of the document URL, empty when there is none
    pub fn domain(&self) -> String {
        self.url()
            .and_then(|url| Url::parse(url).ok())
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Whether scripting is enabled
    pub fn is_scripting(&self) -> bool {
        self.options.scripting
    }

    /// Whether the document is embedded in a browsing context
    pub fn is_embedded(&self) -> bool {
        self.options.embedded
    }

    // ---- cloning ----

    /// Deep copy of the connected tree into a fresh document with the same options
    ///
    /// Nodes get new ids in document order. The copy's live collections and slots are built
    /// by attaching the copied subtrees, just like any other insertion.
    pub fn clone_document(&self) -> Result<Self> {
        let mut copy = Self::with_options(self.options.clone());
        let root = copy.root();

        for &child in self.tree.children(self.tree.root()) {
            let cloned = self.copy_subtree(child, &mut copy)?;
            copy.append_child(root, cloned)?;
        }

        log::debug!("Cloned document with {} nodes", copy.tree.len());
        Ok(copy)
    }

    /// Detached copy of the subtree at `id`, allocated in `target`
    fn copy_subtree(&self, id: NodeId, target: &mut Self) -> Result<NodeId> {
        let node = self.tree.get(id)?;
        let cloned = match &node.data {
            NodeData::Element(element) => {
                let cloned = target.create_element(&element.tag_name);
                if let Some(copy) = target.tree.element(cloned) {
                    for (name, value) in element.attributes().to_map() {
                        copy.set_attribute(&name, value);
                    }
                }
                cloned
            }
            NodeData::Text(text) => target.create_text_node(text.as_str()),
            NodeData::Comment(text) => target.create_comment(text.as_str()),
            NodeData::Document => {
                return Err(DomError::HierarchyRequest(
                    "the document node cannot be copied as a child".to_string(),
                ));
            }
        };

        for &child in node.children() {
            let child = self.copy_subtree(child, target)?;
            target.tree.link(cloned, child, None)?;
        }

        Ok(cloned)
    }

    // ---- serialization ----

    /// Description of the element tree, `None` without a document element
    pub fn snapshot(&self) -> Option<ElementNode> {
        self.document_element().and_then(|root| self.snapshot_node(root))
    }

    /// Description of the subtree rooted at element `id`
    ///
    /// Direct text children are joined into `text_content`; comments are left out.
    pub fn snapshot_node(&self, id: NodeId) -> Option<ElementNode> {
        let element = self.tree.element(id)?;
        let mut node = ElementNode::new(element.tag_name.clone())
            .with_attributes(element.attributes().to_map());

        let mut text = String::new();
        for &child in self.tree.children(id) {
            match self.tree.node(child).map(|n| &n.data) {
                Some(NodeData::Text(t)) => text.push_str(t),
                Some(NodeData::Element(_)) => node.children.extend(self.snapshot_node(child)),
                _ => {}
            }
        }
        if !text.is_empty() {
            node.text_content = Some(text);
        }

        Some(node)
    }

    /// Pretty-printed JSON snapshot
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
