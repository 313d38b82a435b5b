use crate::dom::node::{Element, ElementKind, Node, NodeData, NodeId};
use crate::dom::selector::Selector;
use crate::error::{DomError, Result};
use std::cmp::Ordering;

/// Arena holding every node created for a document
///
/// Slot 0 is the document node. Nodes are never freed; removal only unlinks them, so a
/// removed node keeps its id and can be inserted again.
#[derive(Debug)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Allocate a detached node
    pub(crate) fn create(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    /// Number of nodes ever created, the document node included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Node or `NodeNotFound`
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(DomError::NodeNotFound(id))
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.node_mut(id).and_then(Node::as_element_mut)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    /// Whether `id` is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root(), id)
    }

    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// `id` followed by its descendants in pre-order
    pub fn preorder(&self, id: NodeId) -> Preorder<'_> {
        let stack = if self.node(id).is_some() { vec![id] } else { Vec::new() };
        Preorder { tree: self, stack }
    }

    /// Descendants of `id` in pre-order, `id` excluded
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.preorder(id).skip(1)
    }

    /// Child indices from the root down to `id`
    fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let pos = self
                .children(parent)
                .iter()
                .position(|&child| child == current)
                .unwrap_or_default();
            path.push(pos);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Document-order comparison; an ancestor precedes its descendants
    pub fn compare_order(&self, a: NodeId, b: NodeId) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        self.path(a).cmp(&self.path(b))
    }

    /// First element child of the document node
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.root())
            .iter()
            .copied()
            .find(|&child| self.element(child).is_some())
    }

    /// First descendant of `anchor` with the given kind
    pub fn find_descendant(&self, anchor: NodeId, kind: ElementKind) -> Option<NodeId> {
        self.descendants(anchor)
            .find(|&id| self.node(id).and_then(Node::kind) == Some(kind))
    }

    /// Every element of `kind` under `scope`, `scope` included, in document order
    pub fn elements_of_kind(&self, scope: NodeId, kind: ElementKind) -> Vec<NodeId> {
        self.preorder(scope)
            .filter(|&id| self.node(id).and_then(Node::kind) == Some(kind))
            .collect()
    }

    /// Descendant elements of `scope` matching `selector`, in document order
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&id| self.element(id).is_some_and(|element| selector.matches(element)))
            .collect()
    }

    /// Concatenated text of every text node under `id`
    pub fn text_content(&self, id: NodeId) -> String {
        self.preorder(id)
            .filter_map(|node| match &self.node(node)?.data {
                NodeData::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Check that `child` may be inserted under `parent` before `reference`
    pub(crate) fn validate_insert(
        &self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        let parent_node = self.validate_position(parent, reference)?;
        let child_node = self.get(child)?;

        if child == self.root() {
            return Err(DomError::HierarchyRequest("the document cannot be inserted".to_string()));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(format!(
                "{child} is an ancestor of {parent}"
            )));
        }

        if matches!(parent_node.data, NodeData::Document) {
            match child_node.data {
                NodeData::Text(_) => {
                    return Err(DomError::HierarchyRequest(
                        "the document cannot hold text".to_string(),
                    ));
                }
                NodeData::Element(_) => {
                    let other = self.document_element().filter(|&existing| existing != child);
                    if other.is_some() {
                        return Err(DomError::HierarchyRequest(
                            "the document already has an element child".to_string(),
                        ));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Check that a new element could be inserted under `parent` before `reference`
    pub(crate) fn validate_element_position(
        &self,
        parent: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        let parent_node = self.validate_position(parent, reference)?;
        if matches!(parent_node.data, NodeData::Document) && self.document_element().is_some() {
            return Err(DomError::HierarchyRequest(
                "the document already has an element child".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_position(&self, parent: NodeId, reference: Option<NodeId>) -> Result<&Node> {
        let parent_node = self.get(parent)?;
        if !parent_node.can_have_children() {
            return Err(DomError::HierarchyRequest(format!("{parent} cannot have children")));
        }
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::HierarchyRequest(format!(
                    "{reference} is not a child of {parent}"
                )));
            }
        }
        Ok(parent_node)
    }

    /// Link a parentless `child` under `parent`, before `reference` or last
    pub(crate) fn link(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        self.validate_insert(parent, child, reference)?;
        if let Some(old) = self.parent(child) {
            return Err(DomError::HierarchyRequest(format!("{child} is still linked under {old}")));
        }

        let children = &mut self.node_mut(parent).ok_or(DomError::NodeNotFound(parent))?.children;
        let at = reference
            .and_then(|reference| children.iter().position(|&c| c == reference))
            .unwrap_or(children.len());
        children.insert(at, child);

        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Unlink `child` from its parent, returning the former parent
    pub(crate) fn unlink(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.node_mut(child)?.parent.take()?;
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        Some(parent)
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order walk over a subtree
pub struct Preorder<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tree: &mut NodeTree, parent: NodeId, tag: &str) -> NodeId {
        let id = tree.create(NodeData::Element(Element::new(tag)));
        tree.link(parent, id, None).unwrap();
        id
    }

    fn create_test_tree() -> (NodeTree, [NodeId; 5]) {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let html = element(&mut tree, root, "html");
        let head = element(&mut tree, html, "head");
        let body = element(&mut tree, html, "body");
        let p = element(&mut tree, body, "p");
        let text = tree.create(NodeData::Text("hello".to_string()));
        tree.link(p, text, None).unwrap();
        (tree, [html, head, body, p, text])
    }

    #[test]
    fn test_preorder_and_order() {
        let (tree, [html, head, body, p, text]) = create_test_tree();

        let order: Vec<_> = tree.preorder(tree.root()).collect();
        assert_eq!(order, vec![tree.root(), html, head, body, p, text]);

        assert_eq!(tree.compare_order(head, p), Ordering::Less);
        assert_eq!(tree.compare_order(body, p), Ordering::Less);
        assert_eq!(tree.compare_order(text, head), Ordering::Greater);
        assert_eq!(tree.compare_order(p, p), Ordering::Equal);
    }

    #[test]
    fn test_lookups() {
        let (tree, [html, head, body, p, _]) = create_test_tree();

        assert_eq!(tree.document_element(), Some(html));
        assert_eq!(tree.find_descendant(html, ElementKind::Body), Some(body));
        assert_eq!(tree.find_descendant(head, ElementKind::Title), None);
        assert_eq!(tree.text_content(html), "hello");
        assert_eq!(tree.query_selector_all(tree.root(), &Selector::tag("p")), vec![p]);
    }

    #[test]
    fn test_link_validation() {
        let (mut tree, [html, _, body, p, text]) = create_test_tree();
        let root = tree.root();

        assert!(tree.link(p, html, None).is_err());
        assert!(tree.link(text, p, None).is_err());

        let second = tree.create(NodeData::Element(Element::new("html")));
        assert!(tree.link(root, second, None).is_err());
        let stray = tree.create(NodeData::Text("x".to_string()));
        assert!(tree.link(root, stray, None).is_err());
        assert!(tree.link(body, stray, Some(html)).is_err());

        let comment = tree.create(NodeData::Comment("c".to_string()));
        tree.link(root, comment, Some(html)).unwrap();
        assert_eq!(tree.children(root), &[comment, html]);
    }

    #[test]
    fn test_unlink_disconnects_subtree() {
        let (mut tree, [html, _, body, p, text]) = create_test_tree();

        assert_eq!(tree.unlink(body), Some(html));
        assert!(!tree.is_connected(p));
        assert!(tree.is_connected(html));
        assert_eq!(tree.text_content(body), "hello");
        assert_eq!(tree.unlink(body), None);
        assert!(tree.is_inclusive_ancestor(body, text));
    }
}
