//! Document-unique element slots (head, body, title)

use crate::dom::node::{ElementKind, NodeId};
use crate::dom::observer::TreeObserver;
use crate::dom::tree::NodeTree;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SingletonKind {
    Head,
    Body,
    Title,
}

impl SingletonKind {
    fn element_kind(self) -> ElementKind {
        match self {
            Self::Head => ElementKind::Head,
            Self::Body => ElementKind::Body,
            Self::Title => ElementKind::Title,
        }
    }
}

/// Current holders of the singleton slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingletonSlots {
    head: Option<NodeId>,
    body: Option<NodeId>,
    title: Option<NodeId>,
}

impl SingletonSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: SingletonKind) -> Option<NodeId> {
        match kind {
            SingletonKind::Head => self.head,
            SingletonKind::Body => self.body,
            SingletonKind::Title => self.title,
        }
    }

    fn slot_mut(&mut self, kind: SingletonKind) -> &mut Option<NodeId> {
        match kind {
            SingletonKind::Head => &mut self.head,
            SingletonKind::Body => &mut self.body,
            SingletonKind::Title => &mut self.title,
        }
    }

    /// Subtree searched when the holder of `kind` goes away
    fn anchor(&self, tree: &NodeTree, kind: SingletonKind) -> Option<NodeId> {
        match kind {
            SingletonKind::Head | SingletonKind::Body => tree.document_element(),
            SingletonKind::Title => self.head,
        }
    }
}

impl TreeObserver for SingletonSlots {
    fn on_attach(&mut self, tree: &NodeTree, node: NodeId) {
        let Some(kind) = tree.node(node).and_then(|n| n.kind()).and_then(|k| k.singleton()) else {
            return;
        };

        let slot = self.slot_mut(kind);
        if slot.is_none() {
            *slot = Some(node);
            log::trace!("{:?} slot claimed by {}", kind, node);
        }
    }

    fn on_detach(&mut self, tree: &NodeTree, node: NodeId) {
        let Some(kind) = tree.node(node).and_then(|n| n.kind()).and_then(|k| k.singleton()) else {
            return;
        };
        if self.get(kind) != Some(node) {
            return;
        }

        let replacement = self
            .anchor(tree, kind)
            .and_then(|anchor| tree.find_descendant(anchor, kind.element_kind()));
        *self.slot_mut(kind) = replacement;

        match replacement {
            Some(id) => log::debug!("{:?} slot rescanned, now held by {}", kind, id),
            None => log::debug!("{:?} slot rescanned, now empty", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::{Element, NodeData};

    fn element(tree: &mut NodeTree, parent: NodeId, tag: &str) -> NodeId {
        let id = tree.create(NodeData::Element(Element::new(tag)));
        tree.link(parent, id, None).unwrap();
        id
    }

    #[test]
    fn test_title_slot_rescans_head() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let html = element(&mut tree, root, "html");
        let head = element(&mut tree, html, "head");
        let t1 = element(&mut tree, head, "title");
        let t2 = element(&mut tree, head, "title");

        let mut slots = SingletonSlots::new();
        for id in [html, head, t1, t2] {
            slots.on_attach(&tree, id);
        }
        assert_eq!(slots.get(SingletonKind::Head), Some(head));
        assert_eq!(slots.get(SingletonKind::Title), Some(t1));

        tree.unlink(t1);
        slots.on_detach(&tree, t1);
        assert_eq!(slots.get(SingletonKind::Title), Some(t2));

        tree.unlink(t2);
        slots.on_detach(&tree, t2);
        assert_eq!(slots.get(SingletonKind::Title), None);
    }

    #[test]
    fn test_detaching_non_holder_keeps_slot() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let html = element(&mut tree, root, "html");
        let b1 = element(&mut tree, html, "body");
        let b2 = element(&mut tree, html, "body");

        let mut slots = SingletonSlots::new();
        slots.on_attach(&tree, b1);
        slots.on_attach(&tree, b2);

        tree.unlink(b2);
        slots.on_detach(&tree, b2);
        assert_eq!(slots.get(SingletonKind::Body), Some(b1));
    }
}
