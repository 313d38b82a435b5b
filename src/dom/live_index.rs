//! Incrementally maintained element collections
//!
//! Each tracked category keeps its elements in document order. Attach notifications insert,
//! detach notifications remove by identity; nothing ever rescans the tree.

use crate::dom::node::NodeId;
use crate::dom::observer::TreeObserver;
use crate::dom::tree::NodeTree;
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;

/// Tracked element categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveCategory {
    Forms,
    Images,
    Scripts,
}

impl LiveCategory {
    pub const ALL: [LiveCategory; 3] = [Self::Forms, Self::Images, Self::Scripts];
}

/// Per-category ordered element lists
#[derive(Debug, Clone)]
pub struct LiveElementIndex {
    lists: IndexMap<LiveCategory, Vec<NodeId>>,
}

impl LiveElementIndex {
    pub fn new() -> Self {
        Self {
            lists: LiveCategory::ALL
                .into_iter()
                .map(|category| (category, Vec::new()))
                .collect(),
        }
    }

    /// Elements of `category` in document order
    pub fn get(&self, category: LiveCategory) -> &[NodeId] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, category: LiveCategory, node: NodeId) -> bool {
        self.get(category).contains(&node)
    }

    /// Total number of tracked elements
    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over (category, elements) pairs
    pub fn iter(&self) -> impl Iterator<Item = (LiveCategory, &[NodeId])> {
        self.lists.iter().map(|(category, list)| (*category, list.as_slice()))
    }
}

impl Default for LiveElementIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeObserver for LiveElementIndex {
    fn on_attach(&mut self, tree: &NodeTree, node: NodeId) {
        let Some(category) = tree.node(node).and_then(|n| n.kind()).and_then(|k| k.live_category())
        else {
            return;
        };

        let list = self.lists.entry(category).or_default();
        if list.contains(&node) {
            return;
        }

        match list.last() {
            Some(&last) if tree.compare_order(last, node) == Ordering::Greater => {
                let at = list.partition_point(|&entry| tree.compare_order(entry, node) == Ordering::Less);
                list.insert(at, node);
            }
            _ => list.push(node),
        }
        log::trace!("Tracked {} in {:?} ({} entries)", node, category, list.len());
    }

    fn on_detach(&mut self, _tree: &NodeTree, node: NodeId) {
        for (category, list) in self.lists.iter_mut() {
            if let Some(pos) = list.iter().position(|&entry| entry == node) {
                list.remove(pos);
                log::trace!("Untracked {} from {:?}", node, category);
            }
        }
    }
}
