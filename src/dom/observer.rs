use crate::dom::node::NodeId;
use crate::dom::tree::NodeTree;

/// Receiver of structural change notifications
///
/// The document calls these synchronously, once per node of an attached or removed
/// subtree, in pre-order. `on_attach` runs after the node is linked into the connected
/// tree; `on_detach` runs after the subtree has been unlinked, so scans of `tree` no longer
/// see the removed nodes.
pub trait TreeObserver {
    fn on_attach(&mut self, tree: &NodeTree, node: NodeId);

    fn on_detach(&mut self, tree: &NodeTree, node: NodeId);
}
