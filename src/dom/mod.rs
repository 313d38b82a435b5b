//! Document tree and its live views
//!
//! This module provides the host document and the structures kept consistent with it:
//! - NodeTree: node arena with linkage and document-order comparison
//! - Document: mutation entry point firing attach/detach notifications
//! - LiveElementIndex: forms, images and scripts in document order
//! - SingletonSlots: head, body and title holders
//! - TokenSet: `class` attribute as a token list
//! - ElementNode: serializable tree description

pub mod document;
pub mod element;
pub mod live_index;
pub mod node;
pub mod observer;
pub mod selector;
pub mod singleton;
pub mod token_list;
pub mod tree;

pub use document::Document;
pub use element::ElementNode;
pub use live_index::{LiveCategory, LiveElementIndex};
pub use node::{AttributeBinding, AttributeStore, Element, ElementKind, Node, NodeData, NodeId};
pub use observer::TreeObserver;
pub use selector::{DocumentQueries, QUERIES, Selector};
pub use singleton::{SingletonKind, SingletonSlots};
pub use token_list::TokenSet;
pub use tree::NodeTree;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_export() {
        let element = ElementNode::new("div");
        assert_eq!(element.tag_name, "div");
    }

    #[test]
    fn test_document_export() {
        let document = Document::new();
        assert!(document.document_element().is_none());
        assert!(document.forms().is_empty());
    }
}
