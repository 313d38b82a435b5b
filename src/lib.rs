//! # live-dom
//!
//! The live-synchronization layer of a browser-style document: structures derived from the
//! tree or from attribute text that stay consistent as the document mutates, without being
//! re-derived on every access.
//!
//! ## Features
//!
//! - **Bound text stores**: `style` declaration blocks and `class` token lists that resync from
//!   their attribute only when its text changed, and write back on every mutation
//! - **Live collections**: forms, images and scripts maintained in document order by
//!   attach/detach notifications
//! - **Computed views**: anchors, embeds and links evaluated per access
//! - **Singleton slots**: head, body and title, rescanned when their holder is removed
//! - **CSS rules**: font-face, page and style rules with named property accessors
//! - **Tool system**: schema-described operations driven from JSON
//!
//! ## Library Usage
//!
//! ### Live collections
//!
//! ```rust
//! use live_dom::{Document, DocumentOptions, ElementNode};
//!
//! # fn main() -> live_dom::Result<()> {
//! let page = ElementNode::new("html").with_children(vec![
//!     ElementNode::new("body").with_children(vec![ElementNode::new("form")]),
//! ]);
//! let mut document = Document::from_tree(&page, DocumentOptions::default())?;
//! assert_eq!(document.forms().len(), 1);
//!
//! let form = document.forms()[0];
//! document.remove(form)?;
//! assert!(document.forms().is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ### Bound declaration blocks
//!
//! ```rust
//! use live_dom::Document;
//!
//! # fn main() -> live_dom::Result<()> {
//! let mut document = Document::new();
//! let body = document.create_element("body");
//! document.set_attribute(body, "style", "color: red; font-weight: bold !important;")?;
//!
//! let style = document.style(body)?;
//! assert_eq!(style.get_property_priority("font-weight"), Some("important"));
//! assert_eq!(style.remove_property("color").as_deref(), Some("red"));
//! assert_eq!(
//!     document.get_attribute(body, "style").as_deref(),
//!     Some("font-weight: bold !important;")
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Using the Tool System
//!
//! ```rust
//! use live_dom::Document;
//! use live_dom::tools::{ToolContext, ToolRegistry};
//! use serde_json::json;
//!
//! # fn main() -> live_dom::Result<()> {
//! let mut document = Document::new();
//! let registry = ToolRegistry::with_defaults();
//! let mut context = ToolContext::new(&mut document);
//!
//! registry.execute("set_title", json!({"title": "Inbox"}), &mut context)?;
//! let report = registry.execute("collections", json!({}), &mut context)?;
//! assert_eq!(report.data.unwrap()["title"], "Inbox");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`binding`]: text-bound store shared by declaration blocks and token sets
//! - [`css`]: declarations, tokenizer, rules and style sheets
//! - [`dom`]: node arena, document, live index, singleton slots and selectors
//! - [`tools`]: scripted document operations
//! - [`config`]: document options
//! - [`error`]: Error types and result aliases

pub mod binding;
pub mod config;
pub mod css;
pub mod dom;
pub mod error;
pub mod tools;

pub use binding::{SharedText, TextBinding, TextBound, TextModel};
pub use config::{DocumentOptions, QuirksMode};
pub use css::{CssRule, CssTokenizer, DeclarationBlock, DeclarationTokenizer, Property, StyleSheet};
pub use dom::{Document, ElementNode, LiveCategory, NodeId, TokenSet};
pub use error::{DomError, Result};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
