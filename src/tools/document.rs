use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the set_title tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SetTitleParams {
    /// New document title
    pub title: String,
}

/// Tool for replacing the document title
#[derive(Default)]
pub struct SetTitleTool;

impl Tool for SetTitleTool {
    type Params = SetTitleParams;

    fn name(&self) -> &str {
        "set_title"
    }

    fn execute_typed(&self, params: SetTitleParams, context: &mut ToolContext) -> Result<ToolResult> {
        context.document.set_title(&params.title)?;

        Ok(ToolResult::success_with(serde_json::json!({
            "title": context.document.title(),
            "element": context.document.title_element(),
        })))
    }
}

/// Parameters for the collections tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CollectionsParams {}

/// Element entry of a collections report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub node: NodeId,
    pub tag_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Every live collection, computed view and singleton of a document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionsReport {
    pub forms: Vec<NodeSummary>,
    pub images: Vec<NodeSummary>,
    pub scripts: Vec<NodeSummary>,
    pub anchors: Vec<NodeSummary>,
    pub embeds: Vec<NodeSummary>,
    pub links: Vec<NodeSummary>,
    pub document_element: Option<NodeId>,
    pub head: Option<NodeId>,
    pub body: Option<NodeId>,
    pub title: String,
    pub compat_mode: &'static str,
    pub domain: String,
}

impl CollectionsReport {
    pub fn from_document(document: &Document) -> Self {
        let summarize = |nodes: &[NodeId]| -> Vec<NodeSummary> {
            nodes
                .iter()
                .filter_map(|&node| {
                    let element = document.element(node)?;
                    Some(NodeSummary {
                        node,
                        tag_name: element.tag_name.clone(),
                        id: element.get_attribute("id"),
                        name: element.get_attribute("name"),
                    })
                })
                .collect()
        };

        Self {
            forms: summarize(document.forms()),
            images: summarize(document.images()),
            scripts: summarize(document.scripts()),
            anchors: summarize(&document.anchors()),
            embeds: summarize(&document.embeds()),
            links: summarize(&document.links()),
            document_element: document.document_element(),
            head: document.head(),
            body: document.body(),
            title: document.title(),
            compat_mode: document.compat_mode(),
            domain: document.domain(),
        }
    }
}

/// Tool for reporting the document's collections
#[derive(Default)]
pub struct CollectionsTool;

impl Tool for CollectionsTool {
    type Params = CollectionsParams;

    fn name(&self) -> &str {
        "collections"
    }

    fn execute_typed(&self, _params: CollectionsParams, context: &mut ToolContext) -> Result<ToolResult> {
        let report = CollectionsReport::from_document(context.document);
        Ok(ToolResult::success_with(serde_json::to_value(report)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocumentOptions;
    use crate::dom::ElementNode;
    use crate::tools::ToolRegistry;
    use serde_json::json;

    #[test]
    fn test_set_title_tool() {
        let registry = ToolRegistry::with_defaults();
        let mut document = Document::new();
        let mut context = ToolContext::new(&mut document);

        let data = registry
            .execute("set_title", json!({"title": " Hello \t there "}), &mut context)
            .unwrap()
            .data
            .unwrap();
        assert_eq!(data["title"], "Hello there");
        assert!(data["element"].is_u64());
    }

    #[test]
    fn test_collections_report() {
        let root = ElementNode::new("html").with_children(vec![
            ElementNode::new("body").with_children(vec![
                ElementNode::new("form").with_attribute("id", "f").with_attribute("name", "login"),
                ElementNode::new("embed"),
                ElementNode::new("a").with_attribute("name", "top").with_attribute("href", "#"),
            ]),
        ]);
        let options = DocumentOptions::new().url("http://docs.example.org/");
        let document = Document::from_tree(&root, options).unwrap();

        let report = CollectionsReport::from_document(&document);
        assert_eq!(report.forms.len(), 1);
        assert_eq!(report.forms[0].id.as_deref(), Some("f"));
        assert_eq!(report.anchors, report.links);
        assert_eq!(report.embeds[0].tag_name, "embed");
        assert!(report.head.is_none());
        assert_eq!(report.body, document.body());
        assert_eq!(report.domain, "docs.example.org");
    }

    #[test]
    fn test_collections_tool_accepts_empty_params() {
        let registry = ToolRegistry::with_defaults();
        let mut document = Document::new();
        let mut context = ToolContext::new(&mut document);

        let result = registry.execute("collections", json!({}), &mut context).unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["compat_mode"], "CSS1Compat");
        assert_eq!(data["forms"], json!([]));
        assert!(data["head"].is_null());
    }
}
