use crate::dom::ElementNode;
use crate::error::Result;
use crate::tools::{NodeTarget, Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the append tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AppendParams {
    /// Parent node (node 0 is the document)
    #[serde(flatten)]
    pub parent: NodeTarget,

    /// Element subtree to build and attach
    pub element: ElementNode,

    /// Insert before this child of the parent instead of appending
    #[serde(default)]
    pub before: Option<usize>,
}

/// Tool for materializing an element subtree under a parent
#[derive(Default)]
pub struct AppendTool;

impl Tool for AppendTool {
    type Params = AppendParams;

    fn name(&self) -> &str {
        "append"
    }

    fn execute_typed(&self, params: AppendParams, context: &mut ToolContext) -> Result<ToolResult> {
        let document = &mut *context.document;
        let parent = params.parent.resolve(document)?;

        let reference = params
            .before
            .map(|node| NodeTarget::Node { node }.resolve(document))
            .transpose()?;
        document.tree().validate_element_position(parent, reference)?;

        let subtree = document.create_tree(&params.element)?;
        let node = document.insert_before(parent, subtree, reference)?;

        Ok(ToolResult::success_with(serde_json::json!({
            "node": node,
            "tag_name": params.element.tag_name.to_ascii_lowercase(),
        })))
    }
}

/// Parameters for the remove tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RemoveParams {
    /// Node to remove from its parent
    #[serde(flatten)]
    pub target: NodeTarget,
}

/// Tool for removing a node from the tree
#[derive(Default)]
pub struct RemoveTool;

impl Tool for RemoveTool {
    type Params = RemoveParams;

    fn name(&self) -> &str {
        "remove"
    }

    fn execute_typed(&self, params: RemoveParams, context: &mut ToolContext) -> Result<ToolResult> {
        let node = params.target.resolve(context.document)?;
        context.document.remove(node)?;

        Ok(ToolResult::success_with(serde_json::json!({ "removed": node })))
    }
}
