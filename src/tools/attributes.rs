use crate::error::Result;
use crate::tools::{NodeTarget, Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the set_attribute tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SetAttributeParams {
    /// Element to modify
    #[serde(flatten)]
    pub target: NodeTarget,

    /// Attribute name
    pub name: String,

    /// New value; omit to remove the attribute
    #[serde(default)]
    pub value: Option<String>,
}

/// Tool for writing or removing an attribute
#[derive(Default)]
pub struct SetAttributeTool;

impl Tool for SetAttributeTool {
    type Params = SetAttributeParams;

    fn name(&self) -> &str {
        "set_attribute"
    }

    fn execute_typed(
        &self,
        params: SetAttributeParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let node = params.target.resolve(context.document)?;
        let previous = context.document.get_attribute(node, &params.name);

        match &params.value {
            Some(value) => context.document.set_attribute(node, &params.name, value)?,
            None => {
                context.document.remove_attribute(node, &params.name)?;
            }
        }

        Ok(ToolResult::success_with(serde_json::json!({
            "node": node,
            "name": params.name,
            "value": params.value,
            "previous": previous,
        })))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClassAction {
    Add,
    Remove,
    Toggle,
    Contains,
}

/// Parameters for the class_list tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClassListParams {
    /// Element whose class list is used
    #[serde(flatten)]
    pub target: NodeTarget,

    /// Operation to apply
    pub action: ClassAction,

    /// Class token
    pub token: String,
}

/// Tool for editing an element's class list
#[derive(Default)]
pub struct ClassListTool;

impl Tool for ClassListTool {
    type Params = ClassListParams;

    fn name(&self) -> &str {
        "class_list"
    }

    fn execute_typed(&self, params: ClassListParams, context: &mut ToolContext) -> Result<ToolResult> {
        let node = params.target.resolve(context.document)?;
        let class_list = context.document.class_list(node)?;

        let result = match params.action {
            ClassAction::Add => {
                class_list.add(&params.token)?;
                true
            }
            ClassAction::Remove => {
                class_list.remove(&params.token)?;
                false
            }
            ClassAction::Toggle => class_list.toggle(&params.token)?,
            ClassAction::Contains => class_list.contains(&params.token),
        };

        Ok(ToolResult::success_with(serde_json::json!({
            "node": node,
            "result": result,
            "class": class_list.value(),
        })))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StyleAction {
    Set,
    Remove,
    Get,
}

/// Parameters for the style tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StyleParams {
    /// Element whose inline style is used
    #[serde(flatten)]
    pub target: NodeTarget,

    /// Operation to apply
    pub action: StyleAction,

    /// CSS property name
    pub property: String,

    /// Value for `set`, optionally ending in `!important`
    #[serde(default)]
    pub value: Option<String>,
}

/// Tool for editing an element's inline style
#[derive(Default)]
pub struct StyleTool;

impl Tool for StyleTool {
    type Params = StyleParams;

    fn name(&self) -> &str {
        "style"
    }

    fn execute_typed(&self, params: StyleParams, context: &mut ToolContext) -> Result<ToolResult> {
        let node = params.target.resolve(context.document)?;
        let style = context.document.style(node)?;

        let value = match params.action {
            StyleAction::Set => {
                style.set_property(&params.property, params.value.as_deref().unwrap_or_default());
                style.get_property_value(&params.property)
            }
            StyleAction::Remove => style.remove_property(&params.property),
            StyleAction::Get => style.get_property_value(&params.property),
        };

        Ok(ToolResult::success_with(serde_json::json!({
            "node": node,
            "property": params.property,
            "value": value,
            "priority": style.get_property_priority(&params.property),
            "css_text": style.css_text(),
        })))
    }
}
