//! Scripted document operations
//!
//! Every tool is a named operation with a typed, schema-described parameter struct.
//! [`ToolRegistry`] erases the parameter types so tools can be driven from JSON.

pub mod attributes;
pub mod document;
pub mod tree;

pub use attributes::{ClassListTool, SetAttributeTool, StyleTool};
pub use document::{CollectionsReport, CollectionsTool, SetTitleTool};
pub use tree::{AppendTool, RemoveTool};

use crate::dom::{Document, NodeId, Selector};
use crate::error::{DomError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State the tools operate on
pub struct ToolContext<'a> {
    pub document: &'a mut Document,
}

impl<'a> ToolContext<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self { document }
    }
}

/// Outcome of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn success_with(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Element addressed by a tool, either by arena position or by `id` attribute
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NodeTarget {
    /// Select by node handle
    Node {
        /// Node handle as reported by earlier tool results
        node: usize,
    },
    /// Select by id attribute
    Id {
        /// Value of the element's id attribute
        id: String,
    },
}

impl NodeTarget {
    /// Resolve to a node of `document`
    pub fn resolve(&self, document: &Document) -> Result<NodeId> {
        match self {
            Self::Node { node } => {
                let id = NodeId::new(*node);
                document.tree().get(id)?;
                Ok(id)
            }
            Self::Id { id } => document
                .query_selector_all(&Selector::attribute_equals("id", id.as_str()))
                .first()
                .copied()
                .ok_or_else(|| DomError::InvalidArguments(format!("No element with id '{}'", id))),
        }
    }
}

/// A named operation with typed parameters
pub trait Tool {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// Deserialize `params` and run the tool
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed = serde_json::from_value(params).map_err(|e| {
            DomError::InvalidArguments(format!("{}: {}", self.name(), e))
        })?;
        self.execute_typed(typed, context)
    }

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }
}

/// Object-safe view of a [`Tool`]
trait DynTool {
    fn name(&self) -> &str;

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;

    fn parameters_schema(&self) -> Value;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        Tool::execute(self, params, context)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }
}

/// Tools by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AppendTool);
        registry.register(RemoveTool);
        registry.register(SetAttributeTool);
        registry.register(ClassListTool);
        registry.register(StyleTool);
        registry.register(SetTitleTool);
        registry.register(CollectionsTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Parameter schema of `name`
    pub fn schema(&self, name: &str) -> Option<Value> {
        self.tools.get(name).map(|tool| tool.parameters_schema())
    }

    /// Run `name` with JSON parameters
    ///
    /// Unknown tools and undecodable parameters are reported as such; any other failure is
    /// wrapped in `ToolExecutionFailed`.
    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| DomError::UnknownTool(name.to_string()))?;

        log::debug!("Executing tool {}", name);
        tool.execute(params, context).map_err(|e| match e {
            DomError::InvalidArguments(_) => e,
            other => DomError::ToolExecutionFailed {
                tool: name.to_string(),
                reason: other.to_string(),
            },
        })
    }
}
