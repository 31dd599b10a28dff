// MCP tool registry: registration, argument validation and dispatch

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::Result;
use jsonschema::JSONSchema;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with arguments that already passed schema validation
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),
    #[error("Invalid schema for {tool}: {message}")]
    Schema { tool: String, message: String },
}

/// Failures that never reach a handler; surfaced as protocol errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for tool {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}

struct RegisteredTool {
    tool: Arc<dyn Tool>,
    schema: ToolSchema,
    validator: JSONSchema,
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, compiling its input schema up front
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let schema = tool.schema();
        if self.tools.contains_key(&schema.name) {
            return Err(RegistryError::DuplicateName(schema.name));
        }

        let validator = JSONSchema::options()
            .compile(&schema.input_schema)
            .map_err(|e| RegistryError::Schema {
                tool: schema.name.clone(),
                message: e.to_string(),
            })?;

        self.tools.insert(
            schema.name.clone(),
            RegisteredTool {
                tool,
                schema,
                validator,
            },
        );
        Ok(())
    }

    /// List all tool schemas, sorted by name
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|t| t.schema.clone()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate arguments and run the named tool.
    ///
    /// Unknown tools and schema violations are returned as [`DispatchError`]
    /// without invoking the handler. Handler failures become an `isError`
    /// result.
    pub async fn call(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, DispatchError> {
        let registered = self
            .tools
            .get(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        // Hosts may omit `arguments` for tools without required fields
        let arguments = if arguments.is_null() {
            serde_json::json!({})
        } else {
            arguments
        };

        if let Err(errors) = registered.validator.validate(&arguments) {
            let message = errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{}: {}", path, e)
                    }
                })
                .collect::<Vec<_>>()
                .join("; ");
            debug!(tool = name, %message, "Rejected tool arguments");
            return Err(DispatchError::InvalidArguments {
                tool: name.to_string(),
                message,
            });
        }

        match registered.tool.execute(arguments).await {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!(tool = name, error = %e, "Tool call failed");
                Ok(CallToolResult::error(format!("{:#}", e)))
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_enum(values: &[&str], description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}

pub fn json_schema_integer(description: &str, minimum: i64, maximum: i64, default: i64) -> serde_json::Value {
    serde_json::json!({
        "type": "integer",
        "minimum": minimum,
        "maximum": maximum,
        "default": default,
        "description": description
    })
}
