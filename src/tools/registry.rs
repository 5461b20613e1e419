// Tool registry and trait definition
//
// Manages available tools and provides uniform execution interface

use crate::tools::types::{ToolDefinition, ToolError, ToolInputSchema};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Tool trait - all tools must implement this
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as the model sees it (e.g., "search", "read_page")
    fn name(&self) -> &str;

    /// Description the model uses to decide when the tool applies
    fn description(&self) -> String;

    /// JSON Schema defining expected input parameters
    fn input_schema(&self) -> ToolInputSchema;

    /// Parse the raw argument string and run the tool
    async fn execute(&self, arguments: &str) -> Result<Value, ToolError>;

    /// Get full tool definition (for the completion API)
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

/// Registry of available tools, kept in registration order
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(index) => self.tools[index] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Get tool by name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// Check if tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// List all tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Get all tool definitions, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock tool for testing
    struct MockTool {
        name: String,
        reply: &'static str,
    }

    #[async_trait]
    impl Tool for MockTool {
        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> String {
            "A mock tool for testing".to_string()
        }

        fn input_schema(&self) -> ToolInputSchema {
            ToolInputSchema::simple(vec![("param", "A test parameter")])
        }

        async fn execute(&self, _arguments: &str) -> Result<Value, ToolError> {
            Ok(Value::String(self.reply.to_string()))
        }
    }

    fn mock(name: &str, reply: &'static str) -> Arc<dyn Tool> {
        Arc::new(MockTool {
            name: name.to_string(),
            reply,
        })
    }

    #[test]
    fn test_registry_registration() {
        let mut registry = ToolRegistry::new();
        registry.register(mock("test", "ok"));

        assert!(registry.has_tool("test"));
        assert!(!registry.has_tool("nonexistent"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_keeps_order() {
        let mut registry = ToolRegistry::new();
        registry.register(mock("search", "a"));
        registry.register(mock("read_page", "b"));
        registry.register(mock("run_command", "c"));

        assert_eq!(registry.tool_names(), vec!["search", "read_page", "run_command"]);
        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["search", "read_page", "run_command"]);
    }

    #[tokio::test]
    async fn test_register_replaces_same_name() {
        let mut registry = ToolRegistry::new();
        registry.register(mock("test", "first"));
        registry.register(mock("test", "second"));

        assert_eq!(registry.len(), 1);
        let result = registry.get("test").unwrap().execute("{}").await.unwrap();
        assert_eq!(result, Value::String("second".to_string()));
    }
}
