// Tool dispatcher
//
// Maps a tool name to its executor and turns every outcome, including
// unknown names and malformed arguments, into a ToolResult the conversation
// loop can append.

use crate::config::Config;
use crate::tools::guard::CommandGuard;
use crate::tools::implementations::{ReadPageTool, RunCommandTool, SearchTool};
use crate::tools::registry::ToolRegistry;
use crate::tools::types::{ToolDefinition, ToolError, ToolResult};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The three built-in executors, shared by the dispatcher and the direct endpoints
#[derive(Clone)]
pub struct StandardTools {
    pub search: Arc<SearchTool>,
    pub read_page: Arc<ReadPageTool>,
    pub run_command: Arc<RunCommandTool>,
}

impl StandardTools {
    pub fn from_config(config: &Config) -> Result<Self, ToolError> {
        let timeout = config.tool_timeout();

        Ok(Self {
            search: Arc::new(SearchTool::new(
                config.api_key.clone(),
                config.search_url.clone(),
                timeout,
            )?),
            read_page: Arc::new(ReadPageTool::new(timeout)?),
            run_command: Arc::new(RunCommandTool::new(
                CommandGuard::new(config.allowed_commands.iter().cloned()),
                timeout,
            )),
        })
    }

    /// Registry in presentation order: search, read_page, run_command
    pub fn registry(&self) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(self.search.clone());
        registry.register(self.read_page.clone());
        registry.register(self.run_command.clone());
        registry
    }
}

/// Routes tool calls to executors; never fails
pub struct ToolDispatcher {
    registry: ToolRegistry,
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Run the named tool with its raw argument string
    #[instrument(skip(self, arguments), fields(tool = %name))]
    pub async fn dispatch(&self, name: &str, arguments: &str) -> ToolResult {
        let Some(tool) = self.registry.get(name) else {
            warn!("Unknown tool requested");
            return ToolError::UnknownTool(name.to_string()).into();
        };

        debug!(arguments, "Executing tool");

        match tool.execute(arguments).await {
            Ok(value) => {
                info!("Tool executed successfully");
                ToolResult::Success(value)
            }
            Err(e) => {
                warn!(error = %e, "Tool execution failed");
                e.into()
            }
        }
    }

    /// Schemas for every registered tool, presented on every round
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}
