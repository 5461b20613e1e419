// Tool execution system
//
// Executors the chat model can call (search, read_page, run_command), the
// allow-list guard in front of command execution, and the dispatcher that
// routes model tool calls to them.

pub mod dispatcher;
pub mod guard;
pub mod implementations;
pub mod registry;
pub mod types;

pub use dispatcher::{StandardTools, ToolDispatcher};
pub use guard::{CommandGuard, GuardRejection};
pub use registry::{Tool, ToolRegistry};
pub use types::{ToolDefinition, ToolError, ToolInputSchema, ToolResult};
