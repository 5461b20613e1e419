// Tool implementations
//
// The three executors the chat model can call

// Network tools
pub mod read_page;
pub mod search;

// Command execution
pub mod run_command;

// Re-exports for convenience
pub use read_page::{extract_text, ReadPageArgs, ReadPageTool};
pub use run_command::{RunCommandArgs, RunCommandTool};
pub use search::{SearchArgs, SearchTool};
