// Chatloop - Tool-calling chat service
// Library exports

pub mod config;
pub mod errors;
pub mod orchestrator;
pub mod providers;
pub mod server; // HTTP API
pub mod tools; // Tool execution system
