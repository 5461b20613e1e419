// RunCommand tool - executes allow-listed commands without a shell

use crate::tools::guard::{AuthorizedCommand, CommandGuard};
use crate::tools::registry::Tool;
use crate::tools::types::{parse_arguments, ToolError, ToolInputSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Output beyond this many bytes is cut off
const MAX_OUTPUT_BYTES: usize = 5_000;

#[derive(Debug, Clone, Deserialize)]
pub struct RunCommandArgs {
    pub command: String,
}

pub struct RunCommandTool {
    guard: CommandGuard,
    timeout: Duration,
}

impl RunCommandTool {
    pub fn new(guard: CommandGuard, timeout: Duration) -> Self {
        Self { guard, timeout }
    }

    pub fn guard(&self) -> &CommandGuard {
        &self.guard
    }

    /// Authorize and run `command`, returning stdout followed by stderr
    pub async fn run(&self, command: &str) -> Result<String, ToolError> {
        let authorized = self
            .guard
            .authorize(command)
            .map_err(|rejection| ToolError::Rejected(rejection.to_string()))?;

        tracing::info!(program = %authorized.program, args = ?authorized.args, "Running command");

        // A child process cannot change our directory, so `cd` only reports where it would go
        if authorized.program == "cd" {
            return change_directory(&authorized.args);
        }

        self.spawn(&authorized).await
    }

    async fn spawn(&self, authorized: &AuthorizedCommand) -> Result<String, ToolError> {
        let child = Command::new(&authorized.program)
            .args(&authorized.args)
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| ToolError::Timeout {
                tool: authorized.program.clone(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| ToolError::Process(format!("failed to execute {}: {}", authorized.program, e)))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = truncate_output(combined);

        if !output.status.success() {
            return Err(ToolError::Process(format!("{} - {}", output.status, combined.trim_end())));
        }

        Ok(combined)
    }
}

fn change_directory(args: &[String]) -> Result<String, ToolError> {
    let target = match args {
        [] => dirs::home_dir().ok_or_else(|| ToolError::Process("cd: HOME not set".to_string()))?,
        [dir] => PathBuf::from(dir),
        _ => return Err(ToolError::Process("cd: too many arguments".to_string())),
    };

    let resolved = target
        .canonicalize()
        .map_err(|e| ToolError::Process(format!("cd: {}: {}", target.display(), e)))?;

    if !resolved.is_dir() {
        return Err(ToolError::Process(format!("cd: not a directory: {}", target.display())));
    }

    Ok(format!("{}\n", resolved.display()))
}

fn truncate_output(mut output: String) -> String {
    if output.len() <= MAX_OUTPUT_BYTES {
        return output;
    }
    let mut cut = MAX_OUTPUT_BYTES;
    while !output.is_char_boundary(cut) {
        cut -= 1;
    }
    output.truncate(cut);
    output.push_str("\n\n[Output truncated]");
    output
}

#[async_trait]
impl Tool for RunCommandTool {
    fn name(&self) -> &str {
        "run_command"
    }

    fn description(&self) -> String {
        format!(
            "Run a shell command on the system. Only whitelisted commands are allowed: {}. Use this to list files or check directories.",
            self.guard.allowed_display()
        )
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::simple(vec![(
            "command",
            "The shell command to execute (e.g., 'ls -la', 'ls /tmp')",
        )])
    }

    async fn execute(&self, arguments: &str) -> Result<Value, ToolError> {
        let args: RunCommandArgs = parse_arguments(self.name(), arguments)?;
        let output = self.run(&args.command).await?;
        Ok(json!({ "command": args.command, "output": output }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> RunCommandTool {
        RunCommandTool::new(CommandGuard::default(), Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_ls_file() {
        let output = tool().run("ls Cargo.toml").await.unwrap();
        assert!(output.contains("Cargo.toml"));
    }

    #[tokio::test]
    async fn test_ls_nonexistent_reports_failure() {
        let err = tool().run("ls /nonexistent-chatloop-dir").await.unwrap_err();
        assert!(matches!(err, ToolError::Process(_)));
        assert!(err.to_string().starts_with("command failed:"));
    }

    #[tokio::test]
    async fn test_rejected_command_never_runs() {
        let err = tool().run("sudo rm -rf /").await.unwrap_err();
        assert!(matches!(err, ToolError::Rejected(_)));
        assert_eq!(err.to_string(), "command not allowed: sudo (allowed: ls, cd)");
    }

    #[tokio::test]
    async fn test_cd_resolves_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = tool()
            .run(&format!("cd {}", dir.path().display()))
            .await
            .unwrap();
        assert_eq!(
            output.trim_end(),
            dir.path().canonicalize().unwrap().display().to_string()
        );
    }

    #[tokio::test]
    async fn test_cd_missing_directory() {
        let err = tool().run("cd /nonexistent-chatloop-dir").await.unwrap_err();
        assert!(err.to_string().contains("cd:"));
    }

    #[tokio::test]
    async fn test_execute_wraps_output() {
        let result = tool().execute(r#"{"command": "ls Cargo.toml"}"#).await.unwrap();
        assert_eq!(result["command"], "ls Cargo.toml");
        assert!(result["output"].as_str().unwrap().contains("Cargo.toml"));
    }

    #[test]
    fn test_truncate_output() {
        let long = "é".repeat(MAX_OUTPUT_BYTES);
        let truncated = truncate_output(long);
        assert!(truncated.ends_with("[Output truncated]"));
        assert!(truncated.len() <= MAX_OUTPUT_BYTES + 20);
    }

    #[test]
    fn test_description_lists_allowed_commands() {
        assert!(tool().description().contains("ls, cd"));
    }
}
