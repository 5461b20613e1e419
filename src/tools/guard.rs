// Command execution guard
//
// Allow-list check that runs before any process is spawned. The base command
// (first whitespace-separated token) must be on the list, and no token may
// carry a shell metacharacter. Commands are never handed to a shell.

use thiserror::Error;

/// Base commands permitted when no list is configured
pub const DEFAULT_ALLOWED_COMMANDS: &[&str] = &["ls", "cd"];

/// Characters that would let a command escape its argument vector under a shell
const SHELL_METACHARACTERS: &[char] = &[
    ';', '&', '|', '$', '`', '<', '>', '(', ')', '{', '}', '!', '\\', '\n', '\r', '\0',
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardRejection {
    #[error("empty command (allowed: {allowed})")]
    Empty { allowed: String },

    #[error("command not allowed: {command} (allowed: {allowed})")]
    NotAllowed { command: String, allowed: String },

    #[error("shell metacharacter '{character}' not allowed in commands")]
    ShellMetacharacter { character: String },
}

/// A command that passed the guard, split into program and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Allow-list guard, immutable once built
#[derive(Debug, Clone)]
pub struct CommandGuard {
    allowed: Vec<String>,
}

impl CommandGuard {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Human-readable allowed set, e.g. "ls, cd"
    pub fn allowed_display(&self) -> String {
        self.allowed.join(", ")
    }

    /// Check a raw command string against the allow-list
    pub fn authorize(&self, command: &str) -> Result<AuthorizedCommand, GuardRejection> {
        let mut parts = command.split_whitespace();

        let Some(base) = parts.next() else {
            return Err(GuardRejection::Empty {
                allowed: self.allowed_display(),
            });
        };

        if !self.allowed.iter().any(|a| a == base) {
            return Err(GuardRejection::NotAllowed {
                command: base.to_string(),
                allowed: self.allowed_display(),
            });
        }

        let args: Vec<String> = parts.map(str::to_string).collect();
        for token in &args {
            if let Some(c) = token.chars().find(|c| SHELL_METACHARACTERS.contains(c)) {
                let character = match c {
                    '\n' => "\\n".to_string(),
                    '\r' => "\\r".to_string(),
                    '\0' => "\\0".to_string(),
                    other => other.to_string(),
                };
                return Err(GuardRejection::ShellMetacharacter { character });
            }
        }

        Ok(AuthorizedCommand {
            program: base.to_string(),
            args,
        })
    }
}

impl Default for CommandGuard {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_COMMANDS.iter().copied())
    }
}
