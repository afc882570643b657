/// Settings of a shell session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Prompt text; a single space is appended when it is applied.
    pub prompt: String,
    /// Echo every input line after the prompt (useful when replaying scripts).
    pub echo: bool,
}

/// Prompt used until one is configured; a single space is appended when applied.
pub const DEFAULT_PROMPT: &str = "%";

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            echo: false,
        }
    }
}

impl ShellConfig {
    pub fn with_prompt(mut self, prompt: Option<String>) -> Self {
        if let Some(prompt) = prompt {
            self.prompt = prompt;
        }
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}
