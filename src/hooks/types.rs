use serde::{Deserialize, Serialize};

/// Host lifecycle events a handler can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookEvent {
    SessionStart,
    UserPromptSubmit,
    PostToolUse,
    PreCompact,
    Stop,
}

impl HookEvent {
    /// Parse an event name (case-insensitive; PascalCase, kebab-case or
    /// snake_case).
    pub fn from_arg(s: &str) -> Option<HookEvent> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "sessionstart" => Some(HookEvent::SessionStart),
            "userpromptsubmit" => Some(HookEvent::UserPromptSubmit),
            "posttooluse" => Some(HookEvent::PostToolUse),
            "precompact" => Some(HookEvent::PreCompact),
            "stop" => Some(HookEvent::Stop),
            _ => None,
        }
    }

    /// Name as the host spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionStart => "SessionStart",
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::PostToolUse => "PostToolUse",
            Self::PreCompact => "PreCompact",
            Self::Stop => "Stop",
        }
    }
}

/// Tools whose use means a file on disk changed.
pub const FILE_WRITE_TOOLS: &[&str] = &["Write", "Edit", "MultiEdit"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub file_path: Option<String>,
}

/// JSON payload the host writes to stdin. Unknown fields are ignored, and
/// every field is optional since each event carries a different subset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub hook_event_name: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub transcript_path: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<ToolInput>,
    /// Why a session started: `startup`, `resume`, `clear` or `compact`
    #[serde(default)]
    pub source: Option<String>,
}

impl HookInput {
    pub fn event(&self) -> Option<HookEvent> {
        self.hook_event_name.as_deref().and_then(HookEvent::from_arg)
    }

    pub fn is_event(&self, event: HookEvent) -> bool {
        self.event() == Some(event)
    }

    /// Whether the triggering tool writes files.
    pub fn is_file_write(&self) -> bool {
        self.tool_name
            .as_deref()
            .is_some_and(|name| FILE_WRITE_TOOLS.contains(&name))
    }

    /// `tool_input.file_path`, when present and non-empty.
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input
            .as_ref()
            .and_then(|input| input.file_path.as_deref())
            .filter(|path| !path.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: HookEvent,
    pub additional_context: String,
}

/// Structured response written to stdout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

impl HookResponse {
    /// Inject text into the assistant's context.
    pub fn additional_context(event: HookEvent, context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: event,
                additional_context: context.into(),
            }),
            ..Self::default()
        }
    }

    /// Ask the host to stop and surface `reason` to the assistant.
    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            decision: Some(Decision::Block),
            reason: Some(reason.into()),
            hook_specific_output: None,
        }
    }

    pub fn with_additional_context(mut self, event: HookEvent, context: impl Into<String>) -> Self {
        self.hook_specific_output = Some(HookSpecificOutput {
            hook_event_name: event,
            additional_context: context.into(),
        });
        self
    }
}

/// Result returned by a hook handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutput {
    /// Text to write to stdout (may be empty)
    pub stdout: String,
    pub exit_code: i32,
}

impl HookOutput {
    /// A plain status line.
    pub fn ok(stdout: String) -> Self {
        Self {
            stdout,
            exit_code: 0,
        }
    }

    /// A JSON response on a single line.
    pub fn json(response: &HookResponse) -> Result<Self, serde_json::Error> {
        Ok(Self::ok(serde_json::to_string(response)?))
    }

    pub fn empty() -> Self {
        Self::ok(String::new())
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            stdout: String::new(),
            exit_code,
        }
    }
}
