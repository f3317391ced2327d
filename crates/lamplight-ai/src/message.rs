//! Role-tagged chat messages.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::transcript::TranscriptError;
use crate::ToolCall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TranscriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "tool" => Ok(Role::Tool),
            _ => Err(TranscriptError::InvalidRole(s.to_string())),
        }
    }
}

/// Where an attached image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ImageRef {
    /// Local file, read and encoded when the request is built.
    Path(PathBuf),
    /// Already base64-encoded image bytes.
    Base64(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ContentPart {
    Text(String),
    Image(ImageRef),
}

impl ContentPart {
    fn is_empty(&self) -> bool {
        match self {
            ContentPart::Text(text) => text.trim().is_empty(),
            ContentPart::Image(ImageRef::Base64(data)) => data.is_empty(),
            ContentPart::Image(ImageRef::Path(path)) => path.as_os_str().is_empty(),
        }
    }
}

/// One entry of a conversation.
///
/// `tool_calls` is only set on assistant messages that request tool use;
/// `tool_name` only on tool-result messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub content: Vec<ContentPart>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            author_name: None,
            content: vec![ContentPart::Text(text.into())],
            tool_calls: Vec::new(),
            tool_name: None,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Result of running `tool_name`, fed back to the model.
    pub fn tool_result(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            ..Self::new(Role::Tool, output)
        }
    }

    /// Assistant turn that asks for tools to be run.
    pub fn tool_request(text: impl Into<String>, calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls: calls,
            ..Self::new(Role::Assistant, text)
        }
    }

    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.content.push(ContentPart::Image(image));
        self
    }

    /// All text parts joined with newlines.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text.as_str()),
                ContentPart::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageRef> {
        self.content.iter().filter_map(|part| match part {
            ContentPart::Image(image) => Some(image),
            ContentPart::Text(_) => None,
        })
    }

    /// A message is storable when at least one content part carries data.
    pub fn has_content(&self) -> bool {
        self.content.iter().any(|part| !part.is_empty())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())?;
        let images = self.images().count();
        if images > 0 {
            write!(f, " [{images} image(s)]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_known_names() {
        assert_eq!("system".parse::<Role>().unwrap(), Role::System);
        assert_eq!("User".parse::<Role>().unwrap(), Role::User);
        assert_eq!(" assistant ".parse::<Role>().unwrap(), Role::Assistant);
        assert_eq!("tool".parse::<Role>().unwrap(), Role::Tool);
    }

    #[test]
    fn role_rejects_unknown_names() {
        let err = "moderator".parse::<Role>().unwrap_err();
        assert_eq!(err, TranscriptError::InvalidRole("moderator".into()));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn text_joins_text_parts_only() {
        let msg = Message::user("What is in this picture?")
            .with_image(ImageRef::Base64("aGVsbG8=".into()));
        assert_eq!(msg.text(), "What is in this picture?");
        assert_eq!(msg.images().count(), 1);
        assert_eq!(msg.to_string(), "What is in this picture? [1 image(s)]");
    }

    #[test]
    fn blank_text_has_no_content() {
        assert!(!Message::user("").has_content());
        assert!(!Message::user("  \n").has_content());
        assert!(Message::user("hi").has_content());
    }

    #[test]
    fn image_alone_counts_as_content() {
        let msg = Message {
            content: vec![ContentPart::Image(ImageRef::Path("cat.png".into()))],
            ..Message::user("")
        };
        assert!(msg.has_content());
    }

    #[test]
    fn tool_result_carries_tool_name() {
        let msg = Message::tool_result("change_state", r#"{"id":1}"#);
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_name.as_deref(), Some("change_state"));
    }

    #[test]
    fn author_name_is_kept() {
        let msg = Message::assistant("We have pizza").with_author("Restaurant Assistant");
        assert_eq!(msg.author_name.as_deref(), Some("Restaurant Assistant"));
    }
}
