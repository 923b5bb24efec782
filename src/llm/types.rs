// Model API request/response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

// Re-export tool types for convenience
pub use crate::tools::types::{ToolDefinition, ToolUse};

/// Message content - a plain string or structured blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: MessageContent,
}

impl Message {
    pub fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(text.to_string()),
        }
    }

    pub fn with_content(role: &str, blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: role.to_string(),
            content: MessageContent::Blocks(blocks),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

impl MessageRequest {
    /// A single-user-message request with no system prompt or tools
    pub fn new(model: &str, max_tokens: u32, user_text: &str) -> Self {
        Self {
            model: model.to_string(),
            max_tokens,
            messages: vec![Message::user(user_text)],
            system: None,
            tools: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub response_type: String,
    pub role: String,
    pub content: Vec<ContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
}

/// Content block - supports text, tool_use, and tool_result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },

    #[serde(rename = "tool_result")]
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn tool_result(tool_use_id: String, content: String, is_error: Option<bool>) -> Self {
        ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_tool_use(&self) -> bool {
        matches!(self, ContentBlock::ToolUse { .. })
    }
}

impl MessageResponse {
    /// Concatenated text of every text block
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| block.as_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_tool_uses(&self) -> bool {
        self.content.iter().any(|block| block.is_tool_use())
    }

    /// Extract tool uses from the response
    pub fn tool_uses(&self) -> Vec<ToolUse> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolUse {
                    id: id.clone(),
                    name: name.clone(),
                    input: input.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Re-wrap this response as an assistant message for the next turn
    pub fn to_message(&self) -> Message {
        Message::with_content("assistant", self.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(content: Vec<ContentBlock>) -> MessageResponse {
        MessageResponse {
            id: "msg_1".to_string(),
            response_type: "message".to_string(),
            role: "assistant".to_string(),
            content,
            model: "test-model".to_string(),
            stop_reason: Some("end_turn".to_string()),
        }
    }

    #[test]
    fn test_text_joins_text_blocks() {
        let response = response_with(vec![
            ContentBlock::text("first"),
            ContentBlock::ToolUse {
                id: "toolu_1".to_string(),
                name: "read_file".to_string(),
                input: serde_json::json!({"path": "app.py"}),
            },
            ContentBlock::text("second"),
        ]);
        assert_eq!(response.text(), "first\nsecond");
    }

    #[test]
    fn test_tool_uses_extraction() {
        let response = response_with(vec![ContentBlock::ToolUse {
            id: "toolu_1".to_string(),
            name: "write_file".to_string(),
            input: serde_json::json!({"path": "app.py", "content": "x"}),
        }]);
        assert!(response.has_tool_uses());
        let uses = response.tool_uses();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].name, "write_file");
        assert_eq!(uses[0].input["path"], "app.py");
    }

    #[test]
    fn test_request_skips_absent_tools_and_system() {
        let request = MessageRequest::new("test-model", 1024, "hello");
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("tools"));
        assert!(!json.contains("system"));
        assert!(json.contains("\"content\":\"hello\""));
    }

    #[test]
    fn test_message_content_untagged_serialization() {
        let blocks = Message::with_content(
            "user",
            vec![ContentBlock::tool_result(
                "toolu_1".to_string(),
                "ok".to_string(),
                None,
            )],
        );
        let json = serde_json::to_string(&blocks).unwrap();
        assert!(json.contains("\"type\":\"tool_result\""));
        assert!(!json.contains("is_error"));
    }

    #[test]
    fn test_response_deserializes_from_wire_shape() {
        let json = r#"{
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "{\"name\": \"app\"}"}],
            "model": "test-model",
            "stop_reason": "end_turn"
        }"#;
        let response: MessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "{\"name\": \"app\"}");
        assert!(!response.has_tool_uses());
    }
}
