//! Call trigger message convention

use serde::{Deserialize, Serialize};

use crate::domain::view::Conversation;

/// Default command token that opens the call overlay
pub const DEFAULT_CALL_TRIGGER: &str = "!call";

/// Who sent the chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSender {
    pub name: String,
    pub avatar_url: String,
}

/// An inbound chat message that may carry the call convention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: CallSender,
    pub text: String,
    pub origin: Conversation,
}

/// Data handed to the primary overlay window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPayload {
    pub content: String,
    pub name: String,
    pub avatar_url: String,
}

/// Detects the leading command token in a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTrigger {
    token: String,
}

impl CallTrigger {
    /// Create a trigger for `token`. Surrounding whitespace is ignored.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into().trim().to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Return the message content after the token, or `None` when the
    /// trimmed message does not start with it.
    pub fn parse<'a>(&self, message: &'a str) -> Option<&'a str> {
        if self.token.is_empty() {
            return None;
        }
        message
            .trim()
            .strip_prefix(self.token.as_str())
            .map(str::trim)
    }

    /// Build the overlay payload when `message` carries the trigger
    pub fn payload_for(&self, message: &ChatMessage) -> Option<CallPayload> {
        self.parse(&message.text).map(|content| CallPayload {
            content: content.to_string(),
            name: message.sender.name.clone(),
            avatar_url: message.sender.avatar_url.clone(),
        })
    }
}

impl Default for CallTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_TRIGGER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::view::SourceId;

    #[test]
    fn leading_token_is_detected() {
        let trigger = CallTrigger::default();
        assert_eq!(trigger.parse("!call please join"), Some("please join"));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let trigger = CallTrigger::default();
        assert_eq!(trigger.parse("   !call   standup now  \n"), Some("standup now"));
    }

    #[test]
    fn bare_token_yields_empty_content() {
        let trigger = CallTrigger::default();
        assert_eq!(trigger.parse("!call"), Some(""));
    }

    #[test]
    fn token_elsewhere_is_ignored() {
        let trigger = CallTrigger::default();
        for message in ["", "   ", "hello !call", "call me", "x!call", "! call"] {
            assert_eq!(trigger.parse(message), None, "message {:?}", message);
        }
    }

    #[test]
    fn custom_token_with_multibyte_text() {
        let trigger = CallTrigger::new("!호출");
        assert_eq!(trigger.parse("!호출 회의실로"), Some("회의실로"));
        assert_eq!(trigger.parse("!call 회의실로"), None);
    }

    #[test]
    fn empty_token_never_triggers() {
        let trigger = CallTrigger::new("  ");
        assert_eq!(trigger.parse("anything"), None);
    }

    #[test]
    fn payload_carries_sender() {
        let message = ChatMessage {
            sender: CallSender {
                name: "Bob".to_string(),
                avatar_url: "https://chat.test/api/users/bob/image".to_string(),
            },
            text: "!call room 4".to_string(),
            origin: Conversation {
                source: SourceId(1),
                channel_id: "c1".to_string(),
                team_id: "t1".to_string(),
                url: "https://chat.test/t1/channels/c1".to_string(),
            },
        };
        let payload = CallTrigger::default().payload_for(&message).unwrap();
        assert_eq!(payload.content, "room 4");
        assert_eq!(payload.name, "Bob");
        assert_eq!(payload.avatar_url, "https://chat.test/api/users/bob/image");
    }
}
