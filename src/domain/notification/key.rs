//! Keys for the "current notification" slots

use std::fmt;

/// `teamId:channelId` key collapsing repeated mentions of one conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey(String);

impl ConversationKey {
    pub fn new(team_id: &str, channel_id: &str) -> Self {
        Self(format!("{}:{}", team_id, channel_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A slot that holds at most one outstanding notification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupKey {
    /// Latest mention for a conversation
    Conversation(ConversationKey),
    /// Outstanding "new version available" notification
    UpgradeAvailable,
    /// Outstanding "restart to upgrade" notification
    RestartToUpgrade,
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conversation(key) => write!(f, "conversation {}", key),
            Self::UpgradeAvailable => f.write_str("upgrade-available slot"),
            Self::RestartToUpgrade => f.write_str("restart-to-upgrade slot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_key_is_team_then_channel() {
        assert_eq!(ConversationKey::new("t1", "c1").as_str(), "t1:c1");
    }

    #[test]
    fn slots_are_distinct() {
        assert_ne!(DedupKey::UpgradeAvailable, DedupKey::RestartToUpgrade);
        assert_ne!(
            DedupKey::Conversation(ConversationKey::new("t1", "c1")),
            DedupKey::Conversation(ConversationKey::new("t1", "c2"))
        );
    }
}
