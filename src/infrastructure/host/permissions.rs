//! Permission gate backed by a configured origin allow-list

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::application::ports::{Capability, PermissionGate};
use crate::domain::view::SourceId;

const ANY_ORIGIN: &str = "*";

/// Grants the notification capability to listed origins
pub struct OriginAllowList {
    notifications: Vec<String>,
}

impl OriginAllowList {
    pub fn new<I, S>(notifications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            notifications: notifications
                .into_iter()
                .map(|origin| origin_of(origin.as_ref()))
                .collect(),
        }
    }
}

#[async_trait]
impl PermissionGate for OriginAllowList {
    async fn is_granted(&self, source: SourceId, capability: Capability, origin: &str) -> bool {
        let granted = match capability {
            Capability::Notifications => {
                let origin = origin_of(origin);
                self.notifications
                    .iter()
                    .any(|allowed| allowed == ANY_ORIGIN || *allowed == origin)
            }
        };
        debug!(%source, %capability, %origin, granted, "Permission checked");
        granted
    }
}

/// Reduce a server URL to its `scheme://host[:port]` origin.
///
/// Anything that is not a hierarchical URL (such as `*`) compares as
/// written, ignoring case and a trailing slash.
fn origin_of(url: &str) -> String {
    let url = url.trim();
    match Url::parse(url).map(|parsed| parsed.origin()) {
        Ok(origin) if origin.is_tuple() => origin.ascii_serialization(),
        _ => url.trim_end_matches('/').to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listed_origin_is_granted() {
        let gate = OriginAllowList::new(["https://Chat.test/"]);
        assert!(
            gate.is_granted(SourceId(1), Capability::Notifications, "https://chat.test")
                .await
        );
        assert!(
            !gate
                .is_granted(SourceId(1), Capability::Notifications, "https://other.test")
                .await
        );
    }

    #[tokio::test]
    async fn server_under_a_subpath_matches_its_origin() {
        let gate = OriginAllowList::new(["https://chat.test"]);
        for server_url in [
            "https://chat.test/mm",
            "https://chat.test/mm/",
            "https://CHAT.test:443/team/channels/town-square",
        ] {
            assert!(
                gate.is_granted(SourceId(1), Capability::Notifications, server_url)
                    .await,
                "{server_url} should be granted"
            );
        }
        for server_url in [
            "http://chat.test/mm",
            "https://chat.test:8065",
            "https://chat.test.evil",
        ] {
            assert!(
                !gate
                    .is_granted(SourceId(1), Capability::Notifications, server_url)
                    .await,
                "{server_url} should be denied"
            );
        }
    }

    #[test]
    fn allow_list_entries_are_reduced_too() {
        assert_eq!(origin_of(" https://Chat.test/mm/ "), "https://chat.test");
        assert_eq!(origin_of("http://chat.test:8065/"), "http://chat.test:8065");
        assert_eq!(origin_of("*"), "*");
    }

    #[tokio::test]
    async fn wildcard_grants_everything() {
        let gate = OriginAllowList::new(["*"]);
        assert!(
            gate.is_granted(SourceId(3), Capability::Notifications, "https://any.test")
                .await
        );
    }

    #[tokio::test]
    async fn empty_list_denies() {
        let gate = OriginAllowList::new(Vec::<String>::new());
        assert!(
            !gate
                .is_granted(SourceId(1), Capability::Notifications, "https://chat.test")
                .await
        );
    }
}
