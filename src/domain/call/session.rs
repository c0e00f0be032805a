//! Call overlay session state machine

use std::fmt;

use thiserror::Error;

use super::trigger::CallPayload;
use super::window::{WindowId, WindowRole};
use crate::domain::view::{Conversation, NavigationMessage, SourceId};

/// Overlay session states
///
/// ```text
/// Loading -> Visible -> Dismissed
/// Loading -> Dismissed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Loading,
    Visible,
    Dismissed,
}

impl OverlayState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Visible => "visible",
            Self::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for OverlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when the session cannot take the requested step
#[derive(Debug, Clone, Error)]
#[error("Invalid overlay transition: cannot {action} while {current_state}")]
pub struct InvalidOverlayTransition {
    pub current_state: OverlayState,
    pub action: &'static str,
}

/// What to do once the primary window finished loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowPlan {
    pub primary: WindowId,
    pub payload: CallPayload,
    /// Shown after the primary, in creation order
    pub secondaries: Vec<WindowId>,
}

/// What to do once the primary window is gone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DismissPlan {
    pub close: Vec<WindowId>,
    pub target: SourceId,
    pub navigation: NavigationMessage,
}

/// One primary window plus its secondaries, created for a single trigger
#[derive(Debug, Clone)]
pub struct OverlaySession {
    primary: WindowId,
    secondaries: Vec<WindowId>,
    payload: CallPayload,
    origin: Conversation,
    state: OverlayState,
}

impl OverlaySession {
    pub fn new(
        primary: WindowId,
        secondaries: Vec<WindowId>,
        payload: CallPayload,
        origin: Conversation,
    ) -> Self {
        Self {
            primary,
            secondaries,
            payload,
            origin,
            state: OverlayState::Loading,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn primary(&self) -> WindowId {
        self.primary
    }

    /// Role of `window` in this session, if it belongs to it
    pub fn role_of(&self, window: WindowId) -> Option<WindowRole> {
        if window == self.primary {
            Some(WindowRole::Primary)
        } else if self.secondaries.contains(&window) {
            Some(WindowRole::Secondary)
        } else {
            None
        }
    }

    /// Transition from LOADING to VISIBLE
    pub fn primary_loaded(&mut self) -> Result<ShowPlan, InvalidOverlayTransition> {
        if self.state != OverlayState::Loading {
            return Err(InvalidOverlayTransition {
                current_state: self.state,
                action: "show",
            });
        }
        self.state = OverlayState::Visible;
        Ok(ShowPlan {
            primary: self.primary,
            payload: self.payload.clone(),
            secondaries: self.secondaries.clone(),
        })
    }

    /// A secondary window went away on its own
    pub fn secondary_closed(&mut self, window: WindowId) -> bool {
        let before = self.secondaries.len();
        self.secondaries.retain(|w| *w != window);
        self.secondaries.len() != before
    }

    /// Transition to DISMISSED, from either LOADING or VISIBLE
    pub fn dismiss(&mut self) -> Result<DismissPlan, InvalidOverlayTransition> {
        if self.state == OverlayState::Dismissed {
            return Err(InvalidOverlayTransition {
                current_state: self.state,
                action: "dismiss",
            });
        }
        self.state = OverlayState::Dismissed;
        Ok(DismissPlan {
            close: std::mem::take(&mut self.secondaries),
            target: self.origin.source,
            navigation: self.origin.navigation(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> OverlaySession {
        OverlaySession::new(
            WindowId(1),
            vec![WindowId(2), WindowId(3)],
            CallPayload {
                content: "room 4".to_string(),
                name: "Bob".to_string(),
                avatar_url: "https://chat.test/bob.png".to_string(),
            },
            Conversation {
                source: SourceId(9),
                channel_id: "c1".to_string(),
                team_id: "t1".to_string(),
                url: "https://chat.test/t1/channels/c1".to_string(),
            },
        )
    }

    #[test]
    fn new_session_is_loading() {
        assert_eq!(session().state(), OverlayState::Loading);
    }

    #[test]
    fn roles() {
        let s = session();
        assert_eq!(s.role_of(WindowId(1)), Some(WindowRole::Primary));
        assert_eq!(s.role_of(WindowId(3)), Some(WindowRole::Secondary));
        assert_eq!(s.role_of(WindowId(99)), None);
    }

    #[test]
    fn loaded_shows_primary_then_secondaries() {
        let mut s = session();
        let plan = s.primary_loaded().unwrap();
        assert_eq!(plan.primary, WindowId(1));
        assert_eq!(plan.secondaries, vec![WindowId(2), WindowId(3)]);
        assert_eq!(plan.payload.content, "room 4");
        assert_eq!(s.state(), OverlayState::Visible);
    }

    #[test]
    fn loaded_twice_fails() {
        let mut s = session();
        s.primary_loaded().unwrap();
        let err = s.primary_loaded().unwrap_err();
        assert_eq!(err.current_state, OverlayState::Visible);
    }

    #[test]
    fn dismiss_while_loading_is_allowed() {
        let mut s = session();
        let plan = s.dismiss().unwrap();
        assert_eq!(plan.close, vec![WindowId(2), WindowId(3)]);
        assert_eq!(plan.target, SourceId(9));
        assert_eq!(plan.navigation.channel_id, "c1");
        assert_eq!(plan.navigation.team_id, "t1");
        assert_eq!(s.state(), OverlayState::Dismissed);
    }

    #[test]
    fn dismiss_once() {
        let mut s = session();
        s.primary_loaded().unwrap();
        s.dismiss().unwrap();
        assert!(s.dismiss().is_err());
        assert!(s.primary_loaded().is_err());
    }

    #[test]
    fn closed_secondary_is_not_closed_again() {
        let mut s = session();
        assert!(s.secondary_closed(WindowId(2)));
        assert!(!s.secondary_closed(WindowId(2)));
        assert_eq!(s.dismiss().unwrap().close, vec![WindowId(3)]);
    }

    #[test]
    fn error_display() {
        let mut s = session();
        s.dismiss().unwrap();
        let msg = s.dismiss().unwrap_err().to_string();
        assert!(msg.contains("dismiss"));
        assert!(msg.contains("dismissed"));
    }
}
