//! Active notification registry
//!
//! Holds every live notification record plus the "current" record for
//! each dedup slot. Every method takes the lock once, so callers never
//! observe a half-applied update.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::notification::{
    DedupKey, InvalidTransition, LifecycleEvent, LifecyclePolicy, NotificationId,
    NotificationRecord, NotificationState, Transition,
};

#[derive(Default)]
struct Entries {
    active: HashMap<NotificationId, NotificationRecord>,
    current: HashMap<DedupKey, NotificationId>,
}

/// Process-wide map of live notifications
#[derive(Default)]
pub struct ActiveNotificationRegistry {
    entries: Mutex<Entries>,
}

impl ActiveNotificationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Track a newly created record
    pub fn insert(&self, record: NotificationRecord) {
        self.lock().active.insert(record.id(), record);
    }

    /// Apply a lifecycle event to a tracked record.
    ///
    /// Returns `None` when the id is not tracked (already evicted or never
    /// inserted).
    pub fn apply(
        &self,
        id: NotificationId,
        event: LifecycleEvent,
        policy: LifecyclePolicy,
    ) -> Option<Result<Transition, InvalidTransition>> {
        self.lock()
            .active
            .get_mut(&id)
            .map(|record| record.apply(event, policy))
    }

    /// Remove a record from every map. Removing an absent id is a no-op.
    pub fn evict(&self, id: NotificationId) -> bool {
        let mut entries = self.lock();
        entries.current.retain(|_, current| *current != id);
        entries.active.remove(&id).is_some()
    }

    /// Record currently holding `key`, if any
    pub fn current(&self, key: &DedupKey) -> Option<NotificationId> {
        self.lock().current.get(key).copied()
    }

    /// Make `id` the current record for `key`, returning the one it replaced.
    ///
    /// Ignored when `id` is no longer tracked.
    pub fn set_current(&self, key: DedupKey, id: NotificationId) -> Option<NotificationId> {
        let mut entries = self.lock();
        if !entries.active.contains_key(&id) {
            return None;
        }
        entries.current.insert(key, id).filter(|previous| *previous != id)
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.lock().active.contains_key(&id)
    }

    pub fn state_of(&self, id: NotificationId) -> Option<NotificationState> {
        self.lock().active.get(&id).map(NotificationRecord::state)
    }

    pub fn len(&self) -> usize {
        self.lock().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::{ConversationKey, NotificationContent, NotificationVariant};

    const POLICY: LifecyclePolicy = LifecyclePolicy {
        dedup_mentions: true,
    };

    fn upgrade() -> NotificationRecord {
        NotificationRecord::new(
            NotificationContent::upgrade_available(),
            NotificationVariant::UpgradeAvailable {
                version: "5.0.0".to_string(),
            },
        )
    }

    #[test]
    fn insert_and_apply() {
        let registry = ActiveNotificationRegistry::new();
        let record = upgrade();
        let id = record.id();
        registry.insert(record);

        let transition = registry
            .apply(id, LifecycleEvent::Shown, POLICY)
            .unwrap()
            .unwrap();
        assert_eq!(transition.state, NotificationState::Shown);
        assert_eq!(registry.state_of(id), Some(NotificationState::Shown));
    }

    #[test]
    fn apply_to_unknown_id_is_none() {
        let registry = ActiveNotificationRegistry::new();
        assert!(registry
            .apply(NotificationId::new(), LifecycleEvent::Closed, POLICY)
            .is_none());
    }

    #[test]
    fn evict_is_idempotent() {
        let registry = ActiveNotificationRegistry::new();
        let record = upgrade();
        let id = record.id();
        registry.insert(record);

        assert!(registry.evict(id));
        assert!(!registry.evict(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn evict_clears_current_slot() {
        let registry = ActiveNotificationRegistry::new();
        let record = upgrade();
        let id = record.id();
        registry.insert(record);
        registry.set_current(DedupKey::UpgradeAvailable, id);

        registry.evict(id);
        assert_eq!(registry.current(&DedupKey::UpgradeAvailable), None);
    }

    #[test]
    fn set_current_returns_replaced_record() {
        let registry = ActiveNotificationRegistry::new();
        let key = DedupKey::Conversation(ConversationKey::new("t1", "c1"));
        let first = upgrade();
        let second = upgrade();
        let (a, b) = (first.id(), second.id());
        registry.insert(first);
        registry.insert(second);

        assert_eq!(registry.set_current(key.clone(), a), None);
        assert_eq!(registry.set_current(key.clone(), a), None);
        assert_eq!(registry.set_current(key.clone(), b), Some(a));
        assert_eq!(registry.current(&key), Some(b));
    }

    #[test]
    fn set_current_ignores_evicted_record() {
        let registry = ActiveNotificationRegistry::new();
        let record = upgrade();
        let id = record.id();
        registry.insert(record);
        registry.evict(id);

        registry.set_current(DedupKey::RestartToUpgrade, id);
        assert_eq!(registry.current(&DedupKey::RestartToUpgrade), None);
    }

    #[test]
    fn slots_are_independent() {
        let registry = ActiveNotificationRegistry::new();
        let a = upgrade();
        let b = upgrade();
        let (ida, idb) = (a.id(), b.id());
        registry.insert(a);
        registry.insert(b);
        registry.set_current(DedupKey::UpgradeAvailable, ida);
        registry.set_current(DedupKey::RestartToUpgrade, idb);

        registry.evict(ida);
        assert_eq!(registry.current(&DedupKey::RestartToUpgrade), Some(idb));
        assert_eq!(registry.len(), 1);
    }
}
