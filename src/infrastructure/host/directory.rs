//! In-memory view and display directories fed by host events

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::application::ports::{DisplayProvider, ViewResolver};
use crate::domain::call::{Display, Rect};
use crate::domain::view::{SourceId, ViewInfo};

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Server views currently registered by the host
#[derive(Default)]
pub struct ViewDirectory {
    views: RwLock<HashMap<SourceId, ViewInfo>>,
}

impl ViewDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, source: SourceId, view: ViewInfo) {
        write(&self.views).insert(source, view);
    }

    pub fn remove(&self, source: SourceId) -> bool {
        write(&self.views).remove(&source).is_some()
    }
}

impl ViewResolver for ViewDirectory {
    fn resolve(&self, source: SourceId) -> Option<ViewInfo> {
        read(&self.views).get(&source).cloned()
    }
}

#[derive(Default)]
struct Screens {
    displays: Vec<Display>,
    main_window: Option<Rect>,
}

/// Last display layout reported by the host
#[derive(Default)]
pub struct DisplayDirectory {
    screens: RwLock<Screens>,
}

impl DisplayDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_displays(&self, displays: Vec<Display>) {
        write(&self.screens).displays = displays;
    }

    pub fn set_main_window(&self, bounds: Option<Rect>) {
        write(&self.screens).main_window = bounds;
    }
}

impl DisplayProvider for DisplayDirectory {
    fn displays(&self) -> Vec<Display> {
        read(&self.screens).displays.clone()
    }

    fn main_window_bounds(&self) -> Option<Rect> {
        read(&self.screens).main_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::view::ViewId;

    fn view(name: &str) -> ViewInfo {
        ViewInfo {
            view_id: ViewId::new(name),
            server_name: name.to_string(),
            server_url: format!("https://{}.test", name),
            notifications_enabled: true,
        }
    }

    #[test]
    fn views_register_resolve_and_remove() {
        let directory = ViewDirectory::new();
        directory.register(SourceId(1), view("alpha"));

        assert_eq!(directory.resolve(SourceId(1)).unwrap().server_name, "alpha");
        assert!(directory.resolve(SourceId(2)).is_none());
        assert!(directory.remove(SourceId(1)));
        assert!(!directory.remove(SourceId(1)));
        assert!(directory.resolve(SourceId(1)).is_none());
    }

    #[test]
    fn displays_are_replaced_wholesale() {
        let directory = DisplayDirectory::new();
        let screen = Display {
            id: 7,
            bounds: Rect::new(0, 0, 800, 600),
            work_area: Rect::new(0, 0, 800, 560),
            is_primary: true,
        };
        directory.set_displays(vec![screen, screen]);
        directory.set_displays(vec![screen]);
        directory.set_main_window(Some(Rect::new(10, 10, 300, 200)));

        assert_eq!(directory.displays(), vec![screen]);
        assert_eq!(directory.main_window_bounds(), Some(Rect::new(10, 10, 300, 200)));
    }
}
