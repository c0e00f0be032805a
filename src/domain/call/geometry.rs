//! Display geometry and overlay layout across connected monitors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ParseSettingError;

/// Rectangle in virtual desktop coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Area shared with `other`, zero when they do not intersect
    pub fn overlap_area(&self, other: &Rect) -> i64 {
        let w = self.right().min(other.right()) - (self.x as i64).max(other.x as i64);
        let h = self.bottom().min(other.bottom()) - (self.y as i64).max(other.y as i64);
        if w > 0 && h > 0 {
            w * h
        } else {
            0
        }
    }

    /// Squared distance between the centers of two rectangles
    pub fn center_distance_sq(&self, other: &Rect) -> i64 {
        let dx =
            (self.x as i64 * 2 + self.width as i64) - (other.x as i64 * 2 + other.width as i64);
        let dy =
            (self.y as i64 * 2 + self.height as i64) - (other.y as i64 * 2 + other.height as i64);
        dx * dx + dy * dy
    }
}

/// A connected display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    pub id: u32,
    pub bounds: Rect,
    /// Bounds minus taskbars, docks and menu bars
    pub work_area: Rect,
    #[serde(default)]
    pub is_primary: bool,
}

/// How the display hosting the primary overlay is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The OS primary display
    PrimaryDisplay,
    /// The display the main application window is on
    NearestMainWindow,
}

/// Whether secondary overlays cover the other displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FanOut {
    #[default]
    AllDisplays,
    PrimaryOnly,
}

impl FanOut {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AllDisplays => "all-displays",
            Self::PrimaryOnly => "primary-only",
        }
    }
}

impl fmt::Display for FanOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FanOut {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all-displays" | "all" => Ok(Self::AllDisplays),
            "primary-only" | "primary" => Ok(Self::PrimaryOnly),
            _ => Err(ParseSettingError::new(
                "fan-out",
                s,
                "all-displays, primary-only",
            )),
        }
    }
}

/// Where each overlay window goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLayout {
    pub primary_display: u32,
    pub primary: Rect,
    /// One entry per other display, in enumeration order
    pub secondaries: Vec<(u32, Rect)>,
}

impl OverlayLayout {
    /// Compute the layout, or `None` when no display is connected.
    pub fn compute(
        displays: &[Display],
        placement: Placement,
        main_window: Option<Rect>,
        fan_out: FanOut,
    ) -> Option<Self> {
        let host = match (placement, main_window) {
            (Placement::NearestMainWindow, Some(window)) => nearest_display(displays, &window),
            _ => primary_display(displays),
        }?;

        // Sized to the work area but anchored at the display origin.
        let primary = Rect::new(
            host.bounds.x,
            host.bounds.y,
            host.work_area.width,
            host.work_area.height,
        );

        let secondaries = match fan_out {
            FanOut::AllDisplays => displays
                .iter()
                .filter(|d| d.id != host.id)
                .map(|d| (d.id, d.bounds))
                .collect(),
            FanOut::PrimaryOnly => Vec::new(),
        };

        Some(Self {
            primary_display: host.id,
            primary,
            secondaries,
        })
    }
}

fn primary_display(displays: &[Display]) -> Option<&Display> {
    displays
        .iter()
        .find(|d| d.is_primary)
        .or_else(|| displays.first())
}

/// Display with the largest overlap, falling back to the closest center
fn nearest_display<'a>(displays: &'a [Display], window: &Rect) -> Option<&'a Display> {
    let best_overlap = displays
        .iter()
        .map(|d| (d, d.bounds.overlap_area(window)))
        .filter(|(_, area)| *area > 0)
        .max_by_key(|(_, area)| *area)
        .map(|(d, _)| d);

    best_overlap.or_else(|| {
        displays
            .iter()
            .min_by_key(|d| d.bounds.center_distance_sq(window))
    })
}
