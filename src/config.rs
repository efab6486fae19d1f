use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::monitors::MonitorSnapshot;

/// One monitor as reported by the display configuration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    /// Human-readable name, e.g. "Built-in display" or a vendor model.
    pub display_name: String,
    /// Connector/port identifier, e.g. "DP-1". Unique per output; used as
    /// the monitor's identity for color lookups.
    pub connector: String,
    pub active: bool,
    pub geometry: Rect,
}

/// Read-only view of the display configuration being labeled.
///
/// The labeler never owns or mutates the configuration; it only needs the
/// UI-sorted monitor list and whether the layout is a mirrored clone group.
pub trait DisplayConfig {
    /// Monitors in stable UI order. Index in this slice decides both the
    /// palette color and the ordinal shown on the label.
    fn monitors(&self) -> &[Monitor];

    /// Whether every active monitor shows the same content.
    fn is_cloning(&self) -> bool;
}

/// Plain in-memory `DisplayConfig`, used by the demo binary and by hosts
/// that already hold a monitor list from elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayLayout {
    pub monitors: Vec<Monitor>,
    pub cloned: bool,
}

impl DisplayLayout {
    pub fn new(monitors: Vec<Monitor>, cloned: bool) -> Self {
        Self { monitors, cloned }
    }

    /// Build a layout from an enumeration snapshot, treating every
    /// enumerated monitor as active.
    pub fn from_snapshots(snapshots: &[MonitorSnapshot]) -> Self {
        let monitors = snapshots
            .iter()
            .map(|snap| Monitor {
                display_name: snap.name.clone(),
                connector: snap.device.clone(),
                active: true,
                geometry: snap.geometry,
            })
            .collect();

        Self {
            monitors,
            cloned: false,
        }
    }
}

impl DisplayConfig for DisplayLayout {
    fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    fn is_cloning(&self) -> bool {
        self.cloned
    }
}
