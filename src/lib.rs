pub mod config;
pub mod error;
pub mod geometry;
pub mod labeler;
pub mod logger;
pub mod monitors;
pub mod overlay;
pub mod palette;
pub mod placement;
pub mod watcher;

pub use config::{DisplayConfig, DisplayLayout, Monitor};
pub use error::LabelerError;
pub use geometry::Rect;
pub use labeler::DisplayLabeler;
pub use logger::*;
pub use monitors::{enumerate_monitors, MonitorSnapshot};
pub use overlay::{LabelCaption, OverlayBackend, OverlaySpec, ViewportBackend};
pub use palette::{make_palette, Rgba};
pub use placement::{place_label, Screen, SnapshotScreen};
pub use watcher::{WorkAreaNotifier, WorkAreaSubscription};
