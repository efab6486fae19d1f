use std::sync::Arc;

use crate::config::{DisplayConfig, Monitor};
use crate::error::LabelerError;
use crate::log_warn;
use crate::overlay::{LabelCaption, OverlayBackend, OverlaySpec, LABEL_CORNER_RADIUS};
use crate::palette::{make_palette, Rgba};
use crate::placement::{place_label, Screen};
use crate::watcher::WorkAreaSubscription;

struct LabelOverlay<W> {
    window: W,
    caption: LabelCaption,
}

/// Shows a colored, numbered label on each active monitor of a display
/// configuration so the user can tell which physical screen a settings
/// entry refers to.
///
/// Starts hidden; `show`/`hide` are idempotent. Between calls the overlay
/// set is either fully absent or populated for every slot: one window per
/// active monitor, or a single shared window when the layout is mirrored.
pub struct DisplayLabeler<B: OverlayBackend> {
    config: Arc<dyn DisplayConfig>,
    screen: Box<dyn Screen>,
    backend: B,
    palette: Arc<Vec<Rgba>>,
    /// `None` = hidden. When shown, one slot per monitor in UI order;
    /// inactive and clone-suppressed monitors keep a `None` slot so every
    /// monitor still consumes a palette index and an ordinal.
    windows: Option<Vec<Option<LabelOverlay<B::Window>>>>,
    subscription: Option<WorkAreaSubscription>,
    corner_radius: f32,
}

impl<B: OverlayBackend> DisplayLabeler<B> {
    /// The palette is sized to the monitor count once, here; `refresh`
    /// reuses it. An empty configuration is a caller bug.
    pub fn new(
        config: Arc<dyn DisplayConfig>,
        screen: Box<dyn Screen>,
        backend: B,
        subscription: Option<WorkAreaSubscription>,
    ) -> Self {
        let monitor_count = config.monitors().len();
        debug_assert!(monitor_count > 0, "display configuration has no monitors");

        let palette = Arc::new(make_palette(monitor_count));

        Self {
            config,
            screen,
            backend,
            palette,
            windows: None,
            subscription,
            corner_radius: LABEL_CORNER_RADIUS,
        }
    }

    pub fn set_corner_radius(&mut self, corner_radius: f32) {
        self.corner_radius = corner_radius;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_shown(&self) -> bool {
        self.windows.is_some()
    }

    /// Number of live label windows (zero while hidden).
    pub fn window_count(&self) -> usize {
        self.windows
            .as_ref()
            .map_or(0, |slots| slots.iter().flatten().count())
    }

    /// Create the label windows. No-op while already shown.
    ///
    /// Walks the UI-sorted monitor list; a mirrored layout collapses to a
    /// single window on the first active monitor, with later monitors
    /// keeping empty slots so ordinals stay aligned with the list.
    pub fn show(&mut self) -> Result<(), LabelerError> {
        if self.windows.is_some() {
            return Ok(());
        }

        let monitors = self.config.monitors().to_vec();
        let cloning = self.config.is_cloning();

        let mut slots = Vec::with_capacity(monitors.len());
        let mut created_window_for_clone = false;

        for (i, monitor) in monitors.iter().enumerate() {
            if created_window_for_clone || !monitor.active {
                slots.push(None);
                continue;
            }

            let caption = if cloning {
                LabelCaption::Mirrored
            } else {
                LabelCaption::Monitor {
                    ordinal: i + 1,
                    display_name: monitor.display_name.clone(),
                    connector: monitor.connector.clone(),
                }
            };

            let origin = place_label(
                self.screen.as_ref(),
                monitor.geometry.x,
                monitor.geometry.y,
            );
            let spec = OverlaySpec::new(
                caption.clone(),
                Arc::clone(&self.palette),
                i,
                origin,
                self.corner_radius,
            );

            let window = self.backend.create_window(spec)?;
            slots.push(Some(LabelOverlay { window, caption }));

            if cloning {
                created_window_for_clone = true;
            }
        }

        self.windows = Some(slots);
        Ok(())
    }

    /// Destroy every label window. No-op while already hidden.
    pub fn hide(&mut self) {
        let Some(slots) = self.windows.take() else {
            return;
        };

        for overlay in slots.into_iter().flatten() {
            self.backend.destroy_window(overlay.window);
        }
    }

    /// Full teardown and rebuild. Work-area geometry moved under the
    /// labels, so every window is recreated rather than repositioned.
    pub fn refresh(&mut self) -> Result<(), LabelerError> {
        self.hide();
        self.show()
    }

    /// Color assigned to a monitor, by its position in the UI-sorted list.
    /// An unknown monitor yields the magenta sentinel and a diagnostic;
    /// it signals a caller/state mismatch, not corruption.
    pub fn color_for_monitor(&self, monitor: &Monitor) -> Rgba {
        let position = self
            .config
            .monitors()
            .iter()
            .position(|m| m.connector == monitor.connector);

        match position.and_then(|i| self.palette.get(i)) {
            Some(color) => *color,
            None => {
                log_warn!(
                    "no label color for unknown monitor '{}'; returning magenta",
                    monitor.connector
                );
                Rgba::MAGENTA
            }
        }
    }

    /// Drain the work-area subscription; a change while shown rebuilds the
    /// labels in place. Call from the UI event loop.
    pub fn process_events(&mut self) -> Result<(), LabelerError> {
        let changed = self
            .subscription
            .as_ref()
            .is_some_and(|sub| sub.changed());

        if changed && self.windows.is_some() {
            self.refresh()?;
        }
        Ok(())
    }

    /// Which slots hold a live window, in UI order. `None` while hidden.
    pub fn populated_slots(&self) -> Option<Vec<bool>> {
        self.windows
            .as_ref()
            .map(|slots| slots.iter().map(|slot| slot.is_some()).collect())
    }

    /// Caption texts of the live overlays, in slot order. Empty while hidden.
    pub fn visible_captions(&self) -> Vec<String> {
        self.windows
            .as_ref()
            .map_or_else(Vec::new, |slots| {
                slots
                    .iter()
                    .flatten()
                    .map(|overlay| overlay.caption.text())
                    .collect()
            })
    }
}

impl<B: OverlayBackend> Drop for DisplayLabeler<B> {
    fn drop(&mut self) {
        // Windows first; the subscription handle follows, cancelling the
        // watcher before the labeler is gone.
        self.hide();
    }
}
