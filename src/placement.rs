use crate::geometry::Rect;
use crate::monitors::MonitorSnapshot;

/// Gap between the label and the work-area corner, in logical units.
pub const LABEL_WINDOW_MARGIN: i32 = 5;

/// Monitor geometry queries the placement engine needs. Injected into the
/// controller so tests and hosts can supply their own screen model instead
/// of an ambient process-wide default.
pub trait Screen {
    fn monitor_count(&self) -> usize;

    /// Index of the monitor containing the point. Points outside every
    /// monitor resolve to the screen's default monitor (index 0).
    fn monitor_at_point(&self, x: i32, y: i32) -> usize;

    fn geometry(&self, index: usize) -> Rect;

    fn work_area(&self, index: usize) -> Rect;

    fn scale_factor(&self) -> f32 {
        1.0
    }
}

/// Top-left corner for a label anchored at `(x, y)`: the intersection of
/// the containing monitor's geometry and work area, inset by the margin.
pub fn place_label(screen: &dyn Screen, x: i32, y: i32) -> (i32, i32) {
    let scale = screen.scale_factor().max(1.0);
    let index = screen.monitor_at_point(
        (x as f32 / scale) as i32,
        (y as f32 / scale) as i32,
    );

    let geometry = screen.geometry(index);
    let area = geometry
        .intersect(&screen.work_area(index))
        .unwrap_or(geometry);

    (area.x + LABEL_WINDOW_MARGIN, area.y + LABEL_WINDOW_MARGIN)
}

/// `Screen` backed by a one-shot monitor enumeration snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotScreen {
    monitors: Vec<MonitorSnapshot>,
    scale_factor: f32,
}

impl SnapshotScreen {
    pub fn new(monitors: Vec<MonitorSnapshot>) -> Self {
        Self {
            monitors,
            scale_factor: 1.0,
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn monitors(&self) -> &[MonitorSnapshot] {
        &self.monitors
    }
}

impl Screen for SnapshotScreen {
    fn monitor_count(&self) -> usize {
        self.monitors.len()
    }

    fn monitor_at_point(&self, x: i32, y: i32) -> usize {
        self.monitors
            .iter()
            .position(|m| m.geometry.contains(x, y))
            .unwrap_or(0)
    }

    fn geometry(&self, index: usize) -> Rect {
        self.monitors
            .get(index)
            .map(|m| m.geometry)
            .unwrap_or(Rect::new(0, 0, 0, 0))
    }

    fn work_area(&self, index: usize) -> Rect {
        self.monitors
            .get(index)
            .map(|m| m.work_area)
            .unwrap_or(Rect::new(0, 0, 0, 0))
    }

    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str, geometry: Rect, work_area: Rect) -> MonitorSnapshot {
        MonitorSnapshot {
            name: name.to_string(),
            device: name.to_string(),
            is_primary: false,
            geometry,
            work_area,
        }
    }

    fn two_monitor_screen() -> SnapshotScreen {
        SnapshotScreen::new(vec![
            // Primary with a 40px taskbar at the bottom.
            snapshot(
                "a",
                Rect::new(0, 0, 1920, 1080),
                Rect::new(0, 0, 1920, 1040),
            ),
            // Secondary to the right with a 30px panel at the top.
            snapshot(
                "b",
                Rect::new(1920, 0, 1280, 1024),
                Rect::new(1920, 30, 1280, 994),
            ),
        ])
    }

    #[test]
    fn label_sits_inside_work_area() {
        let screen = two_monitor_screen();
        assert_eq!(place_label(&screen, 0, 0), (5, 5));
        // Second monitor's work area starts below its panel.
        assert_eq!(place_label(&screen, 1920, 0), (1925, 35));
    }

    #[test]
    fn point_outside_all_monitors_falls_back_to_default() {
        let screen = two_monitor_screen();
        assert_eq!(place_label(&screen, -5000, -5000), (5, 5));
    }

    #[test]
    fn scale_factor_divides_the_anchor() {
        let screen = two_monitor_screen().with_scale_factor(2.0);
        // Physical 3840 maps to logical 1920: the second monitor.
        assert_eq!(place_label(&screen, 3840, 0), (1925, 35));
    }

    #[test]
    fn empty_intersection_falls_back_to_geometry() {
        let screen = SnapshotScreen::new(vec![snapshot(
            "a",
            Rect::new(0, 0, 800, 600),
            Rect::new(5000, 5000, 10, 10),
        )]);
        assert_eq!(place_label(&screen, 10, 10), (5, 5));
    }
}
