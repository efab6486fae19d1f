use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::LabelerError;
use crate::palette::Rgba;

pub const LABEL_WINDOW_EDGE_THICKNESS: f32 = 1.0;
pub const LABEL_WINDOW_PADDING: f32 = 12.0;
pub const LABEL_CORNER_RADIUS: f32 = 0.0;

const TITLE_FONT_SIZE: f32 = 16.0;
const SUBTITLE_FONT_SIZE: f32 = 13.0;
const FILL_ALPHA: f32 = 0.90;

/// Text shown on one label window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelCaption {
    Monitor {
        /// 1-based position among all monitors, including inactive ones.
        ordinal: usize,
        display_name: String,
        connector: String,
    },
    /// Single caption for a whole clone group.
    Mirrored,
}

impl LabelCaption {
    /// Emphasized first line.
    pub fn title(&self) -> String {
        match self {
            LabelCaption::Monitor {
                ordinal,
                display_name,
                ..
            } => format!("{}  {}", ordinal, display_name),
            LabelCaption::Mirrored => "Mirrored Displays".to_string(),
        }
    }

    /// Second line, absent for mirrored groups.
    pub fn subtitle(&self) -> Option<&str> {
        match self {
            LabelCaption::Monitor { connector, .. } => Some(connector),
            LabelCaption::Mirrored => None,
        }
    }

    pub fn text(&self) -> String {
        match self.subtitle() {
            Some(subtitle) => format!("{}\n{}", self.title(), subtitle),
            None => self.title(),
        }
    }
}

/// Everything the backend needs to realize one label window.
///
/// The color is a view into the controller's palette (shared `Arc` plus an
/// index), not a copy; the palette therefore outlives every window that
/// references it.
#[derive(Clone)]
pub struct OverlaySpec {
    pub caption: LabelCaption,
    palette: Arc<Vec<Rgba>>,
    color_index: usize,
    /// Top-left corner in screen coordinates, already placed.
    pub origin: (i32, i32),
    pub corner_radius: f32,
}

impl OverlaySpec {
    pub fn new(
        caption: LabelCaption,
        palette: Arc<Vec<Rgba>>,
        color_index: usize,
        origin: (i32, i32),
        corner_radius: f32,
    ) -> Self {
        Self {
            caption,
            palette,
            color_index,
            origin,
            corner_radius,
        }
    }

    pub fn color(&self) -> Rgba {
        self.palette
            .get(self.color_index)
            .copied()
            .unwrap_or(Rgba::MAGENTA)
    }
}

/// Windowing seam between the controller and the platform. The production
/// implementation is [`ViewportBackend`]; tests substitute a recording fake.
pub trait OverlayBackend {
    type Window;

    fn create_window(&mut self, spec: OverlaySpec) -> Result<Self::Window, LabelerError>;

    fn destroy_window(&mut self, window: Self::Window);
}

/// Handle to one live label viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportWindow(u64);

/// Realizes label windows as borderless, click-through, always-on-top egui
/// viewports. `create_window`/`destroy_window` maintain the live set; the
/// host's event loop calls [`ViewportBackend::render`] every frame to keep
/// the viewports declared.
#[derive(Default)]
pub struct ViewportBackend {
    windows: Arc<Mutex<HashMap<u64, OverlaySpec>>>,
    next_id: u64,
}

impl ViewportBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window_count(&self) -> usize {
        self.windows.lock().len()
    }

    /// Declare one viewport per live label. Must run on the UI thread, once
    /// per frame, from the host `update`.
    pub fn render(&self, ctx: &egui::Context) {
        let windows: Vec<(u64, OverlaySpec)> = self
            .windows
            .lock()
            .iter()
            .map(|(id, spec)| (*id, spec.clone()))
            .collect();

        for (id, spec) in windows {
            let viewport_id = egui::ViewportId::from_hash_of(("monitor-label", id));
            let builder = egui::ViewportBuilder::default()
                .with_title(spec.caption.title())
                .with_position(egui::pos2(spec.origin.0 as f32, spec.origin.1 as f32))
                .with_inner_size([180.0, 56.0])
                .with_decorations(false)
                .with_resizable(false)
                .with_transparent(true)
                .with_always_on_top()
                .with_mouse_passthrough(true)
                .with_taskbar(false);

            ctx.show_viewport_immediate(viewport_id, builder, move |ctx, class| {
                if class == egui::ViewportClass::Embedded {
                    // Integration without multi-viewport support: fall back
                    // to an in-window floating label.
                    egui::Window::new(spec.caption.title())
                        .id(egui::Id::new(("monitor-label-embedded", id)))
                        .show(ctx, |ui| {
                            ui.label(spec.caption.text());
                        });
                } else {
                    draw_label(ctx, &spec);
                }
            });
        }
    }
}

impl OverlayBackend for ViewportBackend {
    type Window = ViewportWindow;

    fn create_window(&mut self, spec: OverlaySpec) -> Result<ViewportWindow, LabelerError> {
        self.next_id += 1;
        let id = self.next_id;
        self.windows.lock().insert(id, spec);
        Ok(ViewportWindow(id))
    }

    fn destroy_window(&mut self, window: ViewportWindow) {
        self.windows.lock().remove(&window.0);
    }
}

/// Paint one label viewport: rounded colored plate with a black outline and
/// the centered caption. Runs inside the viewport's own context, so the
/// shape is re-established on every compositor frame.
fn draw_label(ctx: &egui::Context, spec: &OverlaySpec) {
    let edge = LABEL_WINDOW_EDGE_THICKNESS;
    let rounding = egui::Rounding::same(spec.corner_radius);
    let fill = spec.color().with_alpha(FILL_ALPHA).to_color32();

    let title = ctx.fonts(|fonts| {
        fonts.layout_no_wrap(
            spec.caption.title(),
            egui::FontId::proportional(TITLE_FONT_SIZE),
            egui::Color32::BLACK,
        )
    });
    let subtitle = spec.caption.subtitle().map(|text| {
        ctx.fonts(|fonts| {
            fonts.layout_no_wrap(
                text.to_string(),
                egui::FontId::proportional(SUBTITLE_FONT_SIZE),
                egui::Color32::BLACK,
            )
        })
    });

    let text_width = title
        .size()
        .x
        .max(subtitle.as_ref().map_or(0.0, |g| g.size().x));
    let text_height = title.size().y + subtitle.as_ref().map_or(0.0, |g| g.size().y);
    let inset = LABEL_WINDOW_PADDING + edge;
    let desired = egui::vec2(text_width, text_height) + egui::vec2(inset, inset) * 2.0;

    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let rect = ui.max_rect();

            // Size the window to its caption.
            if (rect.size() - desired).abs().max_elem() > 0.5 {
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(desired));
            }

            let painter = ui.painter();
            painter.rect_filled(rect.shrink(edge), rounding, fill);
            painter.rect_stroke(
                rect.shrink(edge / 2.0),
                rounding,
                egui::Stroke::new(edge, egui::Color32::BLACK),
            );

            let mut pos = egui::pos2(
                rect.center().x - title.size().x / 2.0,
                rect.center().y - text_height / 2.0,
            );
            painter.galley(pos, title.clone(), egui::Color32::BLACK);
            if let Some(subtitle) = subtitle {
                pos.y += title.size().y;
                pos.x = rect.center().x - subtitle.size().x / 2.0;
                painter.galley(pos, subtitle, egui::Color32::BLACK);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::make_palette;

    #[test]
    fn caption_formats() {
        let caption = LabelCaption::Monitor {
            ordinal: 2,
            display_name: "DELL U2720Q".to_string(),
            connector: "DP-1".to_string(),
        };
        assert_eq!(caption.title(), "2  DELL U2720Q");
        assert_eq!(caption.subtitle(), Some("DP-1"));
        assert_eq!(caption.text(), "2  DELL U2720Q\nDP-1");

        assert_eq!(LabelCaption::Mirrored.title(), "Mirrored Displays");
        assert_eq!(LabelCaption::Mirrored.subtitle(), None);
        assert_eq!(LabelCaption::Mirrored.text(), "Mirrored Displays");
    }

    #[test]
    fn spec_color_is_a_palette_view() {
        let palette = Arc::new(make_palette(3));
        let spec = OverlaySpec::new(
            LabelCaption::Mirrored,
            palette.clone(),
            1,
            (0, 0),
            LABEL_CORNER_RADIUS,
        );
        assert_eq!(spec.color(), palette[1]);
    }

    #[test]
    fn spec_color_out_of_range_is_magenta() {
        let palette = Arc::new(make_palette(1));
        let spec = OverlaySpec::new(LabelCaption::Mirrored, palette, 7, (0, 0), 0.0);
        assert_eq!(spec.color(), Rgba::MAGENTA);
    }

    #[test]
    fn viewport_backend_tracks_live_windows() {
        let palette = Arc::new(make_palette(2));
        let mut backend = ViewportBackend::new();

        let a = backend
            .create_window(OverlaySpec::new(
                LabelCaption::Mirrored,
                palette.clone(),
                0,
                (5, 5),
                0.0,
            ))
            .unwrap();
        let b = backend
            .create_window(OverlaySpec::new(
                LabelCaption::Mirrored,
                palette,
                1,
                (5, 5),
                0.0,
            ))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(backend.window_count(), 2);

        backend.destroy_window(a);
        assert_eq!(backend.window_count(), 1);
        backend.destroy_window(b);
        assert_eq!(backend.window_count(), 0);
    }
}
