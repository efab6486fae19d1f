// Hide console window on Windows
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use display_labeler::{
    log_error, log_info, log_warn, watcher, DisplayConfig, DisplayLabeler, DisplayLayout,
    SnapshotScreen, ViewportBackend,
};

fn main() -> Result<()> {
    let log_dir = std::env::temp_dir().join("display-labeler").join("logs");
    display_labeler::logger::init_logger(log_dir, "display-labeler", 10, true)?;

    log_info!("=== Display Labeler demo starting ===");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([380.0, 340.0])
            .with_title("Display Labeler")
            .with_resizable(false)
            .with_maximize_button(false),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Display Labeler",
        options,
        Box::new(|cc| Ok(Box::new(LabelerDemoApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e));

    log_info!("Demo shutting down...");
    display_labeler::logger::finalize_logs()?;

    result
}

struct LabelerDemoApp {
    labeler: DisplayLabeler<ViewportBackend>,
    layout: Arc<DisplayLayout>,
    labels_visible: bool,
    status_message: Option<String>,
}

impl LabelerDemoApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let snapshots = display_labeler::enumerate_monitors().unwrap_or_default();
        log_info!("Enumerated {} monitor(s)", snapshots.len());

        let layout = Arc::new(DisplayLayout::from_snapshots(&snapshots));
        let screen = SnapshotScreen::new(snapshots);

        let subscription = match watcher::native() {
            Ok(sub) => Some(sub),
            Err(e) => {
                log_warn!("Work-area watcher unavailable: {}", e);
                None
            }
        };

        let config: Arc<dyn DisplayConfig> = layout.clone();
        let labeler = DisplayLabeler::new(
            config,
            Box::new(screen),
            ViewportBackend::new(),
            subscription,
        );

        Self {
            labeler,
            layout,
            labels_visible: false,
            status_message: None,
        }
    }

    fn toggle_labels(&mut self) {
        if self.labels_visible {
            match self.labeler.show() {
                Ok(()) => {
                    self.status_message =
                        Some(format!("{} label(s) shown", self.labeler.window_count()));
                }
                Err(e) => {
                    log_error!("Failed to show labels: {}", e);
                    self.status_message = Some(format!("Failed to show labels: {}", e));
                    self.labels_visible = false;
                }
            }
        } else {
            self.labeler.hide();
            self.status_message = Some("Labels hidden".to_string());
        }
    }

    fn log_layout_json(&mut self) {
        match serde_json::to_string_pretty(self.layout.as_ref()) {
            Ok(json) => {
                log_info!("Current layout:\n{}", json);
                self.status_message = Some("Layout written to the session log".to_string());
            }
            Err(e) => {
                log_error!("Failed to serialize layout: {}", e);
            }
        }
    }
}

impl eframe::App for LabelerDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Work-area changes rebuild the labels on this thread.
        if let Err(e) = self.labeler.process_events() {
            log_error!("Label refresh failed: {}", e);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Display Labeler");
            ui.label("Overlay a numbered color label on each monitor.");
            ui.separator();

            if ui
                .checkbox(&mut self.labels_visible, "Show monitor labels")
                .changed()
            {
                self.toggle_labels();
            }

            ui.add_space(8.0);

            for monitor in &self.layout.monitors {
                let color = self.labeler.color_for_monitor(monitor);
                ui.horizontal(|ui| {
                    let (swatch, _) = ui
                        .allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, color.to_color32());
                    ui.label(format!(
                        "{}  ({}, {}x{})",
                        monitor.display_name,
                        monitor.connector,
                        monitor.geometry.width,
                        monitor.geometry.height,
                    ));
                });
            }

            ui.add_space(8.0);
            if ui.button("Log layout as JSON").clicked() {
                self.log_layout_json();
            }

            if let Some(status) = &self.status_message {
                ui.separator();
                ui.label(status);
            }
        });

        self.labeler.backend().render(ctx);

        // Keep draining the watcher even while idle.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
