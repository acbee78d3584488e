//! Control Panel Widget
//! Left side panel with data source, view and export controls.

use crate::gui::ViewMode;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side control panel.
pub struct ControlPanel {
    pub data_path: Option<PathBuf>,
    pub point_count: usize,
    pub mode: ViewMode,
    pub show_values: bool,
    pub open_after_export: bool,
    pub status: String,
    pub is_loading: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            data_path: None,
            point_count: 0,
            mode: ViewMode::Fixed,
            show_values: true,
            open_after_export: false,
            status: "Ready".to_string(),
            is_loading: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Entry/Exit Chart")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .data_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "Sample data".to_string());

                ui.label(RichText::new(&path_text).size(12.0));
                ui.label(
                    RichText::new(format!("{} categories", self.point_count))
                        .size(11.0)
                        .color(Color32::GRAY),
                );

                ui.add_enabled_ui(!self.is_loading, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseData;
                        }
                        if ui.button("↺ Sample").clicked() {
                            action = ControlPanelAction::ResetSample;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== View Section =====
        ui.label(RichText::new("⚙️ View").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.radio_value(&mut self.mode, ViewMode::Fixed, "Fixed Pixels");
            ui.radio_value(&mut self.mode, ViewMode::Interactive, "Interactive");
        });
        ui.checkbox(&mut self.show_values, "Show values");

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.label(RichText::new("💾 Export").size(14.0).strong());
        ui.add_space(5.0);

        ui.checkbox(&mut self.open_after_export, "Open after export");
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("📄 Export Chart").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Export;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        if self.is_loading {
            ui.spinner();
        }

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseData,
    ResetSample,
    Export,
}
