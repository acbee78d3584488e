//! Entry/Exit Chart Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartRenderer, StaticChartRenderer};
use crate::config::ChartConfig;
use crate::data::{sample_data, DataLoader, DataPoint};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// File loading result from background thread
enum LoadResult {
    Complete {
        path: PathBuf,
        points: Vec<DataPoint>,
    },
    Error(String),
}

/// Main application window.
pub struct ChartApp {
    config: ChartConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async file loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl ChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ChartConfig) -> Self {
        Self::with_config(config)
    }

    fn with_config(config: ChartConfig) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            config,
        };
        app.control_panel.show_values = app.config.show_values;
        app.chart_viewer.title = app.config.title.clone();
        app.set_points(sample_data(), None);
        app
    }

    /// Replace the data and recompute the layout.
    fn set_points(&mut self, points: Vec<DataPoint>, path: Option<PathBuf>) {
        let layout = ChartRenderer::compute_layout(&points, &self.config);
        self.control_panel.point_count = points.len();
        self.control_panel.data_path = path;
        self.chart_viewer.set_layout(layout);
    }

    /// Show the built-in data, abandoning any load still in flight.
    fn reset_to_sample(&mut self) {
        if self.load_rx.take().is_some() {
            info!("Discarding pending data load");
        }
        self.control_panel.is_loading = false;
        self.set_points(sample_data(), None);
        self.control_panel.set_status("Showing sample data");
    }

    /// Handle data file selection; parsing happens off the UI thread.
    fn handle_browse_data(&mut self) {
        if self.load_rx.is_some() {
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("Data Files", &["csv", "json"])
            .pick_file()
        else {
            return;
        };

        info!("Loading data from {}", path.display());
        self.control_panel.set_status("Loading data file...");
        self.control_panel.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match DataLoader::load(&path) {
                Ok(points) => LoadResult::Complete { path, points },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for file loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { path, points }) => {
                let count = points.len();
                self.set_points(points, Some(path));
                self.control_panel
                    .set_status(&format!("Loaded {} categories", count));
                self.control_panel.is_loading = false;
            }
            Ok(LoadResult::Error(e)) => {
                error!("Failed to load data: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
                self.control_panel.is_loading = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                warn!("Loader thread exited without a result");
                self.control_panel.set_status("Error: loader stopped");
                self.control_panel.is_loading = false;
            }
        }
    }

    /// Handle chart export to SVG or PNG
    fn handle_export(&mut self) {
        let Some(layout) = &self.chart_viewer.layout else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG Image", &["svg"])
            .add_filter("PNG Image", &["png"])
            .set_file_name("entries_exits.svg")
            .save_file()
        else {
            return;
        };

        let mut config = self.config.clone();
        config.show_values = self.control_panel.show_values;

        match StaticChartRenderer::save(layout, &config, &path) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if self.control_panel.open_after_export {
                    if let Err(e) = open::that(&path) {
                        warn!("Could not open {}: {}", path.display(), e);
                    }
                }
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.load_rx.is_some() {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseData => self.handle_browse_data(),
                        ControlPanelAction::ResetSample => self.reset_to_sample(),
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        self.chart_viewer.mode = self.control_panel.mode;
        self.chart_viewer.show_values = self.control_panel.show_values;

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
