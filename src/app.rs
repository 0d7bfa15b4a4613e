use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TravianMapApp {
    pub state: AppState,
}

impl TravianMapApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for TravianMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: visible points ----
        if self.state.dataset.is_some() {
            if let Ok(scene) = self.state.scene() {
                egui::TopBottomPanel::bottom("points_table")
                    .resizable(true)
                    .default_height(180.0)
                    .show(ctx, |ui| {
                        table::points_table(ui, &scene);
                    });
            }
        }

        // ---- Central panel: map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Travian Haritası");
            plot::map_plot(ui, &mut self.state);
        });
    }
}
