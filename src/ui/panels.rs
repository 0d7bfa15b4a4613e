use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::reserved_color;
use crate::data::distance::format_distance;
use crate::data::model::Dataset;
use crate::prefs::{MARKER_SIZE_RANGE, TickStep};
use crate::scene::{MAX_LIMIT, MIN_LIMIT, SceneDescription};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Control panel");
    if ui
        .add_enabled(!state.loading(), egui::Button::new("🔄 Refresh data"))
        .clicked()
    {
        log::info!("Refresh requested");
        state.request_refresh();
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            view_settings(ui, state);
            ui.separator();
            filters(ui, state);
            ui.separator();
            distance_calculator(ui, state);
            ui.separator();

            let reset_label = format!("🔁 Reset view ({MIN_LIMIT}..{MAX_LIMIT})");
            if ui.button(reset_label).clicked() {
                state.reset_requested = true;
            }
        });
}

fn view_settings(ui: &mut Ui, state: &mut AppState) {
    ui.strong("View");
    let controls = &mut state.controls;

    ui.checkbox(&mut controls.show_grid, "Show grid lines");

    egui::ComboBox::from_label("Grid density (tick step)")
        .selected_text(controls.tick_step.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for step in TickStep::ALL {
                ui.selectable_value(&mut controls.tick_step, step.value(), step.to_string());
            }
        });

    ui.add(
        egui::Slider::new(&mut controls.marker_size, MARKER_SIZE_RANGE)
            .step_by(1.0)
            .text("Marker size"),
    );
    ui.add(
        egui::Slider::new(&mut controls.opacity_percent, 30..=100)
            .suffix("%")
            .text("Marker opacity"),
    );
}

fn filters(ui: &mut Ui, state: &mut AppState) {
    let categories = state
        .dataset
        .as_ref()
        .map(Dataset::categories)
        .unwrap_or_default();

    let n_selected = state.criteria.allowed_categories.len();
    let header_text = format!("Tip  ({n_selected}/{})", categories.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("category_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for category in &categories {
                let mut checked = state.criteria.allowed_categories.contains(category);
                let mut text = RichText::new(category);
                if let Some(c) = reserved_color(category) {
                    text = text.color(Color32::from(c));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_category(category);
                }
            }
        });

    ui.label("Search name (contains)");
    ui.text_edit_singleline(&mut state.criteria.name_query);
}

fn distance_calculator(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Distance");

    let names = state
        .dataset
        .as_ref()
        .map(Dataset::unique_names)
        .unwrap_or_default();
    if names.is_empty() {
        ui.label("No points loaded.");
        return;
    }

    name_selector(ui, "distance_a", "1st point", &mut state.distance_a, &names);
    name_selector(ui, "distance_b", "2nd point", &mut state.distance_b, &names);

    match state.selected_distance() {
        Some(Ok(d)) => {
            ui.label(RichText::new(format!("Distance: {}", format_distance(d))).color(Color32::GREEN));
        }
        Some(Err(reason)) => {
            ui.weak(reason.to_string());
        }
        None => {}
    }
}

fn name_selector(ui: &mut Ui, id: &str, label: &str, selected: &mut Option<String>, names: &[String]) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected.clone().unwrap_or_default())
            .show_ui(ui, |ui: &mut Ui| {
                for name in names {
                    ui.selectable_value(selected, Some(name.clone()), name.as_str());
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export scene as JSON…").clicked() {
                export_scene_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} points loaded, {} visible",
                ds.len(),
                state.visible().len()
            ));
        }

        if state.loading() {
            ui.spinner();
        }

        ui.separator();
        ui.weak(state.config.source.to_string());

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open map sheet")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Switching source to {}", path.display());
        state.open_local(path);
    }
}

pub fn export_scene_dialog(state: &mut AppState) {
    let scene = match state.scene() {
        Ok(scene) => scene,
        Err(e) => {
            state.status_message = Some(format!("Error: {e}"));
            return;
        }
    };

    let file = rfd::FileDialog::new()
        .set_title("Export scene")
        .add_filter("JSON", &["json"])
        .set_file_name("scene.json")
        .save_file();

    if let Some(path) = file {
        match write_scene(&path, &scene) {
            Ok(()) => {
                log::info!(
                    "Exported {} points in {} traces to {}",
                    scene.point_count(),
                    scene.groups.len(),
                    path.display()
                );
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export scene: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn write_scene(path: &Path, scene: &SceneDescription) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), scene)
        .context("writing scene JSON")?;
    Ok(())
}
