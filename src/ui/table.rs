use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::Rgb;
use crate::data::model::Point;
use crate::scene::SceneDescription;

// ---------------------------------------------------------------------------
// Visible points table (bottom panel)
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;

/// List the points of the scene, trace by trace, in trace colour.
pub fn points_table(ui: &mut Ui, scene: &SceneDescription) {
    let rows: Vec<(&Point, Rgb)> = scene
        .groups
        .iter()
        .flat_map(|g| g.points.iter().map(move |p| (p, g.color)))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder().at_least(60.0))
        .header(20.0, |mut header| {
            for title in ["Tip", "İsim", "X", "Y"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let (p, color) = rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(&p.category).color(Color32::from(color)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(p.name.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(p.x.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(p.y.to_string());
                });
            });
        });
}
