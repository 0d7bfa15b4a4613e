use eframe::egui::{Color32, Ui, Vec2};
use egui_plot::{
    Legend, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, Points, uniform_grid_spacer,
};

use crate::scene::TraceGroup;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Map plot (central panel)
// ---------------------------------------------------------------------------

/// Wheel distance (in points) that zooms by a factor of e.
const SCROLL_ZOOM_SCALE: f32 = 200.0;

/// Zoom factor for a vertical wheel delta; scrolling up zooms in.
fn scroll_zoom_factor(delta_y: f32) -> f32 {
    (delta_y / SCROLL_ZOOM_SCALE).exp()
}

/// Render the map scatter plot in the central panel.
///
/// Returns the plot bounds shown this frame, `None` when nothing was drawn.
pub fn map_plot(ui: &mut Ui, state: &mut AppState) -> Option<PlotBounds> {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.loading() {
                ui.heading("Loading map data…");
            } else {
                ui.heading("No map data. Use Refresh or File → Open CSV…");
            }
        });
        return None;
    }

    let scene = match state.scene() {
        Ok(scene) => scene,
        Err(e) => {
            log::warn!("Rejected view settings: {e}");
            ui.colored_label(Color32::RED, format!("Invalid view settings: {e}"));
            return None;
        }
    };

    let interaction = scene.interaction;
    let step = f64::from(scene.tick_step.value());
    let groups = &scene.groups;

    let mut plot = Plot::new("map_plot")
        .legend(Legend::default())
        .x_axis_label("X")
        .y_axis_label("Y")
        .show_grid(scene.show_grid)
        .x_grid_spacer(uniform_grid_spacer(move |_| [step, step * 5.0, step * 10.0]))
        .y_grid_spacer(uniform_grid_spacer(move |_| [step, step * 5.0, step * 10.0]))
        .include_x(scene.x_range[0])
        .include_x(scene.x_range[1])
        .include_y(scene.y_range[0])
        .include_y(scene.y_range[1])
        .allow_drag(interaction.pan)
        .allow_scroll(interaction.pan)
        .allow_zoom(interaction.scroll_zoom)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(interaction.double_click)
        .label_formatter(move |category, at| hover_text(groups, category, at));
    if interaction.lock_aspect {
        plot = plot.data_aspect(1.0);
    }

    let reset = scene.reset_viewport;
    let response = plot.show(ui, |plot_ui| {
        if reset {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [scene.x_range[0], scene.y_range[0]],
                [scene.x_range[1], scene.y_range[1]],
            ));
        }

        // Plain wheel zooms around the cursor; egui_plot would pan with it.
        if interaction.scroll_zoom && !interaction.pan {
            let delta = plot_ui.ctx().input(|i| i.smooth_scroll_delta.y);
            if delta != 0.0 && plot_ui.response().hovered() {
                plot_ui.zoom_bounds_around_hovered(Vec2::splat(scroll_zoom_factor(delta)));
            }
        }

        for group in &scene.groups {
            let points: PlotPoints = group.points.iter().map(|p| [p.x, p.y]).collect();
            let color = Color32::from(group.color).gamma_multiply(group.marker_opacity);

            plot_ui.points(
                Points::new(points)
                    .name(&group.category)
                    .color(color)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(group.marker_size / 2.0),
            );
        }
    });

    if reset {
        state.reset_requested = false;
    }
    Some(*response.transform.bounds())
}

/// Hover label: the nearest point of the hovered trace, or bare coordinates.
fn hover_text(groups: &[TraceGroup], category: &str, at: &PlotPoint) -> String {
    let nearest = groups
        .iter()
        .find(|g| g.category == category)
        .and_then(|g| {
            g.points.iter().min_by(|a, b| {
                let da = (a.x - at.x).hypot(a.y - at.y);
                let db = (b.x - at.x).hypot(b.y - at.y);
                da.total_cmp(&db)
            })
        });

    match nearest {
        Some(p) => format!("{}\nX={}\nY={}", p.name, p.x, p.y),
        None => format!("X={:.0}\nY={:.0}", at.x, at.y),
    }
}
