use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::{Rgb, assign_colors};
use crate::data::model::{Dataset, Point};
use crate::prefs::{TickStep, ViewPreferences};

/// Fixed square viewport, in map squares.
pub const MIN_LIMIT: f64 = -200.0;
pub const MAX_LIMIT: f64 = 200.0;

// ---------------------------------------------------------------------------
// Scene description – what the renderer draws
// ---------------------------------------------------------------------------

/// One marker trace: every visible point of a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceGroup {
    pub category: String,
    pub points: Vec<Point>,
    pub color: Rgb,
    pub marker_size: f32,
    pub marker_opacity: f32,
}

/// How the renderer must let the user interact with the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub scroll_zoom: bool,
    pub pan: bool,
    pub toolbar: bool,
    pub double_click: bool,
    /// One unit on X is drawn as long as one unit on Y.
    pub lock_aspect: bool,
}

impl Interaction {
    pub const MAP: Interaction = Interaction {
        scroll_zoom: true,
        pan: false,
        toolbar: false,
        double_click: false,
        lock_aspect: true,
    };
}

/// Renderer-agnostic description of one frame of the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescription {
    /// Sorted by category label.
    pub groups: Vec<TraceGroup>,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub tick_step: TickStep,
    pub show_grid: bool,
    /// Ask the renderer to drop any user zoom and show the fixed ranges again.
    pub reset_viewport: bool,
    pub interaction: Interaction,
}

impl SceneDescription {
    /// Total number of points across all groups.
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }
}

/// Build the scene for the (already filtered) points.
///
/// Ranges are always `[MIN_LIMIT, MAX_LIMIT]`, independent of the data and of
/// `viewport_reset`; the reset flag is only forwarded to the renderer.
pub fn build(filtered: &Dataset, prefs: &ViewPreferences) -> SceneDescription {
    let mut by_category: BTreeMap<&str, Vec<Point>> = BTreeMap::new();
    for p in filtered.iter() {
        by_category
            .entry(p.category.as_str())
            .or_default()
            .push(p.clone());
    }

    let colors = assign_colors(by_category.keys().copied());

    let groups = by_category
        .into_iter()
        .zip(colors)
        .map(|((category, points), color)| TraceGroup {
            category: category.to_string(),
            points,
            color,
            marker_size: prefs.marker_size(),
            marker_opacity: prefs.marker_opacity(),
        })
        .collect();

    SceneDescription {
        groups,
        x_range: [MIN_LIMIT, MAX_LIMIT],
        y_range: [MIN_LIMIT, MAX_LIMIT],
        tick_step: prefs.tick_step(),
        show_grid: prefs.show_grid(),
        reset_viewport: prefs.viewport_reset(),
        interaction: Interaction::MAP,
    }
}
