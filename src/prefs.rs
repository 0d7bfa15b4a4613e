use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;
use thiserror::Error;

pub const MARKER_SIZE_RANGE: RangeInclusive<f32> = 4.0..=20.0;
pub const MARKER_OPACITY_RANGE: RangeInclusive<f32> = 0.30..=1.00;

/// A display preference outside its declared domain. Rejected, never clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("tick step {0} is not one of 5, 10, 20, 25, 50")]
    TickStep(u32),
    #[error("marker size {0} is outside 4..=20")]
    MarkerSize(f32),
    #[error("marker opacity {0} is outside 0.30..=1.00")]
    MarkerOpacity(f32),
}

// ---------------------------------------------------------------------------
// TickStep
// ---------------------------------------------------------------------------

/// Grid density: distance between grid lines in map squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u32")]
pub enum TickStep {
    Five,
    Ten,
    Twenty,
    TwentyFive,
    Fifty,
}

impl TickStep {
    pub const ALL: [TickStep; 5] = [
        TickStep::Five,
        TickStep::Ten,
        TickStep::Twenty,
        TickStep::TwentyFive,
        TickStep::Fifty,
    ];

    pub fn value(self) -> u32 {
        match self {
            TickStep::Five => 5,
            TickStep::Ten => 10,
            TickStep::Twenty => 20,
            TickStep::TwentyFive => 25,
            TickStep::Fifty => 50,
        }
    }
}

impl Default for TickStep {
    fn default() -> Self {
        TickStep::Ten
    }
}

impl TryFrom<u32> for TickStep {
    type Error = ConfigurationError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        TickStep::ALL
            .into_iter()
            .find(|t| t.value() == v)
            .ok_or(ConfigurationError::TickStep(v))
    }
}

impl From<TickStep> for u32 {
    fn from(t: TickStep) -> u32 {
        t.value()
    }
}

impl fmt::Display for TickStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ---------------------------------------------------------------------------
// ViewPreferences
// ---------------------------------------------------------------------------

/// Validated display preferences. Build with [`ViewPreferences::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPreferences {
    show_grid: bool,
    tick_step: TickStep,
    marker_size: f32,
    marker_opacity: f32,
    viewport_reset: bool,
}

impl ViewPreferences {
    pub fn new(
        show_grid: bool,
        tick_step: TickStep,
        marker_size: f32,
        marker_opacity: f32,
        viewport_reset: bool,
    ) -> Result<Self, ConfigurationError> {
        if !MARKER_SIZE_RANGE.contains(&marker_size) {
            return Err(ConfigurationError::MarkerSize(marker_size));
        }
        if !MARKER_OPACITY_RANGE.contains(&marker_opacity) {
            return Err(ConfigurationError::MarkerOpacity(marker_opacity));
        }
        Ok(ViewPreferences {
            show_grid,
            tick_step,
            marker_size,
            marker_opacity,
            viewport_reset,
        })
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn tick_step(&self) -> TickStep {
        self.tick_step
    }

    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    pub fn marker_opacity(&self) -> f32 {
        self.marker_opacity
    }

    pub fn viewport_reset(&self) -> bool {
        self.viewport_reset
    }
}

impl Default for ViewPreferences {
    fn default() -> Self {
        ViewPreferences {
            show_grid: true,
            tick_step: TickStep::Ten,
            marker_size: 9.0,
            marker_opacity: 0.95,
            viewport_reset: false,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewControls – raw widget values
// ---------------------------------------------------------------------------

/// Raw values of the view widgets, before validation. Opacity is a percentage
/// as shown on the slider.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewControls {
    pub show_grid: bool,
    pub tick_step: u32,
    pub marker_size: f32,
    pub opacity_percent: u32,
}

impl Default for ViewControls {
    fn default() -> Self {
        ViewControls {
            show_grid: true,
            tick_step: TickStep::default().value(),
            marker_size: 9.0,
            opacity_percent: 95,
        }
    }
}

impl ViewControls {
    /// Validate the widget values into preferences.
    pub fn to_preferences(&self, viewport_reset: bool) -> Result<ViewPreferences, ConfigurationError> {
        ViewPreferences::new(
            self.show_grid,
            TickStep::try_from(self.tick_step)?,
            self.marker_size,
            self.opacity_percent as f32 / 100.0,
            viewport_reset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_controls() {
        let prefs = ViewControls::default().to_preferences(false).unwrap();
        assert_eq!(prefs, ViewPreferences::default());
    }

    #[test]
    fn tick_step_accepts_only_listed_values() {
        assert_eq!(TickStep::try_from(25), Ok(TickStep::TwentyFive));
        assert_eq!(TickStep::try_from(15), Err(ConfigurationError::TickStep(15)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(
            ViewPreferences::new(true, TickStep::Ten, 3.5, 0.5, false),
            Err(ConfigurationError::MarkerSize(3.5))
        );
        assert_eq!(
            ViewPreferences::new(true, TickStep::Ten, 9.0, 0.2, false),
            Err(ConfigurationError::MarkerOpacity(0.2))
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(ViewPreferences::new(false, TickStep::Five, 4.0, 0.30, false).is_ok());
        assert!(ViewPreferences::new(false, TickStep::Fifty, 20.0, 1.0, true).is_ok());
    }

    #[test]
    fn opacity_percent_boundary() {
        let controls = ViewControls {
            opacity_percent: 30,
            ..ViewControls::default()
        };
        assert!(controls.to_preferences(false).is_ok());
        let controls = ViewControls {
            opacity_percent: 29,
            ..ViewControls::default()
        };
        assert!(controls.to_preferences(false).is_err());
    }
}
