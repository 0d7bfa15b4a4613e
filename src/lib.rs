//! Interactive Travian map viewer.
//!
//! The core (`data`, `prefs`, `scene`) is pure: load a sheet snapshot,
//! filter it, measure distances, and describe what to draw. `state`, `app`
//! and `ui` wrap it in an egui shell that re-derives everything each frame.

pub mod app;
pub mod cache;
pub mod color;
pub mod config;
pub mod data;
pub mod prefs;
pub mod scene;
pub mod state;
pub mod ui;
