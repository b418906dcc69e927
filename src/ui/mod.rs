//! User Interface module
//!
//! Terminal UI using ratatui: the title menu, the map screen and its
//! modal menus.

pub mod app;
pub mod input;
pub mod menu;

pub use app::App;

use ratatui::style::Color;

use crate::colors::Rgb;

/// Palette colour as a terminal colour
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
