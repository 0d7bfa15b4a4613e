use std::fmt;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Rgb – renderer-agnostic colour
// ---------------------------------------------------------------------------

/// An opaque sRGB colour. Serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.0, c.1, c.2)
    }
}

// ---------------------------------------------------------------------------
// Category colours
// ---------------------------------------------------------------------------

/// Player markers.
pub const PLAYER: Rgb = Rgb(0x4C, 0x78, 0xFF);
/// Target markers.
pub const TARGET: Rgb = Rgb(0xFF, 0x4B, 0x4B);

/// Fixed colour for the two known categories, `None` for anything else.
pub fn reserved_color(category: &str) -> Option<Rgb> {
    match category {
        "Oyuncu" => Some(PLAYER),
        "Hedef" => Some(TARGET),
        _ => None,
    }
}

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// The hue walk starts at green so generated colours stay clear of the
/// reserved blue and red.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| {
            let hue = 120.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Colour every label in `categories` (already sorted): reserved colours
/// first, palette colours for the rest in order of appearance.
pub fn assign_colors<'a>(categories: impl IntoIterator<Item = &'a str>) -> Vec<Rgb> {
    let categories: Vec<&str> = categories.into_iter().collect();
    let unreserved = categories
        .iter()
        .filter(|c| reserved_color(c).is_none())
        .count();
    let mut palette = generate_palette(unreserved).into_iter();

    categories
        .iter()
        .map(|c| {
            reserved_color(c)
                .or_else(|| palette.next())
                .unwrap_or(Rgb(0x80, 0x80, 0x80))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(PLAYER.to_string(), "#4C78FF");
        assert_eq!(TARGET.to_string(), "#FF4B4B");
    }

    #[test]
    fn reserved_categories_keep_their_colours() {
        let colors = assign_colors(["Hedef", "Köy", "Oyuncu", "Vaha"]);
        assert_eq!(colors[0], TARGET);
        assert_eq!(colors[2], PLAYER);
        assert_ne!(colors[1], colors[3]);
    }

    #[test]
    fn palette_is_deterministic() {
        assert_eq!(generate_palette(3), generate_palette(3));
        assert!(generate_palette(0).is_empty());
    }
}
