use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::EmissionType;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Fixed series colour per emission type, so the line chart reads the same
/// across datasets. Unknown tags get a neutral grey.
pub fn type_color(emission_type: &EmissionType) -> Color32 {
    match emission_type {
        EmissionType::Co2 => Color32::from_rgb(239, 83, 80),
        EmissionType::N2o => Color32::from_rgb(66, 165, 245),
        EmissionType::Ch4 => Color32::from_rgb(102, 187, 106),
        EmissionType::Other(_) => Color32::GRAY,
    }
}

// ---------------------------------------------------------------------------
// Category colours: country → Color32
// ---------------------------------------------------------------------------

/// Maps facet values (countries) to distinct colours for the bar chart.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
}

impl CategoryColors {
    /// Build a colour map for the given category values.
    pub fn new(values: &[String]) -> Self {
        let palette = generate_palette(values.len());
        let mapping: BTreeMap<String, Color32> = values
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        CategoryColors { mapping }
    }

    /// Look up the colour for a category value.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping.get(value).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colors() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_category_falls_back_to_grey() {
        let colors = CategoryColors::new(&["Spain".to_string()]);
        assert_eq!(colors.color_for("Atlantis"), Color32::GRAY);
        assert_ne!(colors.color_for("Spain"), Color32::GRAY);
    }
}
