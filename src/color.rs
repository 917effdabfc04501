use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

/// Colour of an outcome series (0 = negative, 1 = positive).
pub fn outcome_color(outcome: u8) -> Color32 {
    let palette = generate_palette(2);
    palette[usize::from(outcome == 1)]
}

// ---------------------------------------------------------------------------
// Diverging map for correlations
// ---------------------------------------------------------------------------

const COOL: (f32, f32, f32) = (0.230, 0.299, 0.754);
const NEUTRAL: (f32, f32, f32) = (0.865, 0.865, 0.865);
const WARM: (f32, f32, f32) = (0.706, 0.016, 0.150);

/// Blue → grey → red for values in [-1, 1]; NaN maps to dark grey.
pub fn coolwarm(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::DARK_GRAY;
    }
    let v = value.clamp(-1.0, 1.0) as f32;
    let neutral = linear(NEUTRAL);
    let mixed = if v < 0.0 {
        neutral.mix(linear(COOL), -v)
    } else {
        neutral.mix(linear(WARM), v)
    };
    to_color32(Srgb::from_linear(mixed))
}

/// Black or white, whichever reads better on `background`.
pub fn text_color_on(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn linear((r, g, b): (f32, f32, f32)) -> LinSrgb {
    Srgb::new(r, g, b).into_linear()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let p = generate_palette(2);
        assert_eq!(p.len(), 2);
        assert_ne!(p[0], p[1]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn coolwarm_ends_and_middle() {
        let cold = coolwarm(-1.0);
        let hot = coolwarm(1.0);
        assert!(cold.b() > cold.r());
        assert!(hot.r() > hot.b());
        let mid = coolwarm(0.0);
        assert!((mid.r() as i32 - mid.b() as i32).abs() <= 1);
        assert_eq!(coolwarm(f64::NAN), Color32::DARK_GRAY);
    }

    #[test]
    fn annotation_contrast() {
        assert_eq!(text_color_on(Color32::WHITE), Color32::BLACK);
        assert_eq!(text_color_on(Color32::from_rgb(20, 20, 80)), Color32::WHITE);
    }
}
