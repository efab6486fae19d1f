use serde::{Deserialize, Serialize};

/// RGBA color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Rgba {
    /// Sentinel returned when a color lookup cannot be resolved.
    pub const MAGENTA: Rgba = Rgba {
        red: 1.0,
        green: 0.0,
        blue: 1.0,
        alpha: 1.0,
    };

    pub fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(
            (self.red.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.green.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }
}

/// Convert HSV to RGB. Hue is a fraction of the color wheel in [0, 1),
/// saturation and value in [0, 1].
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h = (h.rem_euclid(1.0)) * 6.0;
    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Convert RGB (channels in [0, 1]) back to HSV with hue in [0, 1).
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        (((b - r) / delta) + 2.0) / 6.0
    } else {
        (((r - g) / delta) + 4.0) / 6.0
    };

    (h, s, v)
}

const PALETTE_START_HUE: f32 = 0.0; // red
const PALETTE_END_HUE: f32 = 2.0 / 3.0; // blue
const PALETTE_SATURATION: f32 = 0.6;
const PALETTE_VALUE: f32 = 1.0;

/// Build one visually distinct color per monitor by walking the hue wheel
/// from red towards blue. Deterministic in `count`; `count` must be > 0.
pub fn make_palette(count: usize) -> Vec<Rgba> {
    debug_assert!(count > 0, "palette requested for zero monitors");

    let mut palette = Vec::with_capacity(count);
    for i in 0..count {
        let h = PALETTE_START_HUE
            + (PALETTE_END_HUE - PALETTE_START_HUE) / count as f32 * i as f32;
        let (r, g, b) = hsv_to_rgb(h, PALETTE_SATURATION, PALETTE_VALUE);
        palette.push(Rgba::new(r, g, b, 1.0));
    }
    palette
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn single_monitor_is_desaturated_red() {
        let palette = make_palette(1);
        assert_eq!(palette.len(), 1);
        assert_close(palette[0].red, 1.0);
        assert_close(palette[0].green, 0.4);
        assert_close(palette[0].blue, 0.4);
        assert_close(palette[0].alpha, 1.0);
    }

    #[test]
    fn three_monitors_split_the_wheel() {
        // Hues 0, 2/9 and 4/9 at s = 0.6, v = 1.0.
        let palette = make_palette(3);
        let expected = [(1.0, 0.4, 0.4), (0.8, 1.0, 0.4), (0.4, 1.0, 0.8)];
        assert_eq!(palette.len(), 3);
        for (color, (r, g, b)) in palette.iter().zip(expected) {
            assert_close(color.red, r);
            assert_close(color.green, g);
            assert_close(color.blue, b);
            assert_close(color.alpha, 1.0);
        }
    }

    #[test]
    fn hue_increases_and_saturation_holds() {
        for n in 1..=8 {
            let palette = make_palette(n);
            assert_eq!(palette.len(), n);

            let mut last_hue = -1.0f32;
            for (i, color) in palette.iter().enumerate() {
                let (h, s, v) = rgb_to_hsv(color.red, color.green, color.blue);
                assert!(h > last_hue || (i == 0 && h == 0.0), "hue not increasing");
                assert_close(h, 2.0 / 3.0 * i as f32 / n as f32);
                assert_close(s, 0.6);
                assert_close(v, 1.0);
                assert_close(color.alpha, 1.0);
                last_hue = h;
            }
        }
    }

    #[test]
    fn hsv_round_trip() {
        for &(h, s, v) in &[(0.0, 0.6, 1.0), (0.25, 0.5, 0.75), (0.9, 1.0, 0.3)] {
            let (r, g, b) = hsv_to_rgb(h, s, v);
            let (h2, s2, v2) = rgb_to_hsv(r, g, b);
            assert_close(h2, h);
            assert_close(s2, s);
            assert_close(v2, v);
        }
    }

    #[test]
    fn magenta_sentinel() {
        assert_eq!(Rgba::MAGENTA, Rgba::new(1.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn to_color32_applies_alpha() {
        let c = Rgba::new(1.0, 0.0, 0.0, 1.0).with_alpha(0.5).to_color32();
        assert_eq!(c, egui::Color32::from_rgba_unmultiplied(255, 0, 0, 128));
    }
}
