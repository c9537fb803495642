//! Frequency colours

use image::Rgb;

/// Matches within this many Hz take the table colour
pub const COLOR_TOLERANCE_HZ: f32 = 5.0;

pub struct FrequencyColor {
    pub hz: f32,
    pub rgb: [u8; 3],
    pub name: &'static str,
    pub chakra: &'static str,
}

const fn fc(hz: f32, hex: u32, name: &'static str, chakra: &'static str) -> FrequencyColor {
    FrequencyColor {
        hz,
        rgb: [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8],
        name,
        chakra,
    }
}

pub const FREQUENCY_COLORS: [FrequencyColor; 16] = [
    fc(174.0, 0x8B4513, "Earth Brown", "root_foundation"),
    fc(285.0, 0xFF4500, "Quantum Orange", "sacral_creation"),
    fc(396.0, 0xDC143C, "Liberation Red", "root_security"),
    fc(417.0, 0xFF8C00, "Change Orange", "sacral_flow"),
    fc(528.0, 0xFFD700, "Love Gold", "heart_love"),
    fc(639.0, 0x32CD32, "Connection Green", "heart_relationships"),
    fc(741.0, 0x4169E1, "Awakening Blue", "throat_expression"),
    fc(852.0, 0x8A2BE2, "Order Violet", "third_eye_intuition"),
    fc(963.0, 0xFFFFFF, "Unity White", "crown_oneness"),
    fc(40.0, 0xFF1493, "Gamma Pink", "crown_awareness"),
    fc(10.0, 0x00CED1, "Alpha Turquoise", "third_eye_clarity"),
    fc(6.0, 0x9370DB, "Theta Purple", "third_eye_meditation"),
    fc(4.0, 0x191970, "Delta Midnight", "root_rest"),
    fc(432.0, 0x228B22, "Natural Green", "heart_earth"),
    fc(111.0, 0xB8860B, "Temple Gold", "crown_portal"),
    fc(7.83, 0x8FBC8F, "Schumann Green", "heart_earth"),
];

pub const BACKGROUND: Rgb<u8> = Rgb([0x00, 0x00, 0x11]);
pub const WHITE: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);
pub const GOLD: Rgb<u8> = Rgb([0xFF, 0xD7, 0x00]);
pub const VIOLET: Rgb<u8> = Rgb([0xEE, 0x82, 0xEE]);
pub const GRID: Rgb<u8> = Rgb([0x44, 0x44, 0x55]);

/// First table entry within tolerance
pub fn table_color(frequency: f32) -> Option<&'static FrequencyColor> {
    FREQUENCY_COLORS
        .iter()
        .find(|c| (frequency - c.hz).abs() < COLOR_TOLERANCE_HZ)
}

/// Hue used for frequencies outside the table
fn band_hue(frequency: f32) -> f32 {
    if frequency < 20.0 {
        0.8
    } else if frequency < 200.0 {
        0.7
    } else if frequency < 800.0 {
        0.5
    } else if frequency < 2000.0 {
        0.3
    } else {
        0.1
    }
}

/// Table colour scaled by `intensity`, or a band hue at 0.8 saturation
pub fn frequency_to_color(frequency: f32, intensity: f32) -> Rgb<u8> {
    match table_color(frequency) {
        Some(c) => scale_intensity(Rgb(c.rgb), intensity),
        None => from_unit(hsv_to_rgb(band_hue(frequency), 0.8, intensity.clamp(0.0, 1.0))),
    }
}

/// Multiply the HSV value channel, keeping hue and saturation
pub fn scale_intensity(color: Rgb<u8>, intensity: f32) -> Rgb<u8> {
    let [r, g, b] = color.0.map(|c| c as f32 / 255.0);
    let (h, s, v) = rgb_to_hsv(r, g, b);
    from_unit(hsv_to_rgb(h, s, (v * intensity).clamp(0.0, 1.0)))
}

pub fn to_hex(color: Rgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Truncating conversion from unit floats
fn from_unit((r, g, b): (f32, f32, f32)) -> Rgb<u8> {
    Rgb([(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8])
}

pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if max == min {
        return (0.0, 0.0, v);
    }
    let delta = max - min;
    let s = delta / max;

    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, v)
}

pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i32).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// One colour per frequency, for gradients along a sequence
pub fn gradient(frequencies: &[f32], intensities: &[f32]) -> Vec<Rgb<u8>> {
    frequencies
        .iter()
        .zip(intensities)
        .map(|(&f, &i)| frequency_to_color(f, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_match_with_tolerance() {
        assert_eq!(to_hex(frequency_to_color(530.0, 1.0)), "#ffd700");
        assert_eq!(table_color(7.0).map(|c| c.name), Some("Theta Purple"));
        assert!(table_color(600.0).is_none());
    }

    #[test]
    fn test_intensity_scaling_keeps_hue() {
        let dim = frequency_to_color(741.0, 0.5);
        let [r, g, b] = dim.0.map(|c| c as f32 / 255.0);
        let (h, _, v) = rgb_to_hsv(r, g, b);
        let (h0, _, v0) = rgb_to_hsv(0x41 as f32 / 255.0, 0x69 as f32 / 255.0, 0xE1 as f32 / 255.0);
        assert!((h - h0).abs() < 0.01);
        assert!((v - v0 * 0.5).abs() < 0.01);
    }

    #[test]
    fn test_band_colors() {
        // 600 Hz is mid band: hue 0.5 is cyan
        let c = frequency_to_color(600.0, 1.0);
        assert_eq!(c, Rgb([51, 255, 255]));
        let high = frequency_to_color(5000.0, 0.0);
        assert_eq!(high, Rgb([0, 0, 0]));
    }

    #[test]
    fn test_hsv_round_trip_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
        let (h, s, v) = rgb_to_hsv(0.0, 0.0, 1.0);
        assert!((h - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!((s, v), (1.0, 1.0));
    }
}
