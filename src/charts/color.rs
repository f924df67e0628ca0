//! Series colors.

use egui::Color32;
use plotters::style::RGBColor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// A `#RRGGBB` color with uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| {
            self.0
                .get(i..i + 2)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .unwrap_or(0)
        };
        (channel(1), channel(3), channel(5))
    }

    pub fn to_color32(&self) -> Color32 {
        let (r, g, b) = self.rgb();
        Color32::from_rgb(r, g, b)
    }

    pub fn to_rgb_color(&self) -> RGBColor {
        let (r, g, b) = self.rgb();
        RGBColor(r, g, b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Draws one uniform hex digit at a time, six per color.
pub struct ColorPicker {
    rng: StdRng,
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorPicker {
    /// Unseeded picker; colors differ from run to run.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible picker for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_default()
    }

    pub fn random_color(&mut self) -> HexColor {
        let mut color = String::with_capacity(7);
        color.push('#');
        for _ in 0..6 {
            color.push(HEX_DIGITS[self.rng.gen_range(0..HEX_DIGITS.len())] as char);
        }
        HexColor(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex_color(s: &str) -> bool {
        s.len() == 7
            && s.starts_with('#')
            && s[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
    }

    #[test]
    fn random_color_format() {
        let mut picker = ColorPicker::new();
        for _ in 0..500 {
            let color = picker.random_color();
            assert!(is_hex_color(color.as_str()), "bad color {color}");
        }
    }

    #[test]
    fn seeded_pickers_repeat() {
        let mut a = ColorPicker::seeded(7);
        let mut b = ColorPicker::seeded(7);
        let first: Vec<HexColor> = (0..10).map(|_| a.random_color()).collect();
        let second: Vec<HexColor> = (0..10).map(|_| b.random_color()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn digits_cover_alphabet() {
        let mut picker = ColorPicker::seeded(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.extend(picker.random_color().as_str()[1..].chars());
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn converts_channels() {
        let color = HexColor("#FF8000".to_string());
        assert_eq!(color.rgb(), (255, 128, 0));
        assert_eq!(color.to_color32(), Color32::from_rgb(255, 128, 0));
        assert_eq!(color.to_rgb_color(), RGBColor(255, 128, 0));
    }
}
