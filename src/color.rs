use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Darken, Hsl, IntoColor, Srgb};

use crate::data::model::Gender;

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

const MALE_HEX: &str = "#000080";
const FEMALE_HEX: &str = "#d94f70";
const MIXED_HEX: &str = "#5a4e7a";

/// Parse a `#rrggbb` / `#rgb` hex code. Falls back to grey on bad input.
pub fn hex_color(hex: &str) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("Invalid colour '{hex}': {e}");
            Color32::GRAY
        }
    }
}

/// Fill colour of a gender's bars.
pub fn gender_color(gender: Gender) -> Color32 {
    hex_color(match gender {
        Gender::Male => MALE_HEX,
        Gender::Female => FEMALE_HEX,
        Gender::Mixed => MIXED_HEX,
    })
}

/// A darker shade of `fill` for bar outlines.
pub fn outline_color(fill: Color32) -> Color32 {
    let rgb: Srgb = Srgb::new(fill.r(), fill.g(), fill.b()).into_format();
    let hsl: Hsl = rgb.into_color();
    let darker: Srgb = hsl.darken(0.25).into_color();
    let out: Srgb<u8> = darker.into_format();
    Color32::from_rgb(out.red, out.green, out.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#000080"), Color32::from_rgb(0, 0, 128));
        assert_eq!(hex_color("#d94f70"), Color32::from_rgb(0xd9, 0x4f, 0x70));
        assert_eq!(hex_color("not a colour"), Color32::GRAY);
    }

    #[test]
    fn test_gender_colors_are_distinct() {
        let male = gender_color(Gender::Male);
        let female = gender_color(Gender::Female);
        let mixed = gender_color(Gender::Mixed);
        assert_ne!(male, female);
        assert_ne!(female, mixed);
        assert_eq!(mixed, Color32::from_rgb(0x5a, 0x4e, 0x7a));
    }

    #[test]
    fn test_outline_is_darker() {
        let fill = gender_color(Gender::Female);
        let outline = outline_color(fill);
        let brightness = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(brightness(outline) < brightness(fill));
    }
}
