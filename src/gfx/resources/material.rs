//! Colours and unlit materials.
//!
//! A [`Material`] is either a flat colour or a decoded image; both render
//! unlit. Colour text follows the browser convention the stage inherited:
//! `#rrggbb` with optional leading `#`.

use rand::Rng;

use crate::error::VitrineError;
use crate::gfx::resources::texture::ImagePixels;

/// An RGBA colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub const BLACK: Colour = Colour {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const WHITE: Colour = Colour {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Parse `#rrggbb` (the `#` is optional, case insensitive).
    pub fn from_hex(text: &str) -> Result<Self, VitrineError> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 {
            return Err(VitrineError::InvalidColour {
                value: text.to_string(),
                reason: "expected 6 hex digits",
            });
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(VitrineError::InvalidColour {
                value: text.to_string(),
                reason: "not valid hexadecimal",
            });
        }
        let n = u32::from_str_radix(digits, 16).map_err(|_| VitrineError::InvalidColour {
            value: text.to_string(),
            reason: "not valid hexadecimal",
        })?;
        Ok(Self::from_rgb_u24(n))
    }

    fn from_rgb_u24(n: u32) -> Self {
        Colour {
            r: ((n >> 16) & 0xFF) as f32 / 255.0,
            g: ((n >> 8) & 0xFF) as f32 / 255.0,
            b: (n & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Format as `#rrggbb` for display.
    pub fn to_hex(&self) -> String {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }

    pub fn rgba_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert for surface clears.
    pub fn to_wgpu(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

/// Format a 24-bit colour integer as `#` plus lowercase hex, right-padded
/// with `0` to six digits.
///
/// Right-padding means short values land in the high bits: `0x4d2` becomes
/// `"#4d2000"`, not `"#0004d2"`. The stage inherited this quirk from the
/// browser demo it reproduces and keeps it so random colours match the
/// original's observable output.
pub fn format_hex_colour(n: u32) -> String {
    format!("#{:0<6x}", n)
}

/// A uniformly random colour drawn through the hex round-trip.
pub fn random_colour() -> Colour {
    let n = rand::rng().random_range(0..=0xFF_FFFFu32);
    let text = format_hex_colour(n);
    Colour::from_hex(&text).unwrap_or(Colour::WHITE)
}

/// An unlit material: a flat colour, or a decoded image modulated by white.
#[derive(Debug, Clone)]
pub struct Material {
    /// Tint applied in the fragment shader.
    pub colour: Colour,
    /// Decoded image, if this material is textured.
    pub pixels: Option<ImagePixels>,
    /// Where the image came from, for logging and the panel.
    pub source: Option<String>,
}

impl Material {
    pub fn solid(colour: Colour) -> Self {
        Material {
            colour,
            pixels: None,
            source: None,
        }
    }

    pub fn textured(source: impl Into<String>, pixels: ImagePixels) -> Self {
        Material {
            colour: Colour::WHITE,
            pixels: Some(pixels),
            source: Some(source.into()),
        }
    }

    pub fn is_textured(&self) -> bool {
        self.pixels.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse() {
        let c = Colour::from_hex("#4287f5").unwrap();
        assert!((c.r - 0x42 as f32 / 255.0).abs() < 1e-6);
        assert!((c.g - 0x87 as f32 / 255.0).abs() < 1e-6);
        assert!((c.b - 0xf5 as f32 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);

        // Leading # optional, case insensitive
        assert_eq!(Colour::from_hex("4287F5").unwrap(), c);
    }

    #[test]
    fn test_hex_parse_rejects_malformed() {
        for bad in ["", "#12345", "#1234567", "#12345g", "#+12345", "red"] {
            assert!(Colour::from_hex(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_hex_display_round_trip() {
        assert_eq!(Colour::from_hex("#4287f5").unwrap().to_hex(), "#4287f5");
        assert_eq!(Colour::BLACK.to_hex(), "#000000");
        assert_eq!(Colour::WHITE.to_hex(), "#ffffff");
    }

    #[test]
    fn test_format_right_pads_short_values() {
        // The inherited quirk: digits fill from the left, zeros pad the tail
        assert_eq!(format_hex_colour(0x4d2), "#4d2000");
        assert_eq!(format_hex_colour(0x0), "#000000");
        assert_eq!(format_hex_colour(0xf), "#f00000");
        assert_eq!(format_hex_colour(0xabcdef), "#abcdef");
    }

    #[test]
    fn test_formatted_colours_always_parse() {
        for n in [0u32, 1, 0xf, 0x4d2, 0x123456, 0xff_ffff] {
            let text = format_hex_colour(n);
            assert_eq!(text.len(), 7);
            assert!(Colour::from_hex(&text).is_ok(), "failed on {}", text);
        }
    }

    #[test]
    fn test_random_colour_in_range() {
        for _ in 0..100 {
            let c = random_colour();
            for channel in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&channel));
            }
            assert_eq!(c.a, 1.0);
        }
    }

    #[test]
    fn test_material_kinds() {
        let solid = Material::solid(Colour::from_hex("#4287f5").unwrap());
        assert!(!solid.is_textured());
        assert!(solid.source.is_none());

        let textured = Material::textured("cat.png", ImagePixels::solid(2, 2, [255, 0, 0, 255]));
        assert!(textured.is_textured());
        assert_eq!(textured.colour, Colour::WHITE);
    }
}
