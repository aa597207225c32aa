//! RGBA colors and the HSV form used by hue-preserving color transitions.

use palette::{FromColor, Hsv, Srgb};

use crate::Animatable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Packed `0xAARRGGBB`, the layout most toolkits hand colors around in
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            r: ((argb >> 16) & 0xFF) as f32 / 255.0,
            g: ((argb >> 8) & 0xFF) as f32 / 255.0,
            b: (argb & 0xFF) as f32 / 255.0,
            a: ((argb >> 24) & 0xFF) as f32 / 255.0,
        }
    }

    pub fn to_argb(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn to_hsv(&self) -> HsvColor {
        let hsv: Hsv = Hsv::from_color(Srgb::new(self.r, self.g, self.b));
        HsvColor {
            hue: hsv.hue.into_positive_degrees(),
            saturation: hsv.saturation,
            value: hsv.value,
            alpha: self.a,
        }
    }

    pub fn from_hsv(hsv: &HsvColor) -> Self {
        let source: Hsv = Hsv::new(hsv.hue, hsv.saturation, hsv.value);
        let rgb: Srgb = Srgb::from_color(source);
        Self::rgba(rgb.red, rgb.green, rgb.blue, hsv.alpha)
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// A color in hue/saturation/value form.
///
/// Interpolating this instead of [`Color`] walks around the hue wheel, which
/// keeps intermediate colors saturated. Hue is in degrees, the other
/// components in 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Animatable)]
pub struct HsvColor {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
    pub alpha: f32,
}
