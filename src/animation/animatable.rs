use crate::color::Color;

/// Trait for types that can be animated by interpolating between values
///
/// Structs made of animatable fields can derive it with
/// `#[derive(Animatable)]`, which interpolates every field with the same factor.
pub trait Animatable: Clone + PartialEq + Send + Sync + 'static {
    /// Linear interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    /// t can exceed [0, 1] range for overshooting interpolators
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Color {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Color {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }
}

impl<const N: usize> Animatable for [f32; N] {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let mut out = *from;
        for (value, target) in out.iter_mut().zip(to) {
            *value += (target - *value) * t;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(f32::lerp(&0.0, &10.0, 0.0), 0.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 0.5), 5.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 1.0), 10.0);
        // Overshoot
        assert_eq!(f32::lerp(&0.0, &10.0, 1.5), 15.0);
    }

    #[test]
    fn test_f32_lerp_descending() {
        assert_eq!(f32::lerp(&1.0, &0.0, 0.25), 0.75);
    }

    #[test]
    fn test_color_lerp() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let white = Color::rgb(1.0, 1.0, 1.0);
        let mid = Color::lerp(&black, &white, 0.5);
        assert_eq!(mid.r, 0.5);
        assert_eq!(mid.g, 0.5);
        assert_eq!(mid.b, 0.5);
        assert_eq!(mid.a, 1.0);
    }

    #[test]
    fn test_array_lerp() {
        let mid = <[f32; 3]>::lerp(&[0.0, 2.0, 4.0], &[4.0, 2.0, 0.0], 0.5);
        assert_eq!(mid, [2.0, 2.0, 2.0]);
    }
}
