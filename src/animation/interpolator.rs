//! Curves that reshape a controller's local fraction.
//!
//! A controller maps progress through its window to a fraction in `[0, 1]`
//! and hands that fraction to its [`Interpolator`] before sampling the
//! property ranges. Leaving the interpolator unset is the same as
//! [`Interpolator::Linear`].
//!
//! ```ignore
//! transit()
//!     .alpha(0.0, 1.0)
//!     .interpolator(Interpolator::CubicBezier(0.4, 0.0, 0.2, 1.0))
//!     .create_transition();
//! ```

use std::rc::Rc;

/// Remapping applied to a controller's local fraction
#[derive(Clone, Default)]
pub enum Interpolator {
    #[default]
    Linear,
    /// Quadratic, `t²`
    EaseIn,
    /// Quadratic, mirror of `EaseIn`
    EaseOut,
    /// `EaseIn` for the first half, `EaseOut` for the second
    EaseInOut,
    /// Control points `(x1, y1, x2, y2)` of a curve from `(0, 0)` to `(1, 1)`,
    /// as in CSS `cubic-bezier()`. `x1` and `x2` are clamped to `[0, 1]`.
    CubicBezier(f32, f32, f32, f32),
    /// Host curve. Two custom curves are equal only when they share the closure.
    Custom(Rc<dyn Fn(f32) -> f32>),
}

impl Interpolator {
    /// Remap `t`. Only custom curves may return values outside `[0, 1]`.
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            Interpolator::Linear => t,
            Interpolator::EaseIn => t * t,
            Interpolator::EaseOut => t * (2.0 - t),
            Interpolator::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Interpolator::CubicBezier(x1, y1, x2, y2) => {
                let s = solve_bezier_x(t, x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0));
                bezier_axis(s, *y1, *y2)
            }
            Interpolator::Custom(f) => f(t),
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + 'static,
    {
        Interpolator::Custom(Rc::new(f))
    }

    /// Structural equality, except for custom curves which compare by pointer
    pub fn same_as(&self, other: &Interpolator) -> bool {
        use Interpolator::*;
        match (self, other) {
            (Linear, Linear) | (EaseIn, EaseIn) | (EaseOut, EaseOut) | (EaseInOut, EaseInOut) => {
                true
            }
            (CubicBezier(a1, b1, c1, d1), CubicBezier(a2, b2, c2, d2)) => {
                (a1, b1, c1, d1) == (a2, b2, c2, d2)
            }
            (Custom(a), Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Interpolator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpolator::Linear => f.write_str("Linear"),
            Interpolator::EaseIn => f.write_str("EaseIn"),
            Interpolator::EaseOut => f.write_str("EaseOut"),
            Interpolator::EaseInOut => f.write_str("EaseInOut"),
            Interpolator::CubicBezier(x1, y1, x2, y2) => f
                .debug_tuple("CubicBezier")
                .field(x1)
                .field(y1)
                .field(x2)
                .field(y2)
                .finish(),
            Interpolator::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One coordinate of the bezier at parameter `s`, endpoints fixed at 0 and 1
fn bezier_axis(s: f32, p1: f32, p2: f32) -> f32 {
    let r = 1.0 - s;
    3.0 * r * r * s * p1 + 3.0 * r * s * s * p2 + s * s * s
}

fn bezier_axis_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let r = 1.0 - s;
    3.0 * r * r * p1 + 6.0 * r * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Parameter `s` at which the curve's x equals `x`.
///
/// With both x control points in `[0, 1]` the x axis is monotonic, so Newton
/// steps usually converge in a few rounds. Flat spots fall back to bisection.
fn solve_bezier_x(x: f32, x1: f32, x2: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier_axis(s, x1, x2) - x;
        if err.abs() < EPSILON {
            return s;
        }
        let slope = bezier_axis_slope(s, x1, x2);
        if slope.abs() < EPSILON {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = x.clamp(0.0, 1.0);
    for _ in 0..32 {
        let current = bezier_axis(s, x1, x2);
        if (current - x).abs() < EPSILON {
            break;
        }
        if current < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_linear_and_default() {
        for t in [0.0, 0.3, 1.0] {
            assert_eq!(Interpolator::Linear.evaluate(t), t);
            assert_eq!(Interpolator::default().evaluate(t), t);
        }
    }

    #[test]
    fn test_ease_in_out_shapes() {
        assert_eq!(Interpolator::EaseIn.evaluate(0.5), 0.25);
        assert_eq!(Interpolator::EaseOut.evaluate(0.5), 0.75);
        assert_eq!(Interpolator::EaseInOut.evaluate(0.25), 0.125);
        assert_eq!(Interpolator::EaseInOut.evaluate(0.75), 0.875);
    }

    #[test]
    fn test_endpoints_are_fixed() {
        for curve in [
            Interpolator::EaseIn,
            Interpolator::EaseOut,
            Interpolator::EaseInOut,
            Interpolator::CubicBezier(0.25, 0.1, 0.25, 1.0),
        ] {
            assert!(curve.evaluate(0.0).abs() < 1e-4, "{:?}", curve);
            assert!((curve.evaluate(1.0) - 1.0).abs() < 1e-4, "{:?}", curve);
        }
    }

    #[test]
    fn test_bezier_with_linear_control_points_is_identity() {
        let curve = Interpolator::CubicBezier(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for t in [0.1, 0.5, 0.9] {
            assert!((curve.evaluate(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_bezier_with_flat_ends_stays_monotonic() {
        let curve = Interpolator::CubicBezier(1.0, 0.0, 0.0, 1.0);
        let mut last = 0.0;
        for i in 1..=20 {
            let y = curve.evaluate(i as f32 / 20.0);
            assert!(y >= last - 1e-4, "{} after {}", y, last);
            last = y;
        }
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_custom_compares_by_reference() {
        let a = Interpolator::custom(|t| t * t * t);
        let b = a.clone();
        let c = Interpolator::custom(|t| t * t * t);
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
        assert_eq!(a.evaluate(0.5), 0.125);
    }

    #[test]
    fn test_custom_curve_may_capture_shared_state() {
        let calls = std::rc::Rc::new(Cell::new(0));
        let counter = calls.clone();
        let curve = Interpolator::custom(move |t| {
            counter.set(counter.get() + 1);
            t
        });
        curve.evaluate(0.2);
        curve.clone().evaluate(0.4);
        assert_eq!(calls.get(), 2);
    }
}
