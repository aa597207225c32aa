use transit::Animatable;
use transit::color::{Color, HsvColor};

#[derive(Clone, PartialEq, Debug, Animatable)]
struct Offset {
    dx: f32,
    dy: f32,
}

#[derive(Clone, PartialEq, Debug, Animatable)]
struct Tint(Color, f32);

#[derive(Clone, PartialEq, Debug, Animatable)]
struct Nested {
    offset: Offset,
    corners: [f32; 4],
}

#[derive(Clone, PartialEq, Debug, Animatable)]
struct Marker;

#[test]
fn test_named_fields_lerp_independently() {
    let from = Offset { dx: 0.0, dy: 10.0 };
    let to = Offset { dx: 10.0, dy: 0.0 };
    assert_eq!(Offset::lerp(&from, &to, 0.25), Offset { dx: 2.5, dy: 7.5 });
}

#[test]
fn test_tuple_fields() {
    let from = Tint(Color::BLACK, 0.0);
    let to = Tint(Color::WHITE, 2.0);
    let mid = Tint::lerp(&from, &to, 0.5);
    assert_eq!(mid.0, Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(mid.1, 1.0);
}

#[test]
fn test_nested_structs() {
    let from = Nested {
        offset: Offset { dx: 0.0, dy: 0.0 },
        corners: [0.0; 4],
    };
    let to = Nested {
        offset: Offset { dx: 4.0, dy: -4.0 },
        corners: [8.0, 8.0, 0.0, 0.0],
    };
    let end = Nested::lerp(&from, &to, 1.0);
    assert_eq!(end, to);
    let mid = Nested::lerp(&from, &to, 0.5);
    assert_eq!(mid.offset, Offset { dx: 2.0, dy: -2.0 });
    assert_eq!(mid.corners, [4.0, 4.0, 0.0, 0.0]);
}

#[test]
fn test_unit_struct() {
    assert_eq!(Marker::lerp(&Marker, &Marker, 0.5), Marker);
}

#[test]
fn test_hsv_color_is_animatable() {
    let from = HsvColor {
        hue: 0.0,
        saturation: 1.0,
        value: 1.0,
        alpha: 1.0,
    };
    let to = HsvColor {
        hue: 240.0,
        saturation: 0.5,
        value: 1.0,
        alpha: 0.0,
    };
    let mid = HsvColor::lerp(&from, &to, 0.5);
    assert_eq!(mid.hue, 120.0);
    assert_eq!(mid.saturation, 0.75);
    assert_eq!(mid.alpha, 0.5);
}
