use std::f64::consts::{PI, TAU};

/// An angle in `f32` radians, used by the style surface.
pub type Angle = euclid::Angle<f32>;
pub type Point = euclid::default::Point2D<f32>;
pub type Rect = euclid::default::Rect<f32>;
pub type Size = euclid::default::Size2D<f32>;
pub type Vector = euclid::default::Vector2D<f32>;

#[inline]
pub const fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

#[inline]
pub fn radians(radians: f32) -> Angle {
    Angle::radians(radians)
}

#[inline]
pub fn degrees(degrees: f32) -> Angle {
    Angle::degrees(degrees)
}

#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Convert a control value in degrees into the internal needle angle in
/// radians.
///
/// The needle coordinate system places a value of `0` at the leftmost point
/// of the arc and `180` at the rightmost, so the value is shifted by `-180`
/// degrees before conversion.
#[inline]
pub fn value_to_needle_angle(value: f64) -> f64 {
    deg_to_rad(value - 180.0)
}

/// Inverse of [`value_to_needle_angle`].
#[inline]
pub fn needle_angle_to_value(angle: f64) -> f64 {
    rad_to_deg(angle) + 180.0
}

/// Map a pointer position to a needle angle around `center`.
///
/// Positions below the center are folded onto the horizontal axis first
/// (the arc only spans the half-plane above its center in screen
/// coordinates), and the positive `atan2` branch is folded by `-2π` so
/// every result lands in the same continuous range as the needle angles.
pub fn pointer_to_needle_angle(center: Point, pointer: Point) -> f64 {
    let y = pointer.y.min(center.y);
    let mut angle = f64::from(y - center.y).atan2(f64::from(pointer.x - center.x));
    if angle > 0.0 {
        angle -= TAU;
    }
    angle
}

/// Distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f32 {
    (a - b).length()
}
