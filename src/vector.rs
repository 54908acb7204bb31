// src/vector.rs

use nalgebra::Vector2;

pub type Vec2 = Vector2<f64>;

#[inline(always)]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

#[inline(always)]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

#[inline(always)]
pub fn scale(v: Vec2, k: f64) -> Vec2 {
    v * k
}

#[inline(always)]
pub fn magnitude(v: Vec2) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Direction of `v` in radians, 0 pointing east. With screen coordinates
/// (y grows downward) positive angles turn clockwise.
#[inline(always)]
pub fn heading(v: Vec2) -> f64 {
    v.y.atan2(v.x)
}
