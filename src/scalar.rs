//! Stateless integer and float helpers.
//!
//! Integer arithmetic wraps on overflow so every helper is total over `i32`.

use std::ptr::NonNull;

pub fn succ(i: i32) -> i32 {
    i.wrapping_add(1)
}

pub fn succ2(i: i32) -> i32 {
    i.wrapping_add(2)
}

pub fn doubled(i: i32) -> i32 {
    i.wrapping_mul(2)
}

pub fn add(i: i32, j: i32) -> i32 {
    i.wrapping_add(j)
}

/// `i + 2*j`
pub fn add2(i: i32, j: i32) -> i32 {
    i.wrapping_add(j).wrapping_add(j)
}

pub fn mult(i: i32, j: i32) -> i32 {
    i.wrapping_mul(j)
}

pub fn succf(f: f32) -> f32 {
    f + 1.0
}

pub fn addf(a: f32, b: f32) -> f32 {
    a + b
}

/// Never yields a pointer. Exists so harnesses can exercise absent-result handling.
pub fn absent_int(_i: i32) -> Option<NonNull<i32>> {
    None
}

/// Float counterpart of [`absent_int`].
pub fn absent_float(_f: f32) -> Option<NonNull<f32>> {
    None
}
