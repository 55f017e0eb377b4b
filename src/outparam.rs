//! Value-returning forms of the write-through fixtures.
//!
//! Each C function here writes into caller-supplied slots and also returns a
//! constant status. The safe forms return both as a tuple (return value
//! first, slot value second) or, for [`complicated`], a named struct.

/// Return value of `set_ptr_succ` and `set_ptrf`.
pub const SET_STATUS: i32 = 42;

/// Return value of `set_ptr_add`.
pub const BUMP_STATUS: i32 = 23;

/// Return value of `set_ptrf`, `incr_ptrf` and `complicated`.
pub const FLOAT_STATUS: f32 = 42.0;

/// `(42, i + 1)`
pub fn set_succ(i: i32) -> (i32, i32) {
    (SET_STATUS, i.wrapping_add(1))
}

/// `(23, j + 1)`
pub fn bump(j: i32) -> (i32, i32) {
    (BUMP_STATUS, j.wrapping_add(1))
}

/// `(42.0, f + 1.0)`
pub fn set_succf(f: f32) -> (f32, f32) {
    (FLOAT_STATUS, f + 1.0)
}

/// Increments the pointee in place, `(42.0, f + 1.0)`.
pub fn incrf(f: f32) -> (f32, f32) {
    (FLOAT_STATUS, f + 1.0)
}

/// Results of [`complicated`]: the return value plus the final value of every
/// output and in/out slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complicated {
    pub ret: f64,
    pub out: f32,
    pub inout: i32,
    pub inout2: f64,
}

/// Mixed in/out/by-value fixture.
///
/// `in2` is narrowed to `f32` before being added to `inout2`, so values above
/// 2^24 lose precision. Harnesses compare against that behavior.
pub fn complicated(input: i32, inout: i32, in2: u64, inout2: f64) -> Complicated {
    Complicated {
        ret: f64::from(FLOAT_STATUS),
        out: input as f32 + 1.0,
        inout: inout.wrapping_add(1),
        inout2: f64::from(in2 as f32) + inout2,
    }
}
