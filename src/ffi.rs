//! Exported C ABI surface.
//!
//! Every symbol keeps its C name and signature so a harness can declare them
//! from the generated header. Pointer-taking functions are `unsafe`: callers
//! must pass valid, properly aligned pointers, and arrays must hold at least
//! `n` elements.

use std::os::raw::{c_double, c_float, c_int, c_ulonglong};
use std::ptr::{self, NonNull};

use tracing::warn;

use crate::point::{OwnedPoint, Point};
use crate::{array, outparam, scalar};

/* Integer in/out */

#[unsafe(no_mangle)]
pub extern "C" fn myint_succ(i: c_int) -> c_int {
    scalar::succ(i)
}

#[unsafe(no_mangle)]
pub extern "C" fn myint_succ2(i: c_int) -> c_int {
    scalar::succ2(i)
}

#[unsafe(no_mangle)]
pub extern "C" fn myint_doubled(i: c_int) -> c_int {
    scalar::doubled(i)
}

#[unsafe(no_mangle)]
pub extern "C" fn myint_add(i: c_int, j: c_int) -> c_int {
    scalar::add(i, j)
}

#[unsafe(no_mangle)]
pub extern "C" fn myint_add2(i: c_int, j: c_int) -> c_int {
    scalar::add2(i, j)
}

#[unsafe(no_mangle)]
pub extern "C" fn myint_mult(i: c_int, j: c_int) -> c_int {
    scalar::mult(i, j)
}

/* Null-pointer return */

/// Always returns NULL.
#[unsafe(no_mangle)]
pub extern "C" fn myintp_null(i: c_int) -> *mut c_int {
    scalar::absent_int(i).map_or(ptr::null_mut(), NonNull::as_ptr)
}

/// Always returns NULL.
#[unsafe(no_mangle)]
pub extern "C" fn myfloatp_null(i: c_float) -> *mut c_float {
    scalar::absent_float(i).map_or(ptr::null_mut(), NonNull::as_ptr)
}

/* Float in/out */

#[unsafe(no_mangle)]
pub extern "C" fn myfloat_succ(i: c_float) -> c_float {
    scalar::succf(i)
}

#[unsafe(no_mangle)]
pub extern "C" fn myfloat_add(i: c_float, j: c_float) -> c_float {
    scalar::addf(i, j)
}

/* Write-through output parameters */

/// Writes `i + 1` to `*j` and returns 42.
///
/// # Safety
///
/// `j` must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn set_ptr_succ(i: c_int, j: *mut c_int) -> c_int {
    let (ret, out) = outparam::set_succ(i);
    unsafe { j.write(out) };
    ret
}

/// Increments `*j` and returns 23. `i` is ignored.
///
/// # Safety
///
/// `j` must be valid for reads and writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn set_ptr_add(_i: c_int, j: *mut c_int) -> c_int {
    let (ret, out) = outparam::bump(unsafe { j.read() });
    unsafe { j.write(out) };
    ret
}

/// Writes `i + 1.0` to `*j` and returns 42.0.
///
/// # Safety
///
/// `j` must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn set_ptrf(i: c_float, j: *mut c_float) -> c_float {
    let (ret, out) = outparam::set_succf(i);
    unsafe { j.write(out) };
    ret
}

/// Increments `*i` by 1.0 and returns 42.0.
///
/// # Safety
///
/// `i` must be valid for reads and writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn incr_ptrf(i: *mut c_float) -> c_float {
    let (ret, out) = outparam::incrf(unsafe { i.read() });
    unsafe { i.write(out) };
    ret
}

/* Mixed in/out/by-value */

/// # Safety
///
/// `out` must be valid for writes; `inout` and `inout2` for reads and writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn complicated(
    input: c_int,
    out: *mut c_float,
    inout: *mut c_int,
    in2: c_ulonglong,
    inout2: *mut c_double,
) -> c_double {
    let result = unsafe { outparam::complicated(input, inout.read(), in2, inout2.read()) };
    unsafe {
        out.write(result.out);
        inout.write(result.inout);
        inout2.write(result.inout2);
    }
    result.ret
}

/* Fixed-size array mutation */

/// Adds `j` to each of the `n` ints at `a`. Returns 0.
///
/// # Safety
///
/// When `n > 0`, `a` must point to at least `n` initialized ints valid for
/// reads and writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn myint_add_array(j: c_int, a: *mut c_int, n: c_int) -> c_int {
    if a.is_null() || n <= 0 {
        return 0;
    }
    let values = unsafe { std::slice::from_raw_parts_mut(a, n as usize) };
    array::add_to_each(j, values);
    0
}

/* Struct lifecycle and accessors */

/// Allocates a point. Returns NULL if allocation fails.
#[unsafe(no_mangle)]
pub extern "C" fn make_point(x: c_int, y: c_int) -> *mut Point {
    match OwnedPoint::try_new(x, y) {
        Ok(point) => point.into_raw(),
        Err(err) => {
            warn!(x, y, "make_point failed: {}", err);
            ptr::null_mut()
        }
    }
}

/// Releases a point from [`make_point`]. NULL is ignored.
///
/// # Safety
///
/// `p` must be NULL or a live handle from [`make_point`]. It must not be used
/// afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn del_point(p: *mut Point) {
    if !p.is_null() {
        drop(unsafe { OwnedPoint::from_raw(p) });
    }
}

/// # Safety
///
/// `p` must be a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn point_x(p: *mut Point) -> c_int {
    unsafe { (*p).x() }
}

/// # Safety
///
/// `p` must be a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn point_y(p: *mut Point) -> c_int {
    unsafe { (*p).y() }
}

/// Sets `x` and returns `p`.
///
/// # Safety
///
/// `p` must be a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn point_setx(p: *mut Point, x: c_int) -> *mut Point {
    unsafe { (*p).set_x(x) };
    p
}

/// Sets `y` and returns `p`.
///
/// # Safety
///
/// `p` must be a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn point_sety(p: *mut Point, y: c_int) -> *mut Point {
    unsafe { (*p).set_y(y) };
    p
}

/// # Safety
///
/// `p1` and `p2` must be live handles. They may be the same handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn point_dist(p1: *mut Point, p2: *mut Point) -> c_double {
    unsafe { (*p1).distance(&*p2) }
}
