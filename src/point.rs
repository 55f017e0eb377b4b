//! The fixture's only structured entity: a 2D integer point.
//!
//! [`Point`] has the C layout of `point_t`. [`OwnedPoint`] is the heap handle
//! handed across the boundary by `make_point` and reclaimed by `del_point`.

use std::alloc::{self, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::os::raw::c_int;
use std::ptr::NonNull;

use tracing::trace;

use crate::error::{FixtureError, Result};

/// `typedef struct { int x; int y; } point_t;`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: c_int,
    pub y: c_int,
}

impl Point {
    pub fn new(x: c_int, y: c_int) -> Self {
        Point { x, y }
    }

    pub fn x(&self) -> c_int {
        self.x
    }

    pub fn y(&self) -> c_int {
        self.y
    }

    pub fn set_x(&mut self, x: c_int) -> &mut Self {
        self.x = x;
        self
    }

    pub fn set_y(&mut self, y: c_int) -> &mut Self {
        self.y = y;
        self
    }

    /// `sqrt((x2-x1)^2 + (y2-y1)^2)`, computed in `f64` so coordinate
    /// differences never overflow.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// A heap-allocated [`Point`] with a single owner.
///
/// Dropping the handle releases the allocation. Ownership can be moved to a C
/// caller with [`OwnedPoint::into_raw`] and reclaimed with
/// [`OwnedPoint::from_raw`].
pub struct OwnedPoint {
    ptr: NonNull<Point>,
}

impl OwnedPoint {
    const LAYOUT: Layout = Layout::new::<Point>();

    /// Allocates a point, reporting allocator exhaustion instead of aborting.
    pub fn try_new(x: c_int, y: c_int) -> Result<Self> {
        // SAFETY: the layout of `Point` has non-zero size.
        let raw = unsafe { alloc::alloc(Self::LAYOUT) }.cast::<Point>();
        let ptr = NonNull::new(raw).ok_or(FixtureError::OutOfMemory {
            size: Self::LAYOUT.size(),
        })?;

        // SAFETY: `ptr` is a fresh allocation sized and aligned for `Point`.
        unsafe { ptr.as_ptr().write(Point::new(x, y)) };
        trace!(x, y, ptr = ?ptr, "allocated point");

        Ok(OwnedPoint { ptr })
    }

    pub fn as_ptr(&self) -> *const Point {
        self.ptr.as_ptr()
    }

    /// Gives up ownership. The pointer must eventually come back through
    /// [`OwnedPoint::from_raw`] exactly once.
    pub fn into_raw(self) -> *mut Point {
        let ptr = self.ptr.as_ptr();
        std::mem::forget(self);
        ptr
    }

    /// Reclaims a pointer produced by [`OwnedPoint::into_raw`].
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null, must come from [`OwnedPoint::into_raw`], and
    /// must not have been reclaimed already.
    pub unsafe fn from_raw(ptr: *mut Point) -> Self {
        // SAFETY: the caller guarantees `ptr` came from `into_raw`, which never yields null.
        OwnedPoint {
            ptr: unsafe { NonNull::new_unchecked(ptr) },
        }
    }
}

// SAFETY: the handle is the unique owner of a plain `Copy` value, like
// `Box<Point>`. Shared access is read-only.
unsafe impl Send for OwnedPoint {}
unsafe impl Sync for OwnedPoint {}

impl Deref for OwnedPoint {
    type Target = Point;

    fn deref(&self) -> &Point {
        // SAFETY: the allocation is live for as long as `self` is.
        unsafe { self.ptr.as_ref() }
    }
}

impl DerefMut for OwnedPoint {
    fn deref_mut(&mut self) -> &mut Point {
        // SAFETY: `self` is the unique owner of the allocation.
        unsafe { self.ptr.as_mut() }
    }
}

impl Drop for OwnedPoint {
    fn drop(&mut self) {
        trace!(ptr = ?self.ptr, "releasing point");
        // SAFETY: allocated in `try_new` with the same layout. `Point` is
        // `Copy`, so there is nothing to drop in place.
        unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), Self::LAYOUT) };
    }
}

impl fmt::Debug for OwnedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedPoint")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let p = OwnedPoint::try_new(4, -2).unwrap();
        assert_eq!(p.x(), 4);
        assert_eq!(p.y(), -2);
    }

    #[test]
    fn test_setters_chain() {
        let mut p = OwnedPoint::try_new(1, 2).unwrap();
        p.set_x(10).set_y(20);
        assert_eq!(*p, Point::new(10, 20));
    }

    #[test]
    fn test_set_x_leaves_y() {
        let mut p = OwnedPoint::try_new(3, 7).unwrap();
        let before = p.as_ptr();
        let same = p.set_x(10) as *const Point;
        assert_eq!(same, before);
        assert_eq!(p.x(), 10);
        assert_eq!(p.y(), 7);
    }

    #[test]
    fn test_distance_345() {
        let a = OwnedPoint::try_new(3, 4).unwrap();
        let b = OwnedPoint::try_new(0, 0).unwrap();
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Point::new(-12, 99);
        assert_eq!(p.distance(&p), 0.0);
    }

    #[test]
    fn test_distance_extreme_coordinates() {
        let a = Point::new(i32::MIN, 0);
        let b = Point::new(i32::MAX, 0);
        assert_eq!(a.distance(&b), u32::MAX as f64);
    }

    #[test]
    fn test_distance_matches_formula_exactly() {
        let origin = Point::new(0, 0);
        for x in -300..300 {
            for y in 0..300 {
                let dx = f64::from(x);
                let dy = f64::from(y);
                let expected = (dx * dx + dy * dy).sqrt();
                assert_eq!(origin.distance(&Point::new(x, y)), expected, "({}, {})", x, y);
            }
        }
        assert_eq!(origin.distance(&Point::new(-300, 159)), 339.53055827126957);
    }

    #[test]
    fn test_owned_point_moves_across_threads() {
        let mut p = OwnedPoint::try_new(2, 3).unwrap();
        p.set_x(9);
        let x = std::thread::spawn(move || p.x()).join().unwrap();
        assert_eq!(x, 9);
    }

    #[test]
    fn test_raw_round_trip_keeps_value() {
        let p = OwnedPoint::try_new(5, 6).unwrap();
        let raw = p.into_raw();
        let p = unsafe { OwnedPoint::from_raw(raw) };
        assert_eq!(*p, Point::new(5, 6));
    }
}
