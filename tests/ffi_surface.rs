//! Exported symbols called the way a foreign harness calls them.

use cfixture::ffi::*;
use std::ptr;

#[test]
fn test_integer_helpers() {
    for i in [-50, -1, 0, 1, 41] {
        assert_eq!(myint_succ(i), i + 1);
        assert_eq!(myint_succ2(i), i + 2);
        assert_eq!(myint_doubled(i), 2 * i);
        for j in [-3, 0, 8] {
            assert_eq!(myint_add(i, j), i + j);
            assert_eq!(myint_add2(i, j), i + 2 * j);
            assert_eq!(myint_mult(i, j), i * j);
        }
    }
}

#[test]
fn test_null_returns_for_any_input() {
    for i in [i32::MIN, -1, 0, 1, i32::MAX] {
        assert!(myintp_null(i).is_null());
    }
    for f in [f32::MIN, -1.0, 0.0, 1.0, f32::INFINITY, f32::NAN] {
        assert!(myfloatp_null(f).is_null());
    }
}

#[test]
fn test_float_helpers() {
    assert_eq!(myfloat_succ(1.0), 2.0);
    assert!((myfloat_succ(-0.25) - 0.75).abs() <= f32::EPSILON);
    assert_eq!(myfloat_add(1.0, 2.0), 3.0);
}

#[test]
fn test_set_ptr_succ() {
    for i in [-2, 0, 1, 99] {
        let mut j = -12345;
        assert_eq!(unsafe { set_ptr_succ(i, &mut j) }, 42);
        assert_eq!(j, i + 1);
    }
}

#[test]
fn test_set_ptr_add() {
    let mut j = 7;
    assert_eq!(unsafe { set_ptr_add(1, &mut j) }, 23);
    assert_eq!(j, 8);
}

#[test]
fn test_set_ptrf() {
    let mut j = 0.0f32;
    assert_eq!(unsafe { set_ptrf(2.0, &mut j) }, 42.0);
    assert_eq!(j, 3.0);
}

#[test]
fn test_incr_ptrf() {
    let mut f = -1.0f32;
    assert_eq!(unsafe { incr_ptrf(&mut f) }, 42.0);
    assert_eq!(f, 0.0);
}

#[test]
fn test_complicated() {
    let mut out = 0.0f32;
    let mut inout = 10;
    let mut inout2 = 2.5f64;
    let ret = unsafe { complicated(3, &mut out, &mut inout, 5, &mut inout2) };

    assert_eq!(ret, 42.0);
    assert_eq!(out, 4.0);
    assert_eq!(inout, 11);
    assert_eq!(inout2, 7.5);
}

#[test]
fn test_add_array() {
    let mut values = [1, 2, 3];
    assert_eq!(unsafe { myint_add_array(5, values.as_mut_ptr(), 3) }, 0);
    assert_eq!(values, [6, 7, 8]);
}

#[test]
fn test_add_array_respects_length() {
    let mut values = [4, 2, 100];
    unsafe { myint_add_array(4, values.as_mut_ptr(), 2) };
    assert_eq!(values, [8, 6, 100]);
}

#[test]
fn test_point_lifecycle() {
    let p = make_point(4, 4);
    assert!(!p.is_null());
    unsafe {
        assert_eq!(point_x(p), 4);
        assert_eq!(point_y(p), 4);
        del_point(p);
    }
}

#[test]
fn test_point_distance() {
    let a = make_point(3, 4);
    let b = make_point(0, 0);
    unsafe {
        assert_eq!(point_dist(a, b), 5.0);
        assert_eq!(point_dist(b, a), 5.0);
        assert_eq!(point_dist(a, a), 0.0);
        del_point(a);
        del_point(b);
    }
}

#[test]
fn test_point_distance_matches_c_formula() {
    let origin = make_point(0, 0);
    for (x, y) in [(-300, 159), (1, 1), (7, -24), (123, 456)] {
        let p = make_point(x, y);
        let (dx, dy) = (f64::from(x), f64::from(y));
        unsafe {
            assert_eq!(point_dist(origin, p), (dx * dx + dy * dy).sqrt());
            del_point(p);
        }
    }
    unsafe { del_point(origin) };
}

#[test]
fn test_point_distance_zero_only_for_same_coordinates() {
    let a = make_point(-2, 9);
    let b = make_point(-2, 9);
    unsafe {
        assert_eq!(point_dist(a, b), 0.0);
        point_sety(b, 10);
        assert_eq!(point_dist(a, b), 1.0);
        del_point(a);
        del_point(b);
    }
}

#[test]
fn test_point_setx_chains() {
    let p = make_point(1, 2);
    unsafe {
        let q = point_setx(p, 10);
        assert_eq!(q, p);
        assert_eq!(point_x(p), 10);
        assert_eq!(point_y(p), 2);

        let r = point_sety(point_setx(p, -1), -2);
        assert_eq!(r, p);
        assert_eq!((point_x(p), point_y(p)), (-1, -2));
        del_point(p);
    }
}

#[test]
fn test_del_point_null() {
    unsafe { del_point(ptr::null_mut()) };
}

#[test]
fn test_handles_interoperate_with_owned_point() {
    let p = make_point(6, 8);
    let owned = unsafe { cfixture::OwnedPoint::from_raw(p) };
    assert_eq!(owned.distance(&cfixture::Point::new(0, 0)), 10.0);
    drop(owned);
}
