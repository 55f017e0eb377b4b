//! Runs the fixture's documented properties through the exported C symbols.
//!
//! Every call passes real pointers, the same way a foreign harness would.

use tracing::debug;

use crate::ffi;

const SAMPLE_INTS: [i32; 7] = [-1000, -7, -1, 0, 1, 2, 1000];

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl CheckOutcome {
    fn new(name: &'static str, passed: bool, detail: impl Into<String>) -> Self {
        debug!(check = name, passed, "self-check");
        CheckOutcome {
            name,
            passed,
            detail: detail.into(),
        }
    }
}

pub fn all_passed(outcomes: &[CheckOutcome]) -> bool {
    outcomes.iter().all(|o| o.passed)
}

pub fn run_checks() -> Vec<CheckOutcome> {
    vec![
        check_integer_helpers(),
        check_null_returns(),
        check_float_helpers(),
        check_set_ptr_succ(),
        check_set_ptr_add(),
        check_set_ptrf(),
        check_incr_ptrf(),
        check_complicated(),
        check_add_array(),
        check_point_distance(),
        check_point_setters(),
    ]
}

fn check_integer_helpers() -> CheckOutcome {
    let mismatch = SAMPLE_INTS.iter().find_map(|&i| {
        let j = 3;
        let ok = ffi::myint_succ(i) == i + 1
            && ffi::myint_succ2(i) == i + 2
            && ffi::myint_doubled(i) == 2 * i
            && ffi::myint_add(i, j) == i + j
            && ffi::myint_add2(i, j) == i + 2 * j
            && ffi::myint_mult(i, j) == i * j;
        (!ok).then_some(i)
    });

    match mismatch {
        None => CheckOutcome::new("integer helpers", true, "succ, succ2, doubled, add, add2, mult"),
        Some(i) => CheckOutcome::new("integer helpers", false, format!("wrong result for i = {}", i)),
    }
}

fn check_null_returns() -> CheckOutcome {
    let passed = SAMPLE_INTS
        .iter()
        .all(|&i| ffi::myintp_null(i).is_null() && ffi::myfloatp_null(i as f32).is_null());
    CheckOutcome::new("null returns", passed, "myintp_null, myfloatp_null")
}

fn check_float_helpers() -> CheckOutcome {
    let succ = ffi::myfloat_succ(0.5);
    let sum = ffi::myfloat_add(1.25, 2.5);
    CheckOutcome::new(
        "float helpers",
        (succ - 1.5).abs() <= f32::EPSILON && (sum - 3.75).abs() <= f32::EPSILON,
        format!("myfloat_succ(0.5) = {}, myfloat_add(1.25, 2.5) = {}", succ, sum),
    )
}

fn check_set_ptr_succ() -> CheckOutcome {
    let mut j = 0;
    let ret = unsafe { ffi::set_ptr_succ(1, &mut j) };
    CheckOutcome::new(
        "set_ptr_succ",
        ret == 42 && j == 2,
        format!("returned {}, wrote {}", ret, j),
    )
}

fn check_set_ptr_add() -> CheckOutcome {
    let mut j = 7;
    let ret = unsafe { ffi::set_ptr_add(1, &mut j) };
    CheckOutcome::new(
        "set_ptr_add",
        ret == 23 && j == 8,
        format!("returned {}, slot now {}", ret, j),
    )
}

fn check_set_ptrf() -> CheckOutcome {
    let mut j = 0.0;
    let ret = unsafe { ffi::set_ptrf(1.5, &mut j) };
    CheckOutcome::new(
        "set_ptrf",
        ret == 42.0 && j == 2.5,
        format!("returned {}, wrote {}", ret, j),
    )
}

fn check_incr_ptrf() -> CheckOutcome {
    let mut f = 1.5;
    let ret = unsafe { ffi::incr_ptrf(&mut f) };
    CheckOutcome::new(
        "incr_ptrf",
        ret == 42.0 && f == 2.5,
        format!("returned {}, slot now {}", ret, f),
    )
}

fn check_complicated() -> CheckOutcome {
    let mut out = 0.0f32;
    let mut inout = 10;
    let mut inout2 = 2.5f64;
    let ret = unsafe { ffi::complicated(3, &mut out, &mut inout, 5, &mut inout2) };
    CheckOutcome::new(
        "complicated",
        ret == 42.0 && out == 4.0 && inout == 11 && inout2 == 7.5,
        format!("returned {}, out {}, inout {}, inout2 {}", ret, out, inout, inout2),
    )
}

fn check_add_array() -> CheckOutcome {
    let mut values = [1, 2, 3];
    let ret = unsafe { ffi::myint_add_array(5, values.as_mut_ptr(), values.len() as i32) };
    CheckOutcome::new(
        "myint_add_array",
        ret == 0 && values == [6, 7, 8],
        format!("array now {:?}", values),
    )
}

fn check_point_distance() -> CheckOutcome {
    let a = ffi::make_point(3, 4);
    let b = ffi::make_point(0, 0);
    if a.is_null() || b.is_null() {
        unsafe {
            ffi::del_point(a);
            ffi::del_point(b);
        }
        return CheckOutcome::new("point_dist", false, "make_point returned NULL");
    }

    let (ab, ba, aa) = unsafe {
        let distances = (ffi::point_dist(a, b), ffi::point_dist(b, a), ffi::point_dist(a, a));
        ffi::del_point(a);
        ffi::del_point(b);
        distances
    };

    CheckOutcome::new(
        "point_dist",
        ab == 5.0 && ba == 5.0 && aa == 0.0,
        format!("dist(a, b) = {}, dist(b, a) = {}, dist(a, a) = {}", ab, ba, aa),
    )
}

fn check_point_setters() -> CheckOutcome {
    let p = ffi::make_point(1, 2);
    if p.is_null() {
        return CheckOutcome::new("point setters", false, "make_point returned NULL");
    }

    let (same, x, y) = unsafe {
        let returned = ffi::point_setx(p, 10);
        let result = (returned == p, ffi::point_x(p), ffi::point_y(p));
        ffi::del_point(p);
        result
    };

    CheckOutcome::new(
        "point setters",
        same && x == 10 && y == 2,
        format!("same handle: {}, x = {}, y = {}", same, x, y),
    )
}
