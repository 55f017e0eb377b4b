/// Adds `j` to every element of `values` in place, wrapping on overflow.
pub fn add_to_each(j: i32, values: &mut [i32]) {
    for value in values.iter_mut() {
        *value = value.wrapping_add(j);
    }
}
