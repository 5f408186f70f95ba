use std::f64::consts::{FRAC_PI_2, TAU};

/// Angular width of one slice on a wheel of `count` candidates
pub fn slice_angle(count: usize) -> f64 {
    TAU / count as f64
}

/// Folds an unbounded rotation into `[0, 2π)`
pub fn normalize(rotation: f64) -> f64 {
    rotation.rem_euclid(TAU)
}

/// Start and end angle of slice `index`, before normalization
pub fn slice_bounds(rotation: f64, index: usize, count: usize) -> (f64, f64) {
    let slice = slice_angle(count);
    let start = rotation + index as f64 * slice;
    (start, start + slice)
}

/// Which slice sits under the pointer once the wheel has come to rest at
/// `final_rotation`.
///
/// The pointer is fixed at `π/2` and slice 0 starts at angle 0 before any
/// rotation. Turning the wheel by `r` is the same as moving the pointer by
/// `-r` relative to the wheel, so the pointer lands at `2π - r + π/2`.
///
/// This is what the painted wheel shows, so it must not be "simplified".
///
/// # Panics
/// on an empty wheel
pub fn winner_index(final_rotation: f64, count: usize) -> usize {
    assert!(count > 0, "cannot resolve a winner on an empty wheel");

    let normalized = normalize(final_rotation);
    let adjusted = (TAU - normalized + FRAC_PI_2) % TAU;
    (adjusted / slice_angle(count)).floor() as usize % count
}
