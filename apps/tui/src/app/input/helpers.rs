pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Move a rating bound by `delta`, rounded to one decimal and kept in `[lo, hi]`.
pub fn step_rating(value: f64, delta: f64, lo: f64, hi: f64) -> f64 {
    let stepped = ((value + delta) * 10.0).round() / 10.0;
    stepped.clamp(lo, hi.max(lo))
}

/// Move a review-count bound by `delta`, kept in `[lo, hi]`.
pub fn step_reviews(value: u32, delta: i64, lo: u32, hi: u32) -> u32 {
    let stepped = i64::from(value).saturating_add(delta);
    let clamped = stepped.clamp(i64::from(lo), i64::from(hi.max(lo)));
    u32::try_from(clamped).unwrap_or(lo)
}
