/*
 * Vector Module
 *
 * Small stateless helpers over 2-D f64 vectors used by the rule evaluator,
 * boundary policy and speed limiter.
 */

use glam::DVec2;

#[inline]
pub fn norm(v: DVec2) -> f64 {
    v.length()
}

pub fn sum(vectors: impl IntoIterator<Item = DVec2>) -> DVec2 {
    vectors.into_iter().fold(DVec2::ZERO, |acc, v| acc + v)
}

// None for an empty input rather than a NaN centroid
pub fn mean(vectors: impl IntoIterator<Item = DVec2>) -> Option<DVec2> {
    let mut total = DVec2::ZERO;
    let mut count = 0usize;
    for v in vectors {
        total += v;
        count += 1;
    }
    (count > 0).then(|| total / count as f64)
}

/// Elementwise clamp of each component into `[lo, hi]`.
#[inline]
pub fn clamp(v: DVec2, lo: DVec2, hi: DVec2) -> DVec2 {
    DVec2::new(v.x.clamp(lo.x, hi.x), v.y.clamp(lo.y, hi.y))
}

/// Rescale `v` so its magnitude lies in `[min, max]`, keeping its direction.
///
/// Returns `None` when the direction is undefined (zero or non-finite length).
pub fn clamp_magnitude(v: DVec2, min: f64, max: f64) -> Option<DVec2> {
    let length = norm(v);
    if length == 0.0 || !length.is_finite() {
        return None;
    }

    if length < min {
        Some(v * (min / length))
    } else if length > max {
        Some(v * (max / length))
    } else {
        Some(v)
    }
}
