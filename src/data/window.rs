//! WindowSelector: visible range selection for the configured time window.
//!
//! The visible window is `[now - duration, now)` (or everything, when the
//! window is unbounded) and is re-derived from the wall clock on every tick;
//! it is never stored. The start index is found by binary search over the
//! monotonic time axis.

/// First index whose timestamp is `>= now - window`, or 0 when the window
/// is unbounded. Monotone in `now`: a later `now` never moves the start
/// backward.
pub fn visible_start(times: &[f64], window: Option<f64>, now: f64) -> usize {
    match window {
        None => 0,
        Some(w) => {
            let cutoff = now - w;
            times.partition_point(|&t| t < cutoff)
        }
    }
}

/// Time-axis bounds `[start, end]` for the renderer.
///
/// For a bounded window these are the window boundaries themselves rather
/// than data timestamps, so bucket alignment in the downsampler cannot leave
/// an empty gap at the left edge. For an unbounded window they span the
/// visible data (or `[0, 0]` when empty).
pub fn axis_bounds(times: &[f64], window: Option<f64>, now: f64) -> (f64, f64) {
    match window {
        Some(w) => (now - w, now),
        None => match (times.first(), times.last()) {
            (Some(&a), Some(&b)) => (a, b),
            _ => (0.0, 0.0),
        },
    }
}
