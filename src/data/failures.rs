//! FailureRegionCompressor: boolean failure flags → shaded time intervals.
//!
//! Run-length-encodes the visible slice of a channel's failure flags into
//! contiguous `(start_time, end_time)` intervals for shaded-region
//! rendering. Each boundary is widened by one sample where available so the
//! shading visually touches the last good sample on either side of the
//! failure, then clamped to the view range.

/// Compress the failure flags visible in `[x_min, x_max]` into intervals.
///
/// `times` and `failed` are the full aligned arrays; the visible slice is
/// located here by binary search (with one sample of slack on each side for
/// the widening). Empty or all-false input yields an empty list.
pub fn failure_regions(
    times: &[f64],
    failed: &[bool],
    x_min: f64,
    x_max: f64,
) -> Vec<(f64, f64)> {
    let n = times.len().min(failed.len());
    if n == 0 || x_max <= x_min {
        return Vec::new();
    }

    let vis_start = times[..n].partition_point(|&t| t < x_min).saturating_sub(1);
    let vis_end = (times[..n].partition_point(|&t| t <= x_max) + 1).min(n);
    if vis_end <= vis_start {
        return Vec::new();
    }

    let mut regions = Vec::new();
    let mut run_start: Option<usize> = None;

    for i in vis_start..=vis_end {
        let flag = i < vis_end && failed[i];
        match (run_start, flag) {
            (None, true) => run_start = Some(i),
            (Some(s), false) => {
                // Widen by one sample on each side where available.
                let lo = if s > 0 { s - 1 } else { s };
                let hi = if i < n { i } else { i - 1 };
                let t_start = times[lo].max(x_min);
                let t_end = times[hi].min(x_max);
                if t_end > t_start {
                    regions.push((t_start, t_end));
                }
                run_start = None;
            }
            _ => {}
        }
    }

    regions
}
