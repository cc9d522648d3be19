//! DownsampleEngine: absolute-time-bucketed, peak-preserving reduction.
//!
//! Buckets are aligned to `t0 + k * step * dt`, an absolute origin, so a
//! sliding window cutoff does not move bucket boundaries and deep history
//! stays visually stable. Bucketing by position-in-slice would reshuffle old
//! history's bucket membership on every tick and is deliberately not
//! offered.
//!
//! Within each bucket the samples carrying the minimum and maximum value are
//! emitted (in timestamp order), so dropouts and spikes survive reduction.
//! A bucket with no finite value at all collapses to a single NaN point at
//! the bucket's median raw timestamp: the gap stays visible, no data is
//! fabricated.

/// Reduction parameters. Changing any field changes bucket geometry and
/// therefore invalidates previously reduced output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownsampleParams {
    /// Bucket width in samples.
    pub step: usize,
    /// Number of trailing raw samples that always pass through unreduced.
    pub tail_len: usize,
    /// Target point budget for the reduced history.
    pub max_points: usize,
    /// Render surface width in pixels (feeds into `max_points`).
    pub plot_px: u32,
    /// Absolute time origin anchoring the bucket grid.
    pub t0: f64,
    /// Dominant sample interval in seconds.
    pub dt: f64,
}

impl DownsampleParams {
    /// Bucket width in time units. `dt` is floored to a tiny positive
    /// epsilon so a degenerate interval cannot divide by zero.
    pub fn bucket_width(&self) -> f64 {
        self.step as f64 * self.dt.max(1e-6)
    }
}

/// Bucket width in samples so the reduced history lands near `max_points`
/// (two points per bucket).
pub fn step_for(hist_len: usize, max_points: usize) -> usize {
    let budget = (max_points / 2).max(1);
    ((hist_len + budget - 1) / budget).max(1)
}

/// Dominant sample interval: the median of successive time deltas.
/// Falls back to 1.0 for fewer than three samples.
pub fn dominant_interval(times: &[f64]) -> f64 {
    if times.len() < 3 {
        return 1.0;
    }
    let mut deltas: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
    deltas.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    deltas[deltas.len() / 2]
}

#[inline]
fn bucket_of(t: f64, t0: f64, width: f64) -> i64 {
    ((t - t0) / width).floor() as i64
}

/// Locate the min and max finite values in a bucket. Returns `None` when
/// every sample is NaN.
#[inline]
fn minmax_positions(values: &[f64]) -> Option<(usize, usize)> {
    let mut found: Option<(usize, usize)> = None;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match found {
            None => found = Some((i, i)),
            Some((lo, hi)) => {
                if v < values[lo] {
                    found = Some((i, hi));
                } else if v > values[hi] {
                    found = Some((lo, i));
                }
            }
        }
    }
    found
}

/// Min/max reduction of one channel on the absolute-time bucket grid.
///
/// Inputs of at most 2 samples, or `step <= 1`, are returned unchanged
/// (reduction is a no-op below this size). An empty input yields empty
/// output.
pub fn minmax_timebucket(
    times: &[f64],
    values: &[f64],
    step: usize,
    t0: f64,
    dt: f64,
) -> (Vec<f64>, Vec<f64>) {
    let (t, mut ys) = minmax_multi_timebucket(times, &[values], step, t0, dt);
    (t, ys.pop().unwrap_or_default())
}

/// Min/max reduction of several channels sharing one time axis.
///
/// Bucket membership and the min/max sample positions are decided by the
/// first channel (the primary); every other channel is sampled at those same
/// positions, so all outputs share an identical output time axis. An empty
/// channel list yields empty output.
pub fn minmax_multi_timebucket(
    times: &[f64],
    channels: &[&[f64]],
    step: usize,
    t0: f64,
    dt: f64,
) -> (Vec<f64>, Vec<Vec<f64>>) {
    if channels.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let n = times.len();
    if step <= 1 || n <= 2 {
        return (
            times.to_vec(),
            channels.iter().map(|c| c.to_vec()).collect(),
        );
    }

    let width = step as f64 * dt.max(1e-6);
    let primary = channels[0];

    let mut out_t = Vec::new();
    let mut out_ys: Vec<Vec<f64>> = vec![Vec::new(); channels.len()];

    let mut i = 0;
    while i < n {
        let b = bucket_of(times[i], t0, width);
        let mut j = i + 1;
        while j < n && bucket_of(times[j], t0, width) == b {
            j += 1;
        }

        match minmax_positions(&primary[i..j]) {
            None => {
                // All-NaN bucket: one midpoint, NaN preserved on every channel.
                let mid = i + (j - i) / 2;
                out_t.push(times[mid]);
                for (k, ch) in channels.iter().enumerate() {
                    out_ys[k].push(ch[mid]);
                }
            }
            Some((imin, imax)) => {
                let (first, second) = if imin <= imax { (imin, imax) } else { (imax, imin) };
                out_t.push(times[i + first]);
                out_t.push(times[i + second]);
                for (k, ch) in channels.iter().enumerate() {
                    out_ys[k].push(ch[i + first]);
                    out_ys[k].push(ch[i + second]);
                }
            }
        }

        i = j;
    }

    (out_t, out_ys)
}

/// Mean-per-bucket reduction on the same absolute-time grid, one point per
/// bucket at the bucket's median raw timestamp. Used for the ping channels,
/// where latency spikes are already short-lived and the mean reads better
/// than a min/max band.
pub fn mean_timebucket(
    times: &[f64],
    values: &[f64],
    step: usize,
    t0: f64,
    dt: f64,
) -> (Vec<f64>, Vec<f64>) {
    let n = times.len();
    if step <= 1 || n <= 2 {
        return (times.to_vec(), values.to_vec());
    }

    let width = step as f64 * dt.max(1e-6);

    let mut out_t = Vec::new();
    let mut out_y = Vec::new();

    let mut i = 0;
    while i < n {
        let b = bucket_of(times[i], t0, width);
        let mut j = i + 1;
        while j < n && bucket_of(times[j], t0, width) == b {
            j += 1;
        }

        let mid = i + (j - i) / 2;
        out_t.push(times[mid]);

        let mut sum = 0.0;
        let mut count = 0usize;
        for &v in &values[i..j] {
            if v.is_finite() {
                sum += v;
                count += 1;
            }
        }
        out_y.push(if count == 0 { f64::NAN } else { sum / count as f64 });

        i = j;
    }

    (out_t, out_y)
}
