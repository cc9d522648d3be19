//! RenderCache: memoizes the reduced history prefix across ticks.
//!
//! Long windows (e.g. 4h) would otherwise re-reduce the entire history on
//! every tick. The cache keeps the last reduction keyed by its parameter
//! tuple plus the absolute end timestamp of the raw range it covered, and
//! on reuse both trims and extends **by timestamp**.
//!
//! Anchoring the history/tail boundary to a timestamp is a correctness
//! invariant, not an optimization: the window start slides forward every
//! tick, so a remembered index into the raw visible range stops denoting
//! the same sample one tick later, silently skipping or gapping data at the
//! boundary. The cache therefore never records raw indices.
//!
//! The cache is derived, disposable state: losing it costs one extra
//! reduction pass, never correctness.

use crate::data::downsample::DownsampleParams;

/// Cached history reduction, handed back on successful reuse. Already
/// trimmed to the current visible window.
pub struct ReusedHistory {
    pub time: Vec<f64>,
    pub values: Vec<Vec<f64>>,
    /// Index into the current raw visible range where the live tail begins:
    /// the first sample strictly newer than the cached end timestamp.
    pub tail_start: usize,
}

struct CacheEntry {
    params: DownsampleParams,
    /// Absolute timestamp of the last raw sample the reduction consumed.
    hist_end_time: f64,
    time: Vec<f64>,
    values: Vec<Vec<f64>>,
}

/// Memoized reduction of the history prefix, owned by the render path.
#[derive(Default)]
pub struct RenderCache {
    entry: Option<CacheEntry>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// End timestamp of the cached raw history, if any. Mostly useful for
    /// tests and diagnostics.
    pub fn history_end_time(&self) -> Option<f64> {
        self.entry.as_ref().map(|e| e.hist_end_time)
    }

    /// Attempt to reuse the cached reduction for the current tick.
    ///
    /// `vis_time` is the raw visible time range, `hist_raw_time` its
    /// reducible prefix (everything but the tail). Reuse fails, falling
    /// back to the from-scratch path, when the parameter
    /// tuple changed, when at least one full bucket of raw samples matured
    /// past the cached end timestamp, or when the cached end timestamp
    /// cannot be reconciled with the current history at all (it is ahead of
    /// every sample, e.g. after an external reset).
    pub fn reuse(
        &self,
        params: &DownsampleParams,
        vis_time: &[f64],
        hist_raw_time: &[f64],
    ) -> Option<ReusedHistory> {
        let entry = self.entry.as_ref()?;
        if entry.params != *params {
            log::debug!("render cache: parameter change, full recompute");
            return None;
        }
        let last_hist = match hist_raw_time.last() {
            Some(&t) => t,
            None => return None,
        };
        if entry.hist_end_time > last_hist {
            // History shrank underneath us; never trust stale state.
            log::debug!(
                "render cache: cached end {} ahead of history end {}, full recompute",
                entry.hist_end_time,
                last_hist
            );
            return None;
        }

        // Count raw history samples newer than the cached end, by timestamp.
        let matured = hist_raw_time.len()
            - hist_raw_time.partition_point(|&t| t <= entry.hist_end_time);
        if matured >= params.step {
            log::debug!(
                "render cache: {matured} new samples >= step {}, full recompute",
                params.step
            );
            return None;
        }

        // Trim reduced points that slid past the window's left edge.
        let vis_start = *vis_time.first()?;
        if let Some(&first_cached) = entry.time.first() {
            // A widened window can expose raw history older than anything
            // the cache ever reduced; that prefix must be recomputed.
            if first_cached - vis_start > params.bucket_width() {
                log::debug!(
                    "render cache: window start {vis_start} precedes cached range, full recompute"
                );
                return None;
            }
        }
        let trim = entry.time.partition_point(|&t| t < vis_start);

        // The tail begins at the first raw sample strictly newer than the
        // cached end timestamp.
        let tail_start = vis_time.partition_point(|&t| t <= entry.hist_end_time);

        log::trace!(
            "render cache: reuse, trimmed {trim} points, tail starts at raw index {tail_start}"
        );
        Some(ReusedHistory {
            time: entry.time[trim..].to_vec(),
            values: entry
                .values
                .iter()
                .map(|v| v[trim..].to_vec())
                .collect(),
            tail_start,
        })
    }

    /// Record a freshly computed reduction of the history prefix ending at
    /// `hist_end_time`.
    pub fn store(
        &mut self,
        params: DownsampleParams,
        hist_end_time: f64,
        time: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) {
        self.entry = Some(CacheEntry {
            params,
            hist_end_time,
            time,
            values,
        });
    }
}
