//! Per-tick frame assembly: window selection, reduction (with cache reuse),
//! failure intervals, and the axis bounds handed to the external renderer.
//!
//! The controller owns the render cache and nothing else; the store is
//! written by the tick driver and only read here. One call to
//! [`RenderController::render`] corresponds to one redraw.

use crate::config::MonitorSettings;
use crate::data::cache::RenderCache;
use crate::data::channel::ChannelKind;
use crate::data::downsample::{
    dominant_interval, mean_timebucket, minmax_multi_timebucket, step_for, DownsampleParams,
};
use crate::data::failures::failure_regions;
use crate::data::smooth::smooth;
use crate::data::store::{SampleColumn, TimeSeriesStore};
use crate::data::window::{axis_bounds, visible_start};

/// One channel's renderable output: a time-monotonic series plus its shaded
/// failure intervals.
#[derive(Debug, Clone)]
pub struct SeriesFrame {
    pub kind: ChannelKind,
    pub time: Vec<f64>,
    pub values: Vec<f64>,
    pub regions: Vec<(f64, f64)>,
}

/// Everything the renderer needs for one tick.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Bounds to set on the shared time axis.
    pub x_bounds: (f64, f64),
    /// Link channels first (signal, rx, tx, bandwidth), then one series per
    /// ping host.
    pub series: Vec<SeriesFrame>,
    /// Whether the history prefix was reduced this tick.
    pub downsampled: bool,
    /// Bucket width in samples used for reduction (1 when not reduced).
    pub step: usize,
}

impl RenderFrame {
    /// Find a channel's series in this frame.
    pub fn series_for(&self, kind: &ChannelKind) -> Option<&SeriesFrame> {
        self.series.iter().find(|s| s.kind == *kind)
    }
}

/// Assembles a [`RenderFrame`] per tick, reusing the cached history
/// reduction whenever the window merely slid forward.
#[derive(Default)]
pub struct RenderController {
    cache: RenderCache,
}

impl RenderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached reduction. Only needed after external resets; a
    /// settings or surface change invalidates through the parameter tuple.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// End timestamp of the cached raw history, for tests and diagnostics.
    pub fn cache_history_end(&self) -> Option<f64> {
        self.cache.history_end_time()
    }

    /// Produce the frame for the current tick.
    ///
    /// `now` is the wall clock the tick driver used for collection;
    /// `plot_px` is the current render surface width.
    pub fn render(
        &mut self,
        store: &TimeSeriesStore,
        settings: &MonitorSettings,
        now: f64,
        plot_px: u32,
    ) -> RenderFrame {
        let times = store.times();
        let window = settings.window_secs;
        let bounds = axis_bounds(times, window, now);

        if store.is_empty() {
            return RenderFrame {
                x_bounds: bounds,
                series: Vec::new(),
                downsampled: false,
                step: 1,
            };
        }

        let link_channels: [(ChannelKind, &SampleColumn); 4] = [
            (ChannelKind::Signal, store.signal()),
            (ChannelKind::RxRate, store.rx_rate()),
            (ChannelKind::TxRate, store.tx_rate()),
            (ChannelKind::Bandwidth, store.bandwidth()),
        ];

        let start = visible_start(times, window, now);
        let vis_time = &times[start..];
        let max_points = settings.budget.max_points(plot_px);
        let tail_len = settings.budget.tail_len;

        let mut series = Vec::new();

        if vis_time.len() > max_points + tail_len {
            let hist_len = vis_time.len() - tail_len;
            let hist_raw_time = &vis_time[..hist_len];

            let step = step_for(hist_len, max_points);
            let t0 = times[0];
            let dt = dominant_interval(times);
            let params = DownsampleParams {
                step,
                tail_len,
                max_points,
                plot_px,
                t0,
                dt,
            };

            let link_vis: Vec<&[f64]> = link_channels
                .iter()
                .map(|(_, col)| &col.values[start..])
                .collect();

            let (hist_time, hist_values, tail_start) =
                match self.cache.reuse(&params, vis_time, hist_raw_time) {
                    Some(reused) => (reused.time, reused.values, reused.tail_start),
                    None => {
                        let hist_raw: Vec<&[f64]> =
                            link_vis.iter().map(|v| &v[..hist_len]).collect();
                        let (mut t, mut ys) =
                            minmax_multi_timebucket(hist_raw_time, &hist_raw, step, t0, dt);
                        // A window start off the bucket-grid origin can
                        // straddle one more bucket than the sample count
                        // predicts; drop the oldest points to hold the
                        // budget.
                        if t.len() > max_points {
                            let cut = t.len() - max_points;
                            t.drain(..cut);
                            for y in &mut ys {
                                y.drain(..cut);
                            }
                        }
                        let end = hist_raw_time[hist_len - 1];
                        self.cache.store(params, end, t.clone(), ys.clone());
                        (t, ys, hist_len)
                    }
                };

            for (k, (kind, col)) in link_channels.iter().enumerate() {
                let mut t = hist_time.clone();
                t.extend_from_slice(&vis_time[tail_start..]);
                let mut v = hist_values[k].clone();
                v.extend_from_slice(&link_vis[k][tail_start..]);
                series.push(make_series(kind.clone(), t, v, times, col, bounds));
            }

            // Ping channels carry their own reduced time base: mean per
            // bucket on the same absolute-time grid, half the link step.
            let ping_step = (step / 2).max(1);
            for ping in store.ping_channels() {
                let vis_ping = &ping.column.values[start..];
                let (mut t, hist_ds) = mean_timebucket(
                    &vis_time[..tail_start],
                    &vis_ping[..tail_start],
                    ping_step,
                    t0,
                    dt,
                );
                let mut v = smooth(&hist_ds, settings.smoothing_alpha);
                t.extend_from_slice(&vis_time[tail_start..]);
                v.extend(smooth(&vis_ping[tail_start..], settings.smoothing_alpha));

                let kind = ChannelKind::Ping {
                    host: ping.host.clone(),
                };
                series.push(make_series(kind, t, v, times, &ping.column, bounds));
            }

            RenderFrame {
                x_bounds: bounds,
                series,
                downsampled: true,
                step,
            }
        } else {
            // Small window: every raw sample fits, smooth instead of reduce.
            log::trace!(
                "render: pass-through, {} visible samples within budget {}",
                vis_time.len(),
                max_points + tail_len
            );
            for (kind, col) in link_channels.iter() {
                series.push(make_series(
                    kind.clone(),
                    vis_time.to_vec(),
                    smooth(&col.values[start..], settings.smoothing_alpha),
                    times,
                    col,
                    bounds,
                ));
            }
            for ping in store.ping_channels() {
                let kind = ChannelKind::Ping {
                    host: ping.host.clone(),
                };
                series.push(make_series(
                    kind,
                    vis_time.to_vec(),
                    ping.column.values[start..].to_vec(),
                    times,
                    &ping.column,
                    bounds,
                ));
            }

            RenderFrame {
                x_bounds: bounds,
                series,
                downsampled: false,
                step: 1,
            }
        }
    }
}

fn make_series(
    kind: ChannelKind,
    time: Vec<f64>,
    values: Vec<f64>,
    all_times: &[f64],
    column: &SampleColumn,
    bounds: (f64, f64),
) -> SeriesFrame {
    let regions = failure_regions(all_times, &column.failed, bounds.0, bounds.1);
    SeriesFrame {
        kind,
        time,
        values,
        regions,
    }
}
