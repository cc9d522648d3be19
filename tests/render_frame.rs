use linkplot::data::smooth::smooth;
use linkplot::data::window::{axis_bounds, visible_start};
use linkplot::data::x_formatter::{format_tick, resolution_for_span, TimeResolution};
use linkplot::{ChannelKind, LinkReading, MonitorSettings, RenderController, TimeSeriesStore};

fn reading(v: f64) -> LinkReading {
    LinkReading {
        signal: Some(v),
        rx_rate: Some(v),
        tx_rate: Some(v),
        bandwidth: Some(v),
        pings: vec![Some(v)],
    }
}

fn store_of(n: usize) -> TimeSeriesStore {
    let mut store = TimeSeriesStore::new();
    store.add_ping_host("1.1.1.1", Some("internet"));
    for i in 0..n {
        store.append(i as f64, &reading(i as f64));
    }
    store
}

// ── Store ────────────────────────────────────────────────────────────────────

#[test]
fn store_encodes_missing_values_as_nan_with_flag() {
    let mut store = TimeSeriesStore::new();
    store.append(
        0.0,
        &LinkReading {
            signal: Some(-50.0),
            rx_rate: None,
            ..Default::default()
        },
    );

    assert_eq!(store.len(), 1);
    assert_eq!(store.signal().values[0], -50.0);
    assert!(!store.signal().failed[0]);
    assert!(store.rx_rate().values[0].is_nan());
    assert!(store.rx_rate().failed[0], "a missing value must set the failure flag");
    // Channels and flags stay aligned 1:1 in lock-step.
    assert_eq!(store.tx_rate().len(), 1);
    assert_eq!(store.bandwidth().len(), 1);
}

#[test]
fn store_drops_non_monotonic_timestamps() {
    let mut store = TimeSeriesStore::new();
    store.append(10.0, &reading(1.0));
    store.append(10.0, &reading(2.0));
    store.append(5.0, &reading(3.0));
    assert_eq!(store.len(), 1, "stale and duplicate timestamps must be dropped");
    store.append(11.0, &reading(4.0));
    assert_eq!(store.len(), 2);
}

#[test]
fn late_ping_host_is_backfilled_as_failed() {
    let mut store = TimeSeriesStore::new();
    for i in 0..5 {
        store.append(i as f64, &reading(i as f64));
    }
    store.add_ping_host("10.0.0.1", Some("gateway"));

    let col = store
        .column(&ChannelKind::Ping {
            host: "10.0.0.1".into(),
        })
        .expect("ping channel registered");
    assert_eq!(col.len(), 5, "new channel must be aligned with existing history");
    assert!(col.failed.iter().all(|&f| f));

    store.append(5.0, &LinkReading {
        pings: vec![Some(12.5)],
        ..Default::default()
    });
    let col = store
        .column(&ChannelKind::Ping {
            host: "10.0.0.1".into(),
        })
        .unwrap();
    assert_eq!(col.values[5], 12.5);
}

#[test]
fn removed_ping_host_stops_receiving_samples() {
    let mut store = TimeSeriesStore::new();
    let gateway = store.add_ping_host("10.0.0.1", Some("gateway"));
    store.add_ping_host("1.1.1.1", Some("internet"));
    for i in 0..3 {
        store.append(
            i as f64,
            &LinkReading {
                pings: vec![Some(1.0), Some(2.0)],
                ..Default::default()
            },
        );
    }

    store.remove_ping_host(gateway);
    assert_eq!(store.ping_channels().len(), 1);
    assert_eq!(store.ping_channels()[0].host, "1.1.1.1");
    assert!(store
        .column(&ChannelKind::Ping {
            host: "10.0.0.1".into(),
        })
        .is_none());

    // Readings now address the remaining channels by their new order.
    store.append(
        3.0,
        &LinkReading {
            pings: vec![Some(9.0)],
            ..Default::default()
        },
    );
    let col = store
        .column(&ChannelKind::Ping {
            host: "1.1.1.1".into(),
        })
        .unwrap();
    assert_eq!(col.len(), store.len(), "surviving channel must stay aligned");
    assert_eq!(col.values[3], 9.0);

    // Out-of-range removal is a no-op.
    store.remove_ping_host(5);
    assert_eq!(store.ping_channels().len(), 1);
}

// ── WindowSelector ───────────────────────────────────────────────────────────

#[test]
fn visible_start_is_monotone_in_now() {
    let times: Vec<f64> = (0..1000).map(|i| i as f64).collect();
    let mut prev = 0;
    for now in (100..2000).step_by(37) {
        let start = visible_start(&times, Some(500.0), now as f64);
        assert!(start >= prev, "window start may never move backward");
        prev = start;
    }
    assert_eq!(visible_start(&times, None, 5000.0), 0, "unbounded window shows everything");
}

#[test]
fn axis_bounds_follow_the_window_not_the_data() {
    let times: Vec<f64> = (0..100).map(|i| i as f64).collect();
    assert_eq!(axis_bounds(&times, Some(500.0), 600.0), (100.0, 600.0));
    assert_eq!(axis_bounds(&times, None, 600.0), (0.0, 99.0));
    assert_eq!(axis_bounds(&[], None, 600.0), (0.0, 0.0));
}

// ── RenderController ─────────────────────────────────────────────────────────

#[test]
fn empty_store_renders_empty_frame() {
    let store = TimeSeriesStore::new();
    let mut rc = RenderController::new();
    let frame = rc.render(&store, &MonitorSettings::default(), 100.0, 800);
    assert!(frame.series.is_empty());
    assert!(!frame.downsampled);
}

#[test]
fn small_window_passes_every_sample_through_smoothed() {
    let store = store_of(100);
    let mut settings = MonitorSettings::default();
    settings.window_secs = Some(600.0);
    let mut rc = RenderController::new();

    let frame = rc.render(&store, &settings, 100.0, 800);
    assert!(!frame.downsampled, "100 samples fit the budget without reduction");

    let signal = frame.series_for(&ChannelKind::Signal).unwrap();
    assert_eq!(signal.time.len(), 100);
    // Monotonically rising input stays rising through the EMA, and the
    // first sample seeds it exactly.
    assert_eq!(signal.values[0], 0.0);
    for w in signal.values.windows(2) {
        assert!(w[1] >= w[0]);
    }

    // Ping channels pass through raw in the small-window path.
    let ping = frame
        .series_for(&ChannelKind::Ping {
            host: "1.1.1.1".into(),
        })
        .unwrap();
    assert_eq!(ping.values, (0..100).map(|i| i as f64).collect::<Vec<_>>());
}

#[test]
fn fresh_reduction_respects_the_point_budget() {
    let store = store_of(2_000);
    let settings = MonitorSettings::default(); // max_points 200, tail 60
    let mut rc = RenderController::new();

    let frame = rc.render(&store, &settings, 2_000.0, 1);
    assert!(frame.downsampled);
    for kind in [
        ChannelKind::Signal,
        ChannelKind::RxRate,
        ChannelKind::TxRate,
        ChannelKind::Bandwidth,
    ] {
        let s = frame.series_for(&kind).unwrap();
        assert!(
            s.time.len() <= 200 + 60,
            "{kind}: {} points exceed the budget",
            s.time.len()
        );
        assert_eq!(s.time.len(), s.values.len());
    }
}

#[test]
fn misaligned_window_still_respects_the_point_budget() {
    // 605 samples with a 500s window: the visible history [105, 545)
    // starts mid-bucket and so straddles 45 step-10 buckets where an
    // origin-aligned window would cover 44. The extra bucket must not
    // push the output past max_points + tail_len.
    let mut settings = MonitorSettings::default();
    settings.window_secs = Some(500.0);
    settings.budget.min_points = 88;
    settings.budget.tail_len = 60;

    let store = store_of(605);
    let mut rc = RenderController::new();
    let frame = rc.render(&store, &settings, 605.0, 1);
    assert!(frame.downsampled);
    assert_eq!(frame.step, 10);

    let signal = frame.series_for(&ChannelKind::Signal).unwrap();
    assert!(
        signal.time.len() <= 88 + 60,
        "{} points exceed the budget",
        signal.time.len()
    );
    for w in signal.time.windows(2) {
        assert!(w[0] <= w[1], "time axis must stay monotonic after trimming");
    }
}

#[test]
fn link_channels_share_one_reduced_time_axis() {
    let store = store_of(2_000);
    let mut rc = RenderController::new();
    let frame = rc.render(&store, &MonitorSettings::default(), 2_000.0, 1);

    let signal = frame.series_for(&ChannelKind::Signal).unwrap();
    for kind in [ChannelKind::RxRate, ChannelKind::TxRate, ChannelKind::Bandwidth] {
        let s = frame.series_for(&kind).unwrap();
        assert_eq!(s.time, signal.time, "{kind} must share the signal's time axis");
    }
}

#[test]
fn ping_series_uses_its_own_bounded_time_base() {
    let store = store_of(2_000);
    let mut rc = RenderController::new();
    let frame = rc.render(&store, &MonitorSettings::default(), 2_000.0, 1);

    let ping = frame
        .series_for(&ChannelKind::Ping {
            host: "1.1.1.1".into(),
        })
        .unwrap();
    assert_eq!(ping.time.len(), ping.values.len());
    assert!(
        ping.time.len() < 2_000,
        "ping history must be reduced, got {} points",
        ping.time.len()
    );
    for w in ping.time.windows(2) {
        assert!(w[0] <= w[1], "ping time base must stay monotonic");
    }
}

#[test]
fn failure_stretch_produces_shaded_regions() {
    let mut store = TimeSeriesStore::new();
    for i in 0..100 {
        let r = if (40..50).contains(&i) {
            LinkReading {
                signal: Some(-50.0),
                rx_rate: None,
                tx_rate: None,
                bandwidth: Some(40.0),
                ..Default::default()
            }
        } else {
            reading(-50.0)
        };
        store.append(i as f64, &r);
    }
    let mut rc = RenderController::new();
    let frame = rc.render(&store, &MonitorSettings::default(), 100.0, 800);

    let rx = frame.series_for(&ChannelKind::RxRate).unwrap();
    assert_eq!(rx.regions, vec![(39.0, 50.0)], "rx failure stretch must be shaded, widened");
    let signal = frame.series_for(&ChannelKind::Signal).unwrap();
    assert!(signal.regions.is_empty(), "signal never failed");
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[test]
fn settings_round_trip_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = MonitorSettings::default();
    settings.window_secs = None;
    settings.budget.tail_len = 120;
    settings.save(&path).unwrap();

    let restored = MonitorSettings::load(&path).unwrap();
    assert_eq!(restored, settings, "settings must survive a JSON round trip");
}

#[test]
fn default_budget_matches_render_constants() {
    let settings = MonitorSettings::default();
    assert_eq!(settings.budget.max_points(1_000), 1_200);
    assert_eq!(settings.budget.max_points(10), 200, "narrow surfaces keep the floor");
    assert_eq!(settings.budget.tail_len, 60);
    assert_eq!(settings.window_secs, Some(600.0));
}

// ── Smoothing ────────────────────────────────────────────────────────────────

#[test]
fn smoothing_passes_nan_through_without_disturbing_the_mean() {
    let out = smooth(&[1.0, f64::NAN, 3.0], 0.3);
    assert_eq!(out[0], 1.0);
    assert!(out[1].is_nan());
    assert!((out[2] - (0.3 * 3.0 + 0.7 * 1.0)).abs() < 1e-12);

    let all_nan = smooth(&[f64::NAN, f64::NAN], 0.3);
    assert!(all_nan.iter().all(|v| v.is_nan()));
}

// ── Time axis labels ─────────────────────────────────────────────────────────

#[test]
fn label_resolution_follows_the_visible_span() {
    assert_eq!(resolution_for_span(600.0), TimeResolution::Seconds);
    assert_eq!(resolution_for_span(14_400.0), TimeResolution::Minutes);
    assert_eq!(resolution_for_span(7.0 * 86_400.0), TimeResolution::Days);
}

#[test]
fn tick_labels_carry_the_span_granularity() {
    // Formatting is in local time, so assert on the label's shape rather
    // than the exact rendered instant.
    let ts = 1_700_000_000.0;

    let secs = format_tick(ts, 600.0);
    assert_eq!(secs.matches(':').count(), 2, "H:M:S expected, got {secs:?}");

    let mins = format_tick(ts, 14_400.0);
    assert_eq!(mins.matches(':').count(), 1, "H:M expected, got {mins:?}");

    let days = format_tick(ts, 7.0 * 86_400.0);
    assert!(
        days.contains('-') && days.contains(' '),
        "date-carrying label expected, got {days:?}"
    );

    assert!(format_tick(f64::NAN, 600.0).is_empty());
    assert!(format_tick(f64::INFINITY, 600.0).is_empty());
}
