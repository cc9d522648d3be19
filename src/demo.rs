//! Synthetic multi-channel history for demos and soak testing.
//!
//! Generates one sample per second over a requested duration, with the same
//! character as real link data: a drifting signal level, smoothed rx/tx
//! rates, a bandwidth that occasionally steps between standard widths, ping
//! latency with spikes, and failure stretches on every channel (including a
//! few near the tail, where downsampling boundaries are most sensitive).

use rand::Rng;

use crate::data::store::{LinkReading, TimeSeriesStore};

/// Parse a duration string: `"20m"`, `"4h"`, `"1d"`, `"1w"`, or plain
/// seconds. Returns the length in seconds.
pub fn parse_duration(s: &str) -> Option<u64> {
    let s = s.trim().to_lowercase();
    let (num, mult) = match s.as_bytes().last()? {
        b'm' => (&s[..s.len() - 1], 60),
        b'h' => (&s[..s.len() - 1], 3_600),
        b'd' => (&s[..s.len() - 1], 86_400),
        b'w' => (&s[..s.len() - 1], 604_800),
        _ => (s.as_str(), 1),
    };
    num.parse::<u64>().ok().map(|n| n * mult)
}

/// Mark `count` random failure stretches of `len_range` samples, plus fixed
/// near-tail stretches at the given offsets from the end.
fn mark_failures<R: Rng>(
    rng: &mut R,
    mask: &mut [bool],
    count: usize,
    len_range: std::ops::Range<usize>,
    tail_offsets: &[(usize, usize)],
) {
    let n = mask.len();
    if n < 200 {
        return;
    }
    for _ in 0..count {
        let start = rng.gen_range(0..n - 100);
        let len = rng.gen_range(len_range.clone());
        for f in mask.iter_mut().skip(start).take(len) {
            *f = true;
        }
    }
    for &(offset, len) in tail_offsets {
        if offset <= n {
            let start = n - offset;
            for f in mask.iter_mut().skip(start).take(len) {
                *f = true;
            }
        }
    }
}

/// Centered moving average, used to smooth the raw rate and ping noise
/// into plausible-looking traces.
fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len();
    let half = window / 2;
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + window - half).min(n);
            data[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
        })
        .collect()
}

/// Generate a store holding `duration` (e.g. `"4h"`) of synthetic history
/// ending at `now`, with one ping channel per entry of `hosts`.
/// Unparseable durations yield an empty store.
pub fn generate_history(duration: &str, now: f64, hosts: &[(&str, &str)]) -> TimeSeriesStore {
    let mut store = TimeSeriesStore::new();
    for (host, label) in hosts {
        store.add_ping_host(*host, Some(*label));
    }

    let n = match parse_duration(duration) {
        Some(secs) => secs as usize,
        None => return store,
    };
    let start_time = now - n as f64;
    let mut rng = rand::thread_rng();

    // Signal: random base with a slow sinusoidal drift, clipped to range.
    let signal: Vec<f64> = (0..n)
        .map(|i| {
            let base = rng.gen_range(-65..-45) as f64;
            let drift = 10.0 * (8.0 * std::f64::consts::PI * i as f64 / n as f64).sin();
            (base + drift).clamp(-80.0, -30.0)
        })
        .collect();
    let mut signal_failed = vec![false; n];
    let count = rng.gen_range(5..15);
    mark_failures(
        &mut rng,
        &mut signal_failed,
        count,
        10..60,
        &[(100, 30), (250, 30), (400, 30)],
    );

    let rx_base: Vec<f64> = (0..n).map(|_| rng.gen_range(80.0..150.0)).collect();
    let tx_base: Vec<f64> = (0..n).map(|_| rng.gen_range(50.0..120.0)).collect();
    let rx = moving_average(&rx_base, 10);
    let tx = moving_average(&tx_base, 10);
    let mut rates_failed = vec![false; n];
    let count = rng.gen_range(3..10);
    mark_failures(
        &mut rng,
        &mut rates_failed,
        count,
        5..30,
        &[(150, 20), (350, 20)],
    );

    // Bandwidth steps rarely between the standard channel widths.
    let widths = [20.0, 40.0, 80.0, 160.0];
    let mut bw = Vec::with_capacity(n);
    let mut current = widths[rng.gen_range(0..widths.len())];
    for _ in 0..n {
        if rng.gen::<f64>() < 0.001 {
            current = widths[rng.gen_range(0..widths.len())];
        }
        bw.push(current);
    }
    let mut bw_failed = vec![false; n];
    let count = rng.gen_range(3..8);
    mark_failures(
        &mut rng,
        &mut bw_failed,
        count,
        5..40,
        &[(200, 25), (450, 25)],
    );

    // Ping latency: base with occasional spikes, lightly smoothed.
    let mut pings: Vec<(Vec<f64>, Vec<bool>)> = Vec::new();
    for _ in hosts {
        let base: Vec<f64> = (0..n)
            .map(|_| {
                let mut v = rng.gen_range(10.0..40.0);
                if rng.gen::<f64>() < 0.02 {
                    v *= rng.gen_range(2.0..5.0);
                }
                v
            })
            .collect();
        let values = moving_average(&base, 5);
        let mut failed = vec![false; n];
        let count = rng.gen_range(5..15);
        mark_failures(
            &mut rng,
            &mut failed,
            count,
            5..30,
            &[(120, 15), (300, 15), (500, 15)],
        );
        pings.push((values, failed));
    }

    for i in 0..n {
        let pick = |v: &[f64], failed: &[bool]| {
            if failed[i] {
                None
            } else {
                Some(v[i])
            }
        };
        let reading = LinkReading {
            signal: pick(&signal, &signal_failed),
            rx_rate: pick(&rx, &rates_failed),
            tx_rate: pick(&tx, &rates_failed),
            bandwidth: pick(&bw, &bw_failed),
            pings: pings
                .iter()
                .map(|(v, failed)| pick(v, failed))
                .collect(),
        };
        store.append(start_time + i as f64, &reading);
    }

    store
}
