//! TimeSeriesStore: append-only aligned storage of the sampled channels.
//!
//! One entry is appended per tick to the shared time axis and to every
//! channel in lock-step, so indices stay aligned 1:1 across all channels.
//! A failed probe is stored as NaN with its failure flag set, never as a
//! short write. Nothing is ever deleted or mutated in place; the store only
//! grows for the process lifetime.

use crate::data::channel::ChannelKind;

/// One channel's value sequence plus its parallel failure flags.
///
/// Invariant: `failed[i]` is set exactly when `values[i]` is NaN.
#[derive(Debug, Default, Clone)]
pub struct SampleColumn {
    pub values: Vec<f64>,
    pub failed: Vec<bool>,
}

impl SampleColumn {
    fn push(&mut self, value: Option<f64>) {
        match value {
            Some(v) if v.is_finite() => {
                self.values.push(v);
                self.failed.push(false);
            }
            _ => {
                self.values.push(f64::NAN);
                self.failed.push(true);
            }
        }
    }

    fn backfill(len: usize) -> Self {
        Self {
            values: vec![f64::NAN; len],
            failed: vec![true; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A dynamically added ping-latency channel for one probed host.
#[derive(Debug, Clone)]
pub struct PingChannel {
    pub host: String,
    pub label: String,
    pub column: SampleColumn,
}

/// One tick's worth of probe results, handed in by the collection path.
///
/// `None` means the probe failed this tick. `pings` is ordered like the
/// store's ping channels; entries beyond the provided length count as
/// failed.
#[derive(Debug, Default, Clone)]
pub struct LinkReading {
    pub signal: Option<f64>,
    pub rx_rate: Option<f64>,
    pub tx_rate: Option<f64>,
    pub bandwidth: Option<f64>,
    pub pings: Vec<Option<f64>>,
}

/// Append-only store for all tracked channels, owned by the tick driver.
#[derive(Debug, Default)]
pub struct TimeSeriesStore {
    time: Vec<f64>,
    signal: SampleColumn,
    rx_rate: SampleColumn,
    tx_rate: SampleColumn,
    bandwidth: SampleColumn,
    pings: Vec<PingChannel>,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry to the time axis and every channel in lock-step.
    ///
    /// Timestamps must strictly increase; a stale or duplicate timestamp is
    /// dropped rather than corrupting the ordered axis.
    pub fn append(&mut self, timestamp: f64, reading: &LinkReading) {
        if let Some(&last) = self.time.last() {
            if timestamp <= last {
                log::debug!(
                    "dropping non-monotonic sample: t={timestamp} after t={last}"
                );
                return;
            }
        }
        self.time.push(timestamp);
        self.signal.push(reading.signal);
        self.rx_rate.push(reading.rx_rate);
        self.tx_rate.push(reading.tx_rate);
        self.bandwidth.push(reading.bandwidth);
        for (i, ping) in self.pings.iter_mut().enumerate() {
            ping.column.push(reading.pings.get(i).copied().flatten());
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// The shared, strictly increasing time axis.
    pub fn times(&self) -> &[f64] {
        &self.time
    }

    pub fn last_time(&self) -> Option<f64> {
        self.time.last().copied()
    }

    pub fn signal(&self) -> &SampleColumn {
        &self.signal
    }

    pub fn rx_rate(&self) -> &SampleColumn {
        &self.rx_rate
    }

    pub fn tx_rate(&self) -> &SampleColumn {
        &self.tx_rate
    }

    pub fn bandwidth(&self) -> &SampleColumn {
        &self.bandwidth
    }

    /// Look up a channel's column by kind. Returns `None` for an unknown
    /// ping host.
    pub fn column(&self, kind: &ChannelKind) -> Option<&SampleColumn> {
        match kind {
            ChannelKind::Signal => Some(&self.signal),
            ChannelKind::RxRate => Some(&self.rx_rate),
            ChannelKind::TxRate => Some(&self.tx_rate),
            ChannelKind::Bandwidth => Some(&self.bandwidth),
            ChannelKind::Ping { host } => self
                .pings
                .iter()
                .find(|p| p.host == *host)
                .map(|p| &p.column),
        }
    }

    pub fn ping_channels(&self) -> &[PingChannel] {
        &self.pings
    }

    /// Register a new ping channel, backfilled with failed samples up to the
    /// current store length so index alignment holds. Returns its index into
    /// [`Self::ping_channels`].
    pub fn add_ping_host<S: Into<String>>(&mut self, host: S, label: Option<S>) -> usize {
        let host = host.into();
        let label = label.map(|s| s.into()).unwrap_or_else(|| host.clone());
        self.pings.push(PingChannel {
            host,
            label,
            column: SampleColumn::backfill(self.time.len()),
        });
        self.pings.len() - 1
    }

    /// Drop a ping channel. Out-of-range indices are ignored.
    pub fn remove_ping_host(&mut self, index: usize) {
        if index < self.pings.len() {
            self.pings.remove(index);
        }
    }
}
