//! Channel descriptors: the closed set of metrics the monitor tracks.
//!
//! The four link channels (signal, rx/tx rate, bandwidth) always exist and
//! share one reduced time axis; ping channels are created and removed at
//! runtime, one per probed host, and carry their own time base through the
//! reduction pipeline.

use serde::{Deserialize, Serialize};

/// Identifies one tracked metric channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Link signal strength (dBm). Primary channel for min/max bucketing.
    Signal,
    /// Receive bitrate (MBit/s).
    RxRate,
    /// Transmit bitrate (MBit/s).
    TxRate,
    /// Channel bandwidth (MHz).
    Bandwidth,
    /// Round-trip latency (ms) to one probed host.
    Ping { host: String },
}

impl ChannelKind {
    /// Human-readable channel label, e.g. for a legend.
    pub fn label(&self) -> &str {
        match self {
            ChannelKind::Signal => "Signal",
            ChannelKind::RxRate => "RX rate",
            ChannelKind::TxRate => "TX rate",
            ChannelKind::Bandwidth => "Bandwidth",
            ChannelKind::Ping { host } => host.as_str(),
        }
    }

    /// Unit suffix for axis/legend display.
    pub fn unit(&self) -> &'static str {
        match self {
            ChannelKind::Signal => "dBm",
            ChannelKind::RxRate | ChannelKind::TxRate => "MBit/s",
            ChannelKind::Bandwidth => "MHz",
            ChannelKind::Ping { .. } => "ms",
        }
    }

    pub fn is_ping(&self) -> bool {
        matches!(self, ChannelKind::Ping { .. })
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
