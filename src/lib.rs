//! Linkplot crate root: re-exports and module wiring.
//!
//! This crate is the data-reduction core of a live wireless-link monitor:
//! it decides, on every tick, which subset and resolution of an ever-growing
//! time series to hand to the chart renderer.
//!
//! The pipeline per tick:
//! - `data::store`: append-only aligned storage of the sampled channels
//! - `data::window`: visible range selection for the configured time window
//! - `data::downsample`: absolute-time-bucketed, peak-preserving reduction
//! - `data::cache`: reuse of the reduced history across ticks
//! - `data::failures`: shaded-region intervals for failed samples
//! - `render`: assembles the above into a [`RenderFrame`] for the UI
//!
//! Metric acquisition, the ping workers and the chart widgets themselves
//! live outside this crate; they feed [`LinkReading`]s in and consume
//! [`RenderFrame`]s out.

pub mod config;
pub mod data;
pub mod render;

#[cfg(feature = "demo")]
pub mod demo;

// Public re-exports for a compact external API
pub use config::{MonitorSettings, RenderBudget, SettingsError, WindowPreset, WINDOW_PRESETS};
pub use data::channel::ChannelKind;
pub use data::store::{LinkReading, TimeSeriesStore};
pub use render::{RenderController, RenderFrame, SeriesFrame};
