pub mod cache;
pub mod channel;
pub mod downsample;
pub mod failures;
pub mod smooth;
pub mod store;
pub mod window;
pub mod x_formatter;
