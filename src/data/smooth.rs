//! NaN-aware exponential moving average.
//!
//! Applied to small visible windows (which render every raw sample) and to
//! the live tails of the ping channels. NaN inputs stay NaN in the output
//! and do not disturb the running mean, so failure gaps pass through the
//! smoother unchanged.

pub const DEFAULT_ALPHA: f64 = 0.3;

/// EMA-smooth `data` with coefficient `alpha`. The first finite sample
/// seeds the mean; everything before it (and every NaN) is passed through.
pub fn smooth(data: &[f64], alpha: f64) -> Vec<f64> {
    let first_valid = match data.iter().position(|v| v.is_finite()) {
        Some(i) => i,
        None => return data.to_vec(),
    };

    let mut out = Vec::with_capacity(data.len());
    let mut ema = data[first_valid];
    for (i, &v) in data.iter().enumerate() {
        if !v.is_finite() {
            out.push(f64::NAN);
        } else {
            if i != first_valid {
                ema = alpha * v + (1.0 - alpha) * ema;
            }
            out.push(ema);
        }
    }
    out
}
