//! Whole-series summary statistics.

use detector_spi::{DetectorError, Result};

/// Magnitude above which samples are scaled down before summing.
const RESCALE_ABOVE: f64 = 1e100;

/// Exponent of the power-of-two divisor applied to large-magnitude series.
const RESCALE_EXPONENT: u64 = 600;

/// Mean and population standard deviation of a series.
///
/// Series holding very large magnitudes are evaluated in units of an exact
/// power of two, so squared deviations stay finite for any finite input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub len: usize,
    pub mean: f64,
    pub std_dev: f64,
    scale: f64,
    scaled_mean: f64,
    scaled_std_dev: f64,
}

impl SeriesStats {
    /// Compute statistics over the whole series.
    ///
    /// Divides by `n`, not `n - 1`. The series must be non-empty and
    /// contain only finite values.
    pub fn compute(series: &[f64]) -> Result<Self> {
        if series.is_empty() {
            return Err(DetectorError::EmptySeries);
        }
        super::ensure_finite(series)?;

        // Exact for constant series, where summation rounding would
        // otherwise leave a spurious non-zero deviation.
        let first = series[0];
        if series.iter().all(|&x| x == first) {
            return Ok(Self {
                len: series.len(),
                mean: first,
                std_dev: 0.0,
                scale: 1.0,
                scaled_mean: first,
                scaled_std_dev: 0.0,
            });
        }

        let max_abs = series.iter().fold(0.0f64, |m, x| m.max(x.abs()));
        let scale = if max_abs > RESCALE_ABOVE {
            f64::from_bits((1023 + RESCALE_EXPONENT) << 52)
        } else {
            1.0
        };

        let n = series.len() as f64;
        let scaled_mean = series.iter().map(|x| x / scale).sum::<f64>() / n;
        let variance = series
            .iter()
            .map(|x| (x / scale - scaled_mean).powi(2))
            .sum::<f64>()
            / n;
        let scaled_std_dev = variance.sqrt();

        // |mean| and std_dev never exceed max|x|; the clamp absorbs rounding.
        Ok(Self {
            len: series.len(),
            mean: (scaled_mean * scale).clamp(-max_abs, max_abs),
            std_dev: (scaled_std_dev * scale).min(max_abs),
            scale,
            scaled_mean,
            scaled_std_dev,
        })
    }

    /// Whether `value` lies more than `k` standard deviations from the mean.
    pub fn exceeds(&self, value: f64, k: f64) -> bool {
        (value / self.scale - self.scaled_mean).abs() > k * self.scaled_std_dev
    }

    /// Signed distance from the mean in standard deviations.
    ///
    /// Zero for every value when the series has no variance.
    pub fn z_score(&self, value: f64) -> f64 {
        if self.scaled_std_dev == 0.0 {
            0.0
        } else {
            (value / self.scale - self.scaled_mean) / self.scaled_std_dev
        }
    }
}
