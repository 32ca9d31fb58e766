//! Sample statistics for latency measurements

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population variance (mean of squared deviations).
    pub variance: f64,
}

pub fn sample_stats(samples: &[f64]) -> Option<SampleStats> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(0.0, f64::max);

    Some(SampleStats { mean, min, max, variance })
}

pub fn millis_f64(duration: std::time::Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
