//! Aggregate metric computation over the run's latency history.

/// Interpolated percentile over an unsorted sample set.
///
/// Uses linear interpolation between the two closest ranks (the same
/// definition numpy's `percentile` defaults to). Returns 0.0 for an empty
/// sample set.
pub fn percentile(samples: &[f64], p: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;

    if lo == hi {
        return sorted[lo];
    }

    let fraction = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * fraction
}

/// 95th percentile of the latency history.
pub fn p95(samples: &[f64]) -> f64 {
    percentile(samples, 95.0)
}

/// Error rate as a percentage of total requests; 0 before the first request.
pub fn error_rate_percent(error_count: u64, total_requests: u64) -> f64 {
    if total_requests == 0 {
        return 0.0;
    }
    100.0 * error_count as f64 / total_requests as f64
}
