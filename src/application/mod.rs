pub mod aggregator;
pub mod anomaly;
pub mod clusters;
pub mod correlation;
pub mod engine;
pub mod noise;
pub mod risk;
pub mod tally;
pub mod trends;
pub mod velocity;

/// Round to 3 decimals, the precision every published artifact uses.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Arithmetic mean; 0.0 for an empty slice.
pub(crate) fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round3_half_cases() {
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(-0.075), -0.075);
        assert_eq!(round3(0.9995), 1.0);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean_or_zero(&[]), 0.0);
        assert_eq!(mean_or_zero(&[0.2, 0.4]), 0.30000000000000004);
    }
}
