use crate::models::{DailyRecord, Thresholds};

/// How many standard deviations above the mean a day must be to count as notable.
pub const THRESHOLD_SPREAD: f64 = 0.75;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let center = mean(values);
    let variance = values
        .iter()
        .map(|value| (value - center).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

pub fn threshold(values: &[f64]) -> f64 {
    mean(values) + THRESHOLD_SPREAD * population_std_dev(values)
}

impl Thresholds {
    pub fn from_records(records: &[DailyRecord]) -> Self {
        let precipitation: Vec<f64> = records.iter().map(|r| r.precipitation).collect();
        let snowfall: Vec<f64> = records.iter().map(|r| r.snowfall).collect();
        Thresholds {
            storm: threshold(&precipitation),
            snow: threshold(&snowfall),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(precipitation: f64, snowfall: f64) -> DailyRecord {
        DailyRecord {
            date: None,
            max_temp: 50.0,
            precipitation,
            snowfall,
            thunder: false,
        }
    }

    #[test]
    fn threshold_uses_population_statistics() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0];
        let expected = 2.0 + 0.75 * 2.0_f64.sqrt();
        assert!((threshold(&values) - expected).abs() < 1e-9);
        assert!((population_std_dev(&values) - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn empty_series_yields_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(population_std_dev(&[]), 0.0);
        assert_eq!(threshold(&[]), 0.0);
    }

    #[test]
    fn constant_series_threshold_is_the_value() {
        assert!((threshold(&[1.5, 1.5, 1.5]) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn thresholds_come_from_separate_columns() {
        let records: Vec<DailyRecord> = (0..5)
            .map(|i| record(i as f64, if i == 4 { 10.0 } else { 0.0 }))
            .collect();
        let thresholds = Thresholds::from_records(&records);
        assert!((thresholds.storm - (2.0 + 0.75 * 2.0_f64.sqrt())).abs() < 1e-9);
        // snowfall [0,0,0,0,10]: mean 2, variance 16
        assert!((thresholds.snow - 5.0).abs() < 1e-9);
    }
}
